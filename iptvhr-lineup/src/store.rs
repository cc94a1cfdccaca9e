//! In-memory channel store.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::Channel;

/// Ordered channel list shared between the loader and request handlers.
///
/// The list is held behind an `Arc` and swapped as a whole, so a reader
/// holds either the previous list or the new one, never a mix.
#[derive(Debug)]
pub struct ChannelStore {
    channels: RwLock<Arc<[Channel]>>,
}

impl Default for ChannelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Replace the whole channel list.
    pub fn replace(&self, channels: Vec<Channel>) {
        let channels: Arc<[Channel]> = channels.into();
        *self.channels.write() = channels;
    }

    /// Snapshot of the current channel list.
    pub fn all(&self) -> Arc<[Channel]> {
        Arc::clone(&*self.channels.read())
    }

    /// Number of stored channels.
    pub(crate) fn len(&self) -> usize {
        self.channels.read().len()
    }
}
