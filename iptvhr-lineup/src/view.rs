//! Response documents derived from the channel store.

use std::sync::Arc;

use crate::store::ChannelStore;
use crate::types::{DeviceDescriptor, DeviceIdentity, LineupEntry, LineupStatus, ServiceLocation};

/// Builds the documents served to tuner clients.
///
/// Every accessor reads the store fresh, so a replaced channel list shows
/// up on the next call.
#[derive(Debug, Clone)]
pub struct ViewBuilder {
    store: Arc<ChannelStore>,
    identity: DeviceIdentity,
    location: ServiceLocation,
}

impl ViewBuilder {
    pub fn new(store: Arc<ChannelStore>, identity: DeviceIdentity, location: ServiceLocation) -> Self {
        Self {
            store,
            identity,
            location,
        }
    }

    /// Device discovery document.
    pub fn device_descriptor(&self) -> DeviceDescriptor {
        let id = &self.identity;
        DeviceDescriptor {
            friendly_name: id.friendly_name.clone(),
            manufacturer: id.manufacturer.clone(),
            model_number: id.model_number.clone(),
            firmware_name: id.firmware_name.clone(),
            firmware_version: id.firmware_version.clone(),
            device_id: id.device_id.clone(),
            device_auth: id.device_auth.clone(),
            tuner_count: id.tuner_count,
            base_url: self.location.base_url.clone(),
            lineup_url: self.location.lineup_url.clone(),
        }
    }

    /// Channel lineup in store order.
    ///
    /// Guide numbers are positions in this listing, not the stored
    /// sequence indices.
    pub fn lineup(&self) -> Vec<LineupEntry> {
        self.store
            .all()
            .iter()
            .enumerate()
            .map(|(i, ch)| LineupEntry {
                guide_number: (i + 1).to_string(),
                guide_name: ch.name.clone(),
                url: ch.url.clone(),
                hd: true,
            })
            .collect()
    }

    /// Number of channels currently in the lineup.
    pub fn channel_count(&self) -> usize {
        self.store.len()
    }

    /// Scan status document.
    pub fn lineup_status(&self) -> LineupStatus {
        LineupStatus::default()
    }
}
