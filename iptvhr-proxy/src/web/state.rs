//! Web server shared state.

use iptvhr_lineup::ViewBuilder;

/// State shared by all request handlers.
#[derive(Debug, Clone)]
pub struct WebState {
    pub views: ViewBuilder,
}

impl WebState {
    pub fn new(views: ViewBuilder) -> Self {
        Self { views }
    }
}
