use std::sync::Arc;

use st_cms::SharedFeed;
use st_core::ContentSource;

pub struct AppState {
    pub source: Arc<dyn ContentSource>,
    pub feed: SharedFeed,
}
