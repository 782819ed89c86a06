pub mod client;
pub mod feed;
pub mod normalize;

pub use client::{CmsConfig, PrismicClient};
pub use feed::{ExtendStatus, PostFeed, SharedFeed};

pub mod prelude {
    pub use crate::client::{CmsConfig, PrismicClient};
    pub use crate::feed::{ExtendStatus, PostFeed, SharedFeed};
    pub use st_core::{ContentSource, Error, Post, Result};
}
