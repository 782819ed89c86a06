pub mod error;
pub mod source;
pub mod types;

pub use error::Error;
pub use source::ContentSource;
pub use types::{Post, PostSummary, QueryOptions, QueryResponse, RawRecord};

pub type Result<T> = std::result::Result<T, Error>;
