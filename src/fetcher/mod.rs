pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{fetch, normalize_url};
pub use errors::FetchError;
pub use types::{Charset, FetchOptions, PageResponse};
