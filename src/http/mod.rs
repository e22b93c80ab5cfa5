pub mod client;
pub mod headers;

pub use client::{build_api_client, build_scrape_client};
pub use headers::header_records;
