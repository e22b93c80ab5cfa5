pub mod args;
pub mod input;
pub mod url;

pub use args::{parse_arguments, report_usage_error};
pub use input::read_url_file;
pub use url::{request_target, split_url};
