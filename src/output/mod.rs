pub mod formatter;
pub mod wordlists;

pub use formatter::{format_info_line, format_skip_line};
pub use wordlists::{MarkerMatch, save_wordlists, split_sections};
