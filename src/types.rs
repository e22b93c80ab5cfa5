use clap::Parser;
use indexmap::IndexSet;
use std::fmt;
use std::path::PathBuf;

use crate::constants::{DEFAULT_OUTPUT_PREFIX, DEFAULT_SCRAPE_TIMEOUT_SECS};

/// CLI arguments structure
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, args_override_self = true)]
pub struct Cli {
    // INPUT
    /// Input a list of URLs, one per line.
    #[arg(short = 'i', long = "input", value_name = "URL_FILE", help_heading = "INPUT")]
    pub input: Option<PathBuf>,

    /// Load Azure OpenAI settings from this file instead of ./.env.
    #[arg(long, value_name = "PATH", help_heading = "INPUT")]
    pub env_file: Option<PathBuf>,

    // NETWORK
    /// Timeout for each scrape request in seconds.
    #[arg(long, default_value_t = DEFAULT_SCRAPE_TIMEOUT_SECS, help_heading = "NETWORK")]
    pub timeout: u64,

    /// Accept invalid TLS certificates while scraping.
    #[arg(long, help_heading = "NETWORK")]
    pub insecure: bool,

    // OUTPUT
    /// Prefix for the generated wordlist files.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "OUTPUT_PREFIX",
        default_value = DEFAULT_OUTPUT_PREFIX,
        help_heading = "OUTPUT",
        long_help = "Prefix for the generated wordlists.\nFiles are written to <prefix>_headers.txt, <prefix>_domains.txt and <prefix>_endpoints.txt"
    )]
    pub output: String,

    /// Match section markers case-insensitively and ignore spacing around them.
    #[arg(long, help_heading = "OUTPUT")]
    pub tolerant_markers: bool,

    /// Disable color output.
    #[arg(long, help_heading = "OUTPUT")]
    pub no_color: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long, help_heading = "OUTPUT")]
    pub verbose: bool,
}

/// A validated invocation: the CLI plus the required input file.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub input: PathBuf,
    pub cli: Cli,
}

impl Invocation {
    pub fn output_prefix(&self) -> &str {
        &self.cli.output
    }
}

/// A response header as returned by the scraped server
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderRecord {
    pub name: String,
    pub value: String,
}

impl HeaderRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for HeaderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Headers, domains and endpoints collected from the URL list.
///
/// Each collection keeps first-seen order and ignores repeats.
#[derive(Debug, Default, Clone)]
pub struct ScrapeLists {
    pub headers: IndexSet<HeaderRecord>,
    pub domains: IndexSet<String>,
    pub endpoints: IndexSet<String>,
}

impl ScrapeLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_domain(&mut self, domain: &str) -> bool {
        !domain.is_empty() && self.domains.insert(domain.to_string())
    }

    pub fn add_endpoint(&mut self, endpoint: &str) -> bool {
        !endpoint.is_empty() && self.endpoints.insert(endpoint.to_string())
    }

    pub fn add_header(&mut self, header: HeaderRecord) -> bool {
        self.headers.insert(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_lists_keep_first_occurrence() {
        let mut lists = ScrapeLists::new();
        assert!(lists.add_domain("b.example.com"));
        assert!(lists.add_domain("a.example.com"));
        assert!(!lists.add_domain("b.example.com"));
        let domains: Vec<&str> = lists.domains.iter().map(String::as_str).collect();
        assert_eq!(domains, vec!["b.example.com", "a.example.com"]);
    }

    #[test]
    fn test_scrape_lists_ignore_empty_values() {
        let mut lists = ScrapeLists::new();
        assert!(!lists.add_domain(""));
        assert!(!lists.add_endpoint(""));
        assert!(lists.domains.is_empty());
        assert!(lists.endpoints.is_empty());
    }

    #[test]
    fn test_header_uniqueness_is_by_pair() {
        let mut lists = ScrapeLists::new();
        assert!(lists.add_header(HeaderRecord::new("server", "nginx")));
        assert!(lists.add_header(HeaderRecord::new("server", "apache")));
        assert!(!lists.add_header(HeaderRecord::new("server", "nginx")));
        assert_eq!(lists.headers.len(), 2);
        assert_eq!(lists.headers[0].to_string(), "server: nginx");
    }
}
