/// CLI defaults
pub const DEFAULT_OUTPUT_PREFIX: &str = "output";
pub const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 5;

/// Scraping constants
pub const SCRAPE_SCHEME: &str = "https";
pub const DEFAULT_REQUEST_PATH: &str = "/";

/// Azure OpenAI environment variables
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
pub const DEFAULT_API_VERSION: &str = "2024-12-01-preview";

/// Completion request constants
pub const SYSTEM_MESSAGE: &str = "You are an expert bug bounty researcher.";
pub const COMPLETION_TEMPERATURE: f32 = 0.7;
pub const API_KEY_HEADER: &str = "api-key";

/// Wordlist section markers
pub const HEADERS_MARKER: &str = "=== HEADERS ===";
pub const DOMAINS_MARKER: &str = "=== DOMAINS ===";
pub const ENDPOINTS_MARKER: &str = "=== ENDPOINTS ===";

/// Wordlist file suffixes
pub const HEADERS_SUFFIX: &str = "_headers.txt";
pub const DOMAINS_SUFFIX: &str = "_domains.txt";
pub const ENDPOINTS_SUFFIX: &str = "_endpoints.txt";
