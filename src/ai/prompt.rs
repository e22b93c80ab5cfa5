use std::fmt::{Display, Write};

use crate::types::ScrapeLists;

const INSTRUCTIONS: &str = "\
You are an expert bug bounty researcher tasked with doing intense and comprehensive reconnaissance on a target program.
Your task is to analyze the following HTTP headers, domains, and endpoints to build comprehensive wordlists for additional brute-force recon.
You should generate three wordlists: one for HTTP headers, one for domains, and one for endpoints.

IMPORTANT — Length requirements:
- Each wordlist MUST contain a MINIMUM of 1,000 entries and a MAXIMUM of 5,000 entries.
- Start by including every unique item from the provided data verbatim.
- Then extrapolate aggressively: infer variations, common patterns, naming conventions, permutations, and related terms based on the provided data.
- For headers: include common security headers, cache headers, custom X- headers, and variations of observed header names.
- For domains: include likely subdomains, environment-specific variants (dev, staging, uat, api, admin, internal), regional variants, and CDN/service-specific subdomains.
- For endpoints: include common API versioning paths, CRUD variations, admin panels, debug endpoints, backup file extensions, and path permutations derived from observed patterns.
- Do NOT pad with generic or unrelated filler — every entry should be plausible for the target based on the observed data.

OUTPUT FORMAT:
Return exactly three sections, each starting with a header line (=== HEADERS ===, === DOMAINS ===, === ENDPOINTS ===), followed by one entry per line with no numbering, bullets, or extra formatting.

";

/// Build the wordlist generation prompt from the scraped lists.
///
/// Entries are written verbatim as `- <entry>` lines under their list label.
pub fn build_prompt(lists: &ScrapeLists) -> String {
    let mut prompt = String::from(INSTRUCTIONS);
    push_list(&mut prompt, "HTTP Headers:", &lists.headers);
    prompt.push('\n');
    push_list(&mut prompt, "Domains:", &lists.domains);
    prompt.push('\n');
    push_list(&mut prompt, "Endpoints:", &lists.endpoints);
    prompt
}

fn push_list<T: Display>(prompt: &mut String, label: &str, entries: impl IntoIterator<Item = T>) {
    prompt.push_str(label);
    prompt.push('\n');
    for entry in entries {
        // Writing into a String cannot fail
        let _ = writeln!(prompt, "- {}", entry);
    }
}
