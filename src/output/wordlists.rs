use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

use crate::constants::{
    DOMAINS_MARKER, DOMAINS_SUFFIX, ENDPOINTS_MARKER, ENDPOINTS_SUFFIX, HEADERS_MARKER,
    HEADERS_SUFFIX,
};
use crate::output::formatter::format_written_line;

static TOLERANT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^=+\s*(headers|domains|endpoints)\s*=+$").expect("valid marker regex")
});

/// One of the three wordlists produced from the completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Headers,
    Domains,
    Endpoints,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Headers, Section::Domains, Section::Endpoints];

    pub fn marker(self) -> &'static str {
        match self {
            Section::Headers => HEADERS_MARKER,
            Section::Domains => DOMAINS_MARKER,
            Section::Endpoints => ENDPOINTS_MARKER,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Section::Headers => HEADERS_SUFFIX,
            Section::Domains => DOMAINS_SUFFIX,
            Section::Endpoints => ENDPOINTS_SUFFIX,
        }
    }

    /// Recognise a trimmed line as a section marker
    pub fn from_marker(line: &str, matching: MarkerMatch) -> Option<Section> {
        if let Some(section) = Section::ALL.into_iter().find(|s| s.marker() == line) {
            return Some(section);
        }
        if matching == MarkerMatch::Exact {
            return None;
        }
        let captures = TOLERANT_MARKER.captures(line)?;
        match captures[1].to_ascii_lowercase().as_str() {
            "headers" => Some(Section::Headers),
            "domains" => Some(Section::Domains),
            "endpoints" => Some(Section::Endpoints),
            _ => None,
        }
    }
}

/// How marker lines are recognised in the completion text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerMatch {
    #[default]
    Exact,
    Tolerant,
}

/// Entries of the three wordlists, in the order the model returned them
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Wordlists {
    pub headers: Vec<String>,
    pub domains: Vec<String>,
    pub endpoints: Vec<String>,
}

impl Wordlists {
    pub fn entries(&self, section: Section) -> &[String] {
        match section {
            Section::Headers => &self.headers,
            Section::Domains => &self.domains,
            Section::Endpoints => &self.endpoints,
        }
    }

    fn entries_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Headers => &mut self.headers,
            Section::Domains => &mut self.domains,
            Section::Endpoints => &mut self.endpoints,
        }
    }
}

/// Split completion text into wordlists.
///
/// Lines before the first marker are dropped, as are blank lines. Every other
/// trimmed line belongs to the most recent marker.
pub fn split_sections(text: &str, matching: MarkerMatch) -> Wordlists {
    let mut wordlists = Wordlists::default();
    let mut current = None;

    for line in text.lines() {
        let stripped = line.trim();
        if let Some(section) = Section::from_marker(stripped, matching) {
            current = Some(section);
            continue;
        }
        if let Some(section) = current
            && !stripped.is_empty()
        {
            wordlists.entries_mut(section).push(stripped.to_string());
        }
    }

    wordlists
}

/// Render entries as file content: one per line plus a trailing newline
pub fn render_wordlist(entries: &[String]) -> String {
    let mut content = entries.join("\n");
    content.push('\n');
    content
}

pub fn wordlist_path(prefix: &str, section: Section) -> PathBuf {
    PathBuf::from(format!("{}{}", prefix, section.suffix()))
}

/// A wordlist file that has been written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenWordlist {
    pub section: Section,
    pub path: PathBuf,
    pub count: usize,
}

/// Write the three wordlist files next to `prefix`, creating its directory if needed
pub async fn save_wordlists(
    wordlists: &Wordlists,
    prefix: &str,
    colored: bool,
) -> Result<Vec<WrittenWordlist>> {
    if let Some(dir) = wordlist_path(prefix, Section::Headers).parent()
        && !dir.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let mut written = Vec::with_capacity(Section::ALL.len());
    for section in Section::ALL {
        let path = wordlist_path(prefix, section);
        let entries = wordlists.entries(section);
        tokio::fs::write(&path, render_wordlist(entries))
            .await
            .with_context(|| format!("failed to write wordlist {}", path.display()))?;
        println!("{}", format_written_line(entries.len(), &path, colored));
        written.push(WrittenWordlist {
            section,
            path,
            count: entries.len(),
        });
    }

    Ok(written)
}
