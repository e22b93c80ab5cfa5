use anyhow::{Context, Result};
use std::path::Path;

/// Read URLs from a file, one per line, skipping blank lines
pub async fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read URL file {}", path.display()))?;
    Ok(parse_url_lines(&content))
}

pub fn parse_url_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
