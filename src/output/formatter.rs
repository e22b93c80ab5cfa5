use colored::*;
use std::fmt::Display;
use std::path::Path;

/// Format the line printed when a URL could not be requested
pub fn format_skip_line(url: &str, error: &dyn Display, colored: bool) -> String {
    if colored {
        format!("{} Skipping {}: {}", "[-]".red(), url.cyan(), error)
    } else {
        format!("[-] Skipping {}: {}", url, error)
    }
}

/// Format the line printed after a wordlist file has been written
pub fn format_written_line(count: usize, path: &Path, colored: bool) -> String {
    if colored {
        format!(
            "{} Wrote {} entries to {}",
            "[+]".green(),
            count,
            path.display().to_string().cyan()
        )
    } else {
        format!("[+] Wrote {} entries to {}", count, path.display())
    }
}

/// Format a progress line for pipeline stages
pub fn format_info_line(message: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "[*]".yellow(), message)
    } else {
        format!("[*] {}", message)
    }
}
