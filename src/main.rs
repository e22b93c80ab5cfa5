use anyhow::{Context, Result};

mod ai;
mod config;
mod constants;
mod http;
mod logging;
mod output;
mod processor;
mod types;
mod utils;

use crate::ai::{CompletionClient, build_prompt};
use crate::config::{AzureConfig, load_env_file};
use crate::http::{build_api_client, build_scrape_client};
use crate::output::{MarkerMatch, format_info_line, save_wordlists, split_sections};
use crate::processor::scrape_urls;
use crate::types::ScrapeLists;
use crate::utils::{parse_arguments, read_url_file, report_usage_error};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let invocation = match parse_arguments(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => {
            report_usage_error(&err)?;
            std::process::exit(err.exit_code());
        }
    };
    let cli = &invocation.cli;
    let colored = !cli.no_color;
    logging::init_logging(cli.verbose);

    // Settings are checked up front so a missing credential fails before any network use
    load_env_file(cli.env_file.as_deref())?;
    let config = AzureConfig::from_env()?;
    tracing::debug!(?config, "loaded completion settings");

    let urls = read_url_file(&invocation.input).await?;
    println!(
        "{}",
        format_info_line(
            &format!(
                "Loaded {} URLs from {}",
                urls.len(),
                invocation.input.display()
            ),
            colored
        )
    );

    let scrape_client = build_scrape_client(cli)?;
    let mut lists = ScrapeLists::new();
    scrape_urls(&scrape_client, &urls, &mut lists, colored).await;
    println!(
        "{}",
        format_info_line(
            &format!(
                "Collected {} headers, {} domains, {} endpoints",
                lists.headers.len(),
                lists.domains.len(),
                lists.endpoints.len()
            ),
            colored
        )
    );

    let prompt = build_prompt(&lists);
    println!(
        "{}",
        format_info_line(
            &format!("Requesting wordlists from deployment {}", config.deployment),
            colored
        )
    );
    let completion = CompletionClient::new(build_api_client()?, &config)
        .complete(&prompt)
        .await
        .context("wordlist generation failed")?;

    let matching = if cli.tolerant_markers {
        MarkerMatch::Tolerant
    } else {
        MarkerMatch::Exact
    };
    let wordlists = split_sections(&completion, matching);
    for written in save_wordlists(&wordlists, invocation.output_prefix(), colored).await? {
        tracing::debug!(
            section = ?written.section,
            path = %written.path.display(),
            count = written.count,
            "wordlist saved"
        );
    }

    Ok(())
}
