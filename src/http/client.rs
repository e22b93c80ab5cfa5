use anyhow::Result;
use reqwest::{Client, redirect::Policy};
use std::time::Duration;

use crate::types::Cli;

/// Build the HTTP client used to request scraped URLs.
///
/// Each request is a single HTTP/1.1 exchange: redirects are not followed and
/// connections are closed after the response instead of being pooled.
pub fn build_scrape_client(cli: &Cli) -> Result<Client> {
    let timeout = Duration::from_secs(cli.timeout);

    let mut client_builder = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::none())
        .pool_max_idle_per_host(0)
        .http1_only();

    if cli.insecure {
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    Ok(client_builder.build()?)
}

/// Build the HTTP client used for the completion request
pub fn build_api_client() -> Result<Client> {
    Ok(Client::builder().build()?)
}
