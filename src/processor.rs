use anyhow::{Result, anyhow};
use reqwest::Client;

use crate::constants::SCRAPE_SCHEME;
use crate::http::header_records;
use crate::output::format_skip_line;
use crate::types::{HeaderRecord, ScrapeLists};
use crate::utils::{request_target, split_url};

/// Collect domains, endpoints and response headers from every URL, in order.
///
/// Domains and endpoints are recorded before any request is made, so a URL
/// that cannot be reached still contributes them. Request failures are
/// reported and the remaining URLs are processed.
pub async fn scrape_urls(client: &Client, urls: &[String], lists: &mut ScrapeLists, colored: bool) {
    scrape_urls_over(client, SCRAPE_SCHEME, urls, lists, colored).await
}

/// Same as [`scrape_urls`], but requests go out over `scheme` whatever the
/// input URL says
async fn scrape_urls_over(
    client: &Client,
    scheme: &str,
    urls: &[String],
    lists: &mut ScrapeLists,
    colored: bool,
) {
    for url in urls {
        let parts = split_url(url);
        tracing::debug!(
            url = %url,
            scheme = parts.scheme,
            netloc = parts.netloc,
            path = parts.path,
            query = parts.query,
            fragment = parts.fragment,
            "split url"
        );
        lists.add_domain(parts.netloc);
        lists.add_endpoint(parts.path);

        match fetch_headers(client, scheme, parts.netloc, parts.path).await {
            Ok(headers) => {
                let received = headers.len();
                let mut added = 0;
                for header in headers {
                    if lists.add_header(header) {
                        added += 1;
                    }
                }
                tracing::debug!(url = %url, received, added, "collected response headers");
            }
            Err(err) => {
                tracing::debug!(url = %url, error = ?err, "request failed");
                println!("{}", format_skip_line(url, &format!("{:#}", err), colored));
            }
        }
    }
}

/// Send a single GET to the URL's host and path and return the response headers
async fn fetch_headers(
    client: &Client,
    scheme: &str,
    netloc: &str,
    path: &str,
) -> Result<Vec<HeaderRecord>> {
    let target =
        request_target(scheme, netloc, path).ok_or_else(|| anyhow!("no host to connect to"))?;
    tracing::debug!(request = %target, "requesting headers");

    let response = client.get(&target).send().await?;
    // The body is never read; dropping the response closes the connection.
    Ok(header_records(response.headers()))
}
