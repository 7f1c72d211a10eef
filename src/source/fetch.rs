// src/source/fetch.rs
use crate::source::models::PdfLink;
use crate::utils::error::FetchError;
use once_cell::sync::Lazy;
use reqwest::{header, Url};
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};
use std::time::Duration;

const USER_AGENT: &str = concat!("budget_extractor/", env!("CARGO_PKG_VERSION"));
// Be polite to the ministry's server; downloads run one at a time.
const REQUEST_DELAY_MS: u64 = 500;

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Failed to compile LINK_SELECTOR"));

fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(120))
        .build()
}

/// Collects every link on the page whose href mentions `.pdf`, resolved
/// against `base`. Duplicates keep their first position.
pub fn find_pdf_links(html: &str, base: &Url) -> Vec<PdfLink> {
    let document = Html::parse_document(html);
    let mut links: Vec<PdfLink> = Vec::new();

    for element in document.select(&LINK_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.to_lowercase().contains(".pdf") {
            continue;
        }
        match base.join(href.trim()) {
            Ok(url) => {
                let link = PdfLink { url: url.to_string() };
                if !links.contains(&link) {
                    links.push(link);
                }
            }
            Err(e) => tracing::warn!("Skipping unparseable link '{}': {}", href, e),
        }
    }

    links
}

async fn get(client: &reqwest::Client, url: &str) -> Result<reqwest::Response, FetchError> {
    tokio::time::sleep(Duration::from_millis(REQUEST_DELAY_MS)).await;

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/pdf,*/*")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        return Err(FetchError::Http(status, url.to_string()));
    }
    Ok(response)
}

/// Lists the PDFs linked from an archive page.
pub async fn list_pdf_links(page_url: &str) -> Result<Vec<PdfLink>, FetchError> {
    let base = Url::parse(page_url)
        .map_err(|e| FetchError::InvalidUrl(page_url.to_string(), e.to_string()))?;
    let client = build_client()?;

    tracing::info!("Fetching archive page: {}", page_url);
    let body = get(&client, page_url).await?.text().await?;
    let links = find_pdf_links(&body, &base);
    tracing::info!("Found {} PDF URLs on the page", links.len());
    Ok(links)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    pub downloaded: usize,
    pub existing: usize,
    pub failed: usize,
}

/// Downloads every PDF linked from `page_url` into `target_dir`. Files that
/// already exist are left alone; a failed download is logged and counted.
pub async fn download_archive(page_url: &str, target_dir: &Path) -> Result<FetchSummary, FetchError> {
    std::fs::create_dir_all(target_dir)?;
    let links = list_pdf_links(page_url).await?;
    let client = build_client()?;
    let mut summary = FetchSummary::default();

    for link in links {
        let Some(name) = link.file_name() else {
            tracing::warn!("No file name in URL {}, skipping", link.url);
            continue;
        };
        let path = target_dir.join(name);
        if path.exists() {
            tracing::debug!("Already present: {}", path.display());
            summary.existing += 1;
            continue;
        }

        match download_pdf(&client, &link.url, &path).await {
            Ok(saved) => {
                tracing::info!("Downloaded PDF from {} to {}", link.url, saved.display());
                summary.downloaded += 1;
            }
            Err(e) => {
                tracing::error!("Failed to download PDF from {}: {}", link.url, e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

async fn download_pdf(client: &reqwest::Client, url: &str, path: &Path) -> Result<PathBuf, FetchError> {
    let bytes = get(client, url).await?.bytes().await?;
    tracing::debug!("Received {} bytes from {}", bytes.len(), url);
    tokio::fs::write(path, &bytes).await?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pdf_links_resolves_relative_urls() {
        let html = r#"
            <html><body>
              <a href="2013/b.06.pdf">B.6</a>
              <a href="/portal/arkib/B10.PDF">B.10</a>
              <a href="https://cdn.example.gov/p45.pdf">P.45</a>
              <a href="exp2012.html">2012</a>
              <a href="2013/b.06.pdf">B.6 again</a>
              <a>no href</a>
            </body></html>
        "#;
        let base = Url::parse("https://www.mof.gov.my/portal/arkib/perbelanjaan/exp2013.html").unwrap();
        let links = find_pdf_links(html, &base);
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.mof.gov.my/portal/arkib/perbelanjaan/2013/b.06.pdf",
                "https://www.mof.gov.my/portal/arkib/B10.PDF",
                "https://cdn.example.gov/p45.pdf",
            ]
        );
    }

    #[test]
    fn test_invalid_page_url_is_reported() {
        let result = tokio_test::block_on(list_pdf_links("not a url"));
        assert!(matches!(result, Err(FetchError::InvalidUrl(_, _))));
    }
}
