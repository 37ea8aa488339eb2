use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{error, info, instrument};
use url::Url;

use crate::config::JobBoardConfig;
use crate::error::{Error, Result};
use crate::models::job_listing::JobListing;

pub const MAX_LISTINGS: usize = 5;

const CONTAINER_SELECTOR: &str = "div.project-item";
const TITLE_SELECTOR: &str = "h2";
const BUDGET_SELECTOR: &str = "span.budget";
const LINK_SELECTOR: &str = "a[href]";

/// Anything that can produce the current job listings.
///
/// Implementations never fail: faults are logged and surface as an empty list.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Vec<JobListing>;
}

#[derive(Clone)]
pub struct JobBoardService {
    client: Client,
    url: String,
    base_url: Url,
}

impl JobBoardService {
    pub fn new(config: &JobBoardConfig) -> Result<Self> {
        Self::with_timeout(&config.url, config.timeout)
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(url)?;
        let base_url = parsed.join("/")?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            base_url,
        })
    }

    /// Fetches and parses the board, propagating every fault.
    pub async fn try_fetch_jobs(&self) -> Result<Vec<JobListing>> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        let body = response.text().await?;
        parse_listings(&body, &self.base_url)
    }
}

#[async_trait]
impl JobSource for JobBoardService {
    #[instrument(skip(self))]
    async fn fetch_jobs(&self) -> Vec<JobListing> {
        match self.try_fetch_jobs().await {
            Ok(jobs) => {
                info!(url = %self.url, count = jobs.len(), "Fetched job listings");
                jobs
            }
            Err(e) => {
                error!(url = %self.url, category = e.category(), error = %e, "Error scraping job board");
                Vec::new()
            }
        }
    }
}

/// Extracts at most [`MAX_LISTINGS`] listings in document order.
///
/// Only the first containers are inspected; a missing or blank field in any of
/// them fails the whole page.
pub fn parse_listings(html: &str, base_url: &Url) -> Result<Vec<JobListing>> {
    let document = Html::parse_document(html);
    let container = selector(CONTAINER_SELECTOR)?;
    let title = selector(TITLE_SELECTOR)?;
    let budget = selector(BUDGET_SELECTOR)?;
    let link = selector(LINK_SELECTOR)?;

    document
        .select(&container)
        .take(MAX_LISTINGS)
        .enumerate()
        .map(|(idx, item)| -> Result<JobListing> {
            let title = field_text(item, &title, "title", idx)?;
            let budget = field_text(item, &budget, "budget", idx)?;
            let href = item
                .select(&link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .ok_or_else(|| Error::Parse(format!("listing {} has no link", idx)))?;
            let link = base_url.join(href)?;
            Ok(JobListing::new(title, budget, link.to_string()))
        })
        .collect()
}

fn selector(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|e| Error::Parse(format!("bad selector `{}`: {}", raw, e)))
}

fn field_text(item: ElementRef<'_>, sel: &Selector, field: &str, idx: usize) -> Result<String> {
    item.select(sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| Error::Parse(format!("listing {} has no {}", idx, field)))
}
