//! Runs the whole harvest: one element at a time, in list order.

use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::dataset::{ElementDataset, write_dataset};
use crate::element_scraper::{ANCHOR_CLASS, parse_page, scrape_entries};
use crate::error::{ElementFailure, HarvestError, Result};
use crate::scraping_context::ScrapingContext;

#[derive(Debug)]
pub struct WrittenElement {
    pub element: String,
    pub path: PathBuf,
    pub entries: usize,
}

/// Outcome of a full run. Failed elements have no file written for them.
#[derive(Debug, Default)]
pub struct HarvestSummary {
    pub written: Vec<WrittenElement>,
    pub failures: Vec<ElementFailure>,
}

impl HarvestSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn report(&self) -> String {
        let mut report = format!(
            "{} element(s) written, {} failed",
            self.written.len(),
            self.failures.len()
        );
        for failure in &self.failures {
            report.push_str("\n  ");
            report.push_str(&failure.to_string());
        }
        report
    }
}

/// Fetches and parses one element's listing page. Nothing is written.
pub async fn scrape_element(context: &ScrapingContext, element: &str) -> Result<ElementDataset> {
    let url = context
        .config
        .listing_url(element)
        .map_err(|source| HarvestError::InvalidUrl {
            input: element.to_string(),
            source,
        })?;
    debug!("fetching {url}");
    let body = context.request_client.fetch_url_body(&url).await?;

    let document = parse_page(&body);
    let entries = scrape_entries(&document, &context.config.upf_root)?;
    debug!("{element}: found {} anchors", entries.len());

    let dataset = ElementDataset::from_entries(entries);
    if dataset.is_empty() {
        warn!("{element}: no a.{ANCHOR_CLASS} anchors on {url}");
    }
    Ok(dataset)
}

pub async fn harvest_element(context: &ScrapingContext, element: &str) -> Result<WrittenElement> {
    let dataset = scrape_element(context, element).await?;
    let path = write_dataset(&context.config.output_dir, element, &dataset)?;
    Ok(WrittenElement {
        element: element.to_string(),
        path,
        entries: dataset.len(),
    })
}

/// Harvests every configured element. A failing element is recorded and the
/// run moves on to the next one.
pub async fn run(context: &ScrapingContext) -> HarvestSummary {
    let elements = &context.config.elements;
    info!(
        "harvesting {} element(s) into {}",
        elements.len(),
        context.config.output_dir.display()
    );

    let mut summary = HarvestSummary::default();
    for element in elements {
        match harvest_element(context, element).await {
            Ok(written) => {
                info!(
                    "{element}: wrote {} entries to {}",
                    written.entries,
                    written.path.display()
                );
                summary.written.push(written);
            }
            Err(e) => {
                error!("{element}: {e}");
                summary.failures.push(ElementFailure {
                    element: element.clone(),
                    error: e,
                });
            }
        }
    }

    info!(
        "done: {} written, {} failed",
        summary.written.len(),
        summary.failures.len()
    );
    summary
}
