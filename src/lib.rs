//! Harvests the pseudopotential library listing, one JSON file per element.
//!
//! For each element the listing page is fetched, every `a.element_anchor` is
//! read together with the metadata that follows it, and the resulting
//! label -> `{href, meta}` map is written to `<output_dir>/<element>.json`.

pub mod config;
pub mod dataset;
pub mod element_scraper;
pub mod elements;
pub mod error;
pub mod harvester;
pub mod node;
pub mod requests;
pub mod scraping_context;
pub mod text_manipulators;

pub use config::HarvestConfig;
pub use dataset::{ElementDataset, EntryRecord, PseudopotentialEntry};
pub use error::{ElementFailure, HarvestError};
pub use harvester::{HarvestSummary, run};
pub use scraping_context::ScrapingContext;
