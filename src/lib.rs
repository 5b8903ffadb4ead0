use scraper::Html;
use std::path::Path;
use tracing::{info, warn};

pub mod rialcom;

mod config;
mod error;
mod fetch;
mod normalize;

pub use config::{
    Config, FetchConfig, OutputFormat, Section, CORPORATE_SUFFIX, DEFAULT_OUTPUT, DEFAULT_URL,
    DEFAULT_USER_AGENT, RESIDENTIAL_SUFFIX,
};
pub use error::{FetchError, TariffError};
pub use fetch::fetch_page;
pub use normalize::{clean_price, clean_speed, extract_channels};
pub use rialcom::{TariffKind, TariffRecord};

use rialcom::{sink_for, InternetTariffs, TvTariffs};

/// What one extractor found in one section.
///
/// Only `Found` carries records; the other variants say why there were none.
/// Rows too short to hold a tariff are counted in `skipped_rows` and
/// otherwise ignored without logging.
#[derive(Debug, PartialEq, Eq)]
pub enum Extraction {
    Found {
        records: Vec<TariffRecord>,
        skipped_rows: usize,
    },
    SectionNotFound,
    TableNotFound,
    InsufficientTables {
        found: usize,
    },
}

impl Extraction {
    pub fn into_records(self) -> Vec<TariffRecord> {
        match self {
            Extraction::Found { records, .. } => records,
            _ => vec![],
        }
    }
}

pub trait TariffExtractor {
    fn kind(&self) -> TariffKind;
    fn extract(&self, doc: &Html, section: &Section) -> Extraction;
}

pub trait TariffSink {
    fn path(&self) -> &Path;
    fn write(&self, records: &[TariffRecord]) -> Result<(), TariffError>;
}

/// Runs every extractor over every section.
///
/// Order is all internet tariffs (section by section) followed by all TV
/// tariffs. A section or table that cannot be found contributes nothing.
pub fn collect_tariffs(doc: &Html, sections: &[Section]) -> Vec<TariffRecord> {
    let extractors: [&dyn TariffExtractor; 2] = [&InternetTariffs, &TvTariffs];

    let mut tariffs = vec![];
    for extractor in extractors {
        for section in sections {
            let extraction = extractor.extract(doc, section);
            match &extraction {
                Extraction::Found { records, .. } => info!(
                    "Found {} {} tariffs in section {}",
                    records.len(),
                    extractor.kind(),
                    section.id
                ),
                Extraction::SectionNotFound => warn!("Section not found: {}", section.id),
                Extraction::TableNotFound => {
                    warn!("{} tariff table not found in {}", extractor.kind(), section.id)
                }
                Extraction::InsufficientTables { found } => warn!(
                    "{} tariff table not found in {} ({} tables present)",
                    extractor.kind(),
                    section.id,
                    found
                ),
            }
            tariffs.extend(extraction.into_records());
        }
    }
    tariffs
}

/// Fetches the page, extracts every tariff and writes them out.
///
/// Returns the number of records written. Nothing is written when the fetch
/// fails.
pub async fn run(config: &Config) -> Result<usize, TariffError> {
    let html = fetch_page(&config.fetch).await?;

    let tariffs = {
        let doc = Html::parse_document(&html);
        collect_tariffs(&doc, &config.sections)
    };
    info!("Total tariffs found: {}", tariffs.len());

    let sink = sink_for(config.format, &config.output);
    sink.write(&tariffs)?;
    info!("Saved tariffs to {}", sink.path().display());

    Ok(tariffs.len())
}
