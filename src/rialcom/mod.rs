mod extractor;
mod sink;

pub use extractor::{InternetTariffs, TvTariffs};
pub use sink::{sink_for, CsvSink, JsonSink, XlsxSink, COLUMNS};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TariffRecord {
    /// Plan label with the market segment suffix appended.
    pub name: String,
    /// Only TV plans whose label names a channel count carry one.
    pub channels: Option<u32>,
    pub speed_mbps: u64,
    pub price: u64,
}

impl fmt::Display for TariffRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(channels) = self.channels {
            write!(f, " Channels: {}", channels)?;
        }
        write!(f, " Speed: {} Price: {}", self.speed_mbps, self.price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TariffKind {
    Internet,
    Tv,
}

impl fmt::Display for TariffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TariffKind::Internet => write!(f, "internet"),
            TariffKind::Tv => write!(f, "TV"),
        }
    }
}
