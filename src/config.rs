use std::{fmt, path::PathBuf, str::FromStr};

pub const DEFAULT_URL: &str = "https://www.rialcom.ru/internet_tariffs/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/114.0.5735.199 Safari/537.36";
pub const DEFAULT_OUTPUT: &str = "tariffs.xlsx";

/// Residential market segment.
pub const RESIDENTIAL_SUFFIX: &str = "_м";
/// Corporate (legal entity) market segment.
pub const CORPORATE_SUFFIX: &str = "_ч";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub url: String,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            url: DEFAULT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A collapsible block of the tariff page and the suffix appended to every
/// plan name found inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub suffix: String,
}

impl Section {
    pub fn new(id: impl Into<String>, suffix: impl Into<String>) -> Self {
        Section {
            id: id.into(),
            suffix: suffix.into(),
        }
    }

    pub fn defaults() -> Vec<Section> {
        vec![
            Section::new("collapse1", RESIDENTIAL_SUFFIX),
            Section::new("collapse2", CORPORATE_SUFFIX),
        ]
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id, self.suffix)
    }
}

impl FromStr for Section {
    type Err = String;

    /// Parses `ID=SUFFIX`. The suffix may be empty, the id may not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((id, suffix)) if !id.trim().is_empty() => Ok(Section::new(id.trim(), suffix)),
            _ => Err(format!("invalid section `{s}`, expected ID=SUFFIX")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub fetch: FetchConfig,
    pub sections: Vec<Section>,
    pub output: PathBuf,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fetch: FetchConfig::default(),
            sections: Section::defaults(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: OutputFormat::default(),
        }
    }
}
