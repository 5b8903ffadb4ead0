use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned {status}")]
    Status { url: String, status: StatusCode },
}

#[derive(Debug, thiserror::Error)]
pub enum TariffError {
    #[error("Failed to fetch tariff page")]
    Fetch(#[from] FetchError),
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error("Spreadsheet error")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("CSV error")]
    Csv(#[from] csv::Error),
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}
