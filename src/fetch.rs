use crate::{config::FetchConfig, error::FetchError};
use tracing::debug;

/// Downloads the tariff page in a single attempt.
///
/// No timeout and no retry. Any transport failure or non-2xx status is
/// returned as [`FetchError`].
pub async fn fetch_page(config: &FetchConfig) -> Result<String, FetchError> {
    let request_error = |source: reqwest::Error| FetchError::Request {
        url: config.url.clone(),
        source,
    };

    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(request_error)?;

    debug!("Visit {}", config.url);
    let response = client
        .get(config.url.as_str())
        .send()
        .await
        .map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: config.url.clone(),
            status,
        });
    }

    response.text().await.map_err(request_error)
}
