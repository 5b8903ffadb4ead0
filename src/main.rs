use clap::Parser;
use rialcom_tariffs::{
    Config, FetchConfig, OutputFormat, Section, TariffError, DEFAULT_OUTPUT, DEFAULT_URL,
    DEFAULT_USER_AGENT,
};
use std::{path::PathBuf, process::ExitCode};
use tracing::error;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Scrape the Rialcom tariff page into a spreadsheet.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Tariff page to download
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// User-Agent header sent with the request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Section to read, as ID=SUFFIX; repeat for several.
    /// Defaults to collapse1=_м and collapse2=_ч
    #[arg(long = "section", value_name = "ID=SUFFIX")]
    sections: Vec<Section>,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Xlsx)]
    format: OutputFormat,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let sections = if args.sections.is_empty() {
            Section::defaults()
        } else {
            args.sections
        };
        Config {
            fetch: FetchConfig {
                url: args.url,
                user_agent: args.user_agent,
            },
            sections,
            output: args.output,
            format: args.format,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let config = Config::from(Args::parse());

    match rialcom_tariffs::run(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(TariffError::Fetch(e)) => {
            error!("Failed to get the tariff page: {}", report(&e));
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Failed to save tariffs: {}", report(&e));
            ExitCode::FAILURE
        }
    }
}

/// Error message followed by its chain of causes.
fn report(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
