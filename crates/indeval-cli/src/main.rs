mod atomic;
mod config;
mod logging;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use indeval_client::{ClientError, RestClient, fetch_schema};
use indeval_core::{IndSet, split_maximal};
use indeval_eval::{
    EvalError, MetricsDocument, ReferenceSet, evaluate, filter_scorable, render_found,
    render_report,
};
use indeval_schema::{ShapeError, parse_schema_document};
use thiserror::Error;

use atomic::write_bytes_atomic;
use config::{ConfigError, Settings, load_settings};
use logging::{LogFormat, init_logging};

#[derive(Debug, Error)]
enum CliError {
    #[error("loading config: {0}")]
    Config(#[from] ConfigError),
    #[error("reading {what} {}: {source}", .path.display())]
    ReadFile {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("writing {what} {}: {source}", .path.display())]
    WriteFile {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("getting schema: {0}")]
    Client(#[from] ClientError),
    #[error("parsing schema data: {0}")]
    Schema(#[from] ShapeError),
    #[error("splitting maximal inclusion dependencies: {0}")]
    Split(#[from] indeval_core::Error),
    #[error("comparing with reference INDs: {0}")]
    Compare(#[from] EvalError),
    #[error("encoding metrics: {0}")]
    Metrics(EvalError),
    #[error("writing report: {0}")]
    Output(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "indeval",
    version,
    about = "Score discovered inclusion dependencies against a reference list"
)]
struct Cli {
    /// File containing the reference INDs to compare with.
    #[arg(short = 'i', long = "inds", value_name = "FILE")]
    inds: PathBuf,
    /// Schema document to parse instead of asking the extraction service.
    #[arg(short = 's', long, value_name = "FILE")]
    schema: Option<PathBuf>,
    /// Extraction config sent to the service.
    #[arg(
        short = 'd',
        long = "db-config",
        value_name = "FILE",
        required_unless_present = "schema"
    )]
    db_config: Option<PathBuf>,
    /// Base URL of the extraction service.
    #[arg(short = 'u', long)]
    url: Option<String>,
    /// Write the fetched schema document to --schema-out.
    #[arg(short = 'w', long = "write-schema", default_value_t = false)]
    write_schema: bool,
    #[arg(long, default_value = "schema.json")]
    schema_out: PathBuf,
    /// Print the discovered INDs before the statistics.
    #[arg(short = 'p', long = "print-found", default_value_t = false)]
    print_found: bool,
    /// Optional output path for metrics.json.
    #[arg(long, value_name = "FILE")]
    metrics_out: Option<PathBuf>,
    /// TOML settings file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[arg(long)]
    poll_interval_ms: Option<u64>,
    /// Give up waiting for the extraction job after this many seconds.
    #[arg(long)]
    max_wait_secs: Option<u64>,
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_format) {
        eprintln!("Error initializing logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let timer = Instant::now();
    let mut settings = load_settings(cli.config.as_deref())?;
    apply_overrides(&mut settings, &cli);

    tracing::info!(event = "run_started");

    let schema = match (&cli.schema, &cli.db_config) {
        (Some(path), _) => read_file("schema file", path)?,
        (None, None) => {
            return Err(CliError::InvalidConfig(
                "either --schema or --db-config is required".to_string(),
            ));
        }
        (None, Some(config_path)) => {
            let config = read_file("database configuration file", config_path)?;
            let schema = fetch_from_service(config, &settings).await?;
            if cli.write_schema {
                write_bytes_atomic(&cli.schema_out, &schema).map_err(|source| {
                    CliError::WriteFile {
                        what: "schema file",
                        path: cli.schema_out.clone(),
                        source,
                    }
                })?;
                tracing::info!(event = "schema_written", path = %cli.schema_out.display());
            }
            schema
        }
    };

    let mut inds = IndSet::new();
    let summary = parse_schema_document(&schema, &mut inds)?;
    let split = split_maximal(&mut inds)?;
    let scorable = filter_scorable(&inds);

    let reference = ReferenceSet::load(&cli.inds)?;
    let evaluation = evaluate(&scorable, &reference);

    let mut out = io::stdout().lock();
    if cli.print_found {
        writeln!(out, "\n{}", render_found(&scorable))?;
    }
    writeln!(out, "\n{}\n", render_report(&evaluation))?;
    out.flush()?;

    if let Some(path) = &cli.metrics_out {
        let document = MetricsDocument::new(&evaluation, Some(summary), Some(split));
        let encoded = document.to_json_pretty().map_err(CliError::Metrics)?;
        write_bytes_atomic(path, &encoded).map_err(|source| {
            CliError::WriteFile {
                what: "metrics file",
                path: path.clone(),
                source,
            }
        })?;
        tracing::info!(event = "metrics_written", path = %path.display());
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(())
}

fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(url) = &cli.url {
        settings.server.url = url.clone();
    }
    if let Some(interval_ms) = cli.poll_interval_ms {
        settings.polling.interval_ms = interval_ms;
    }
    if let Some(max_wait_secs) = cli.max_wait_secs {
        settings.polling.max_wait_secs = max_wait_secs;
    }
}

async fn fetch_from_service(config: Vec<u8>, settings: &Settings) -> Result<Vec<u8>, CliError> {
    let client = RestClient::new(&settings.server.url, settings.request_timeout())?;
    tracing::info!(event = "extraction_started", url = %client.base_url());

    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    Ok(fetch_schema(&client, config, &settings.poll_options(), cancel).await?)
}

fn read_file(what: &'static str, path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::ReadFile {
        what,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn schema_flag_makes_db_config_optional() {
        let cli = Cli::try_parse_from(["indeval", "-i", "inds.txt", "-s", "schema.json"]).unwrap();
        assert_eq!(cli.schema, Some(PathBuf::from("schema.json")));
        assert!(cli.db_config.is_none());

        assert!(Cli::try_parse_from(["indeval", "-i", "inds.txt"]).is_err());
        assert!(Cli::try_parse_from(["indeval", "-s", "schema.json"]).is_err());
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::try_parse_from([
            "indeval",
            "-i",
            "inds.txt",
            "-d",
            "db.json",
            "-u",
            "http://extractor:9000",
            "--poll-interval-ms",
            "250",
            "--max-wait-secs",
            "60",
        ])
        .unwrap();

        let mut settings = Settings::default();
        apply_overrides(&mut settings, &cli);
        assert_eq!(settings.server.url, "http://extractor:9000");

        let options = settings.poll_options();
        assert_eq!(options.interval, Duration::from_millis(250));
        assert_eq!(options.max_wait, Some(Duration::from_secs(60)));
    }

    #[test]
    fn stage_errors_name_the_stage() {
        let err = CliError::from(ShapeError::EmptySchemaObject);
        assert_eq!(err.to_string(), "parsing schema data: schema object is empty");

        let err = read_file("schema file", Path::new("missing/schema.json")).unwrap_err();
        assert!(err.to_string().starts_with("reading schema file missing/schema.json"));
    }
}
