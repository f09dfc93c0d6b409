mod export;
mod report;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use catalog::envelope::ErrorBody;
use catalog::{ItemResponse, ListResponse};
use clap::{Args, Parser, Subcommand};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("pass a station acronym or --all")]
    MissingStation,
    #[error("station {0} not found")]
    StationNotFound(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("server returned HTTP {status} for {path}: {message}")]
    Status { status: u16, path: String, message: String },
    #[error("unexpected {0} payload")]
    InvalidPayload(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

#[derive(Parser, Debug)]
#[command(name = "spectral-cli", about = "SITES Spectral catalog export and report tool")]
struct Cli {
    #[arg(long, env = "SPECTRAL_BASE_URL", default_value = "http://127.0.0.1:8787")]
    base_url: String,

    /// Bearer token; public stations export without one.
    #[arg(long, env = "SPECTRAL_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List station acronyms.
    Stations,
    /// Export a station tree (platforms, instruments, ROIs) to JSON.
    Export(ExportArgs),
    /// Compare an export file with the live station and its platforms.
    Diff(DiffArgs),
    /// Platform, instrument and ROI totals per station, plus instruments by type.
    Summary,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Station acronym, e.g. SVB or ANS.
    station: Option<String>,

    /// Output file for a single-station export.
    #[arg(short, long, conflicts_with = "all")]
    output: Option<PathBuf>,

    /// Export every station to its own file.
    #[arg(long)]
    all: bool,

    #[arg(long, default_value = "./exports", requires = "all")]
    output_dir: PathBuf,
}

#[derive(Args, Debug)]
struct DiffArgs {
    /// Station acronym the file was exported from.
    station: String,

    /// Export file written by `export`.
    file: PathBuf,
}

/// Station row plus its platforms, instruments and ROIs keyed by instrument id.
type StationTree = (Value, Vec<Value>, Vec<Value>, HashMap<i64, Vec<Value>>);

struct CatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl CatalogClient {
    fn new(base_url: &str, token: Option<&str>) -> Result<Self, CliError> {
        let base_url = normalize_base_url(base_url)?;
        let mut headers = HeaderMap::new();
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        }
        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { base_url, http })
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Option<String>, CliError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.text().map(ToOwned::to_owned))
                .unwrap_or(body);
            return Err(CliError::Status {
                status: status.as_u16(),
                path: path.to_owned(),
                message,
            });
        }
        Ok(Some(body))
    }

    async fn list(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<Value>, CliError> {
        match self.get(path, query).await? {
            Some(body) => Ok(serde_json::from_str::<ListResponse<Value>>(&body)?.into_items()),
            None => Ok(Vec::new()),
        }
    }

    async fn station(&self, acronym: &str) -> Result<Value, CliError> {
        let body = self
            .get(&format!("/api/stations/{}", encode_component(acronym)), &[])
            .await?
            .ok_or_else(|| CliError::StationNotFound(acronym.to_owned()))?;
        Ok(serde_json::from_str::<ItemResponse<Value>>(&body)?.into_inner())
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let client = CatalogClient::new(&cli.base_url, cli.token.as_deref())?;

    match cli.command {
        Command::Stations => run_stations(&client).await,
        Command::Export(args) => run_export(&client, args).await,
        Command::Diff(args) => run_diff(&client, &args).await,
        Command::Summary => run_summary(&client).await,
    }
}

async fn run_stations(client: &CatalogClient) -> Result<(), CliError> {
    let stations = client.list("/api/stations", &[]).await?;
    for acronym in export::station_acronyms(&stations) {
        println!("{acronym}");
    }
    Ok(())
}

async fn run_export(client: &CatalogClient, args: ExportArgs) -> Result<(), CliError> {
    if args.all {
        return export_all(client, &args.output_dir).await;
    }
    let acronym = args
        .station
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .ok_or(CliError::MissingStation)?;
    let output = args
        .output
        .unwrap_or_else(|| export::default_file_name(Path::new("."), &acronym));
    export_station(client, &acronym, &output).await?;
    Ok(())
}

async fn export_all(client: &CatalogClient, output_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(output_dir)?;
    let stations = client.list("/api/stations", &[]).await?;
    let acronyms = export::station_acronyms(&stations);
    for acronym in &acronyms {
        export_station(client, acronym, &export::default_file_name(output_dir, acronym)).await?;
    }
    println!("\nExported {} stations to {}", acronyms.len(), output_dir.display());
    Ok(())
}

async fn fetch_tree(client: &CatalogClient, acronym: &str) -> Result<StationTree, CliError> {
    let station = client.station(acronym).await?;
    let platforms = client.list("/api/platforms", &[("station", acronym)]).await?;
    let instruments = client.list("/api/instruments", &[("station", acronym)]).await?;

    let mut rois = HashMap::new();
    for instrument in &instruments {
        let Some(id) = export::row_id(instrument, "id") else {
            continue;
        };
        let rows = client.list(&format!("/api/instruments/{id}/rois"), &[]).await?;
        rois.insert(id, rows);
    }
    Ok((station, platforms, instruments, rois))
}

async fn export_station(client: &CatalogClient, acronym: &str, output: &Path) -> Result<export::ExportCounts, CliError> {
    let (station, platforms, instruments, rois) = fetch_tree(client, acronym).await?;
    println!("Exporting station: {}", export::station_label(&station, acronym));
    println!("  Found {} platforms", platforms.len());

    let (mut document, counts) = export::nest_station(station, platforms, instruments, rois)?;
    println!("  Found {} instruments", counts.instruments);
    println!("  Found {} ROIs", counts.rois);

    let exported_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
    export::stamp(&mut document, counts, &exported_at);
    let rendered = serde_json::to_string_pretty(&document)?;
    std::fs::write(output, rendered)?;
    println!("  Exported to: {}", output.display());
    Ok(counts)
}

async fn run_diff(client: &CatalogClient, args: &DiffArgs) -> Result<(), CliError> {
    let acronym = args.station.trim().to_uppercase();
    if acronym.is_empty() {
        return Err(CliError::MissingStation);
    }
    let local: Value = serde_json::from_str(&std::fs::read_to_string(&args.file)?)?;
    let station = client.station(&acronym).await?;
    let platforms = client.list("/api/platforms", &[("station", acronym.as_str())]).await?;

    println!("\nDifferences for {acronym}:");
    for line in report::diff_station(&local, &station, &platforms).lines() {
        println!("{line}");
    }
    Ok(())
}

async fn run_summary(client: &CatalogClient) -> Result<(), CliError> {
    let stations = client.list("/api/stations", &[]).await?;
    let mut rows = Vec::new();
    let mut all_instruments = Vec::new();
    for acronym in export::station_acronyms(&stations) {
        let (station, platforms, instruments, rois) = fetch_tree(client, &acronym).await?;
        all_instruments.extend(instruments.iter().cloned());
        let (_, counts) = export::nest_station(station.clone(), platforms, instruments, rois)?;
        rows.push(report::StationSummary::new(&station, &acronym, counts));
    }

    for line in report::summary_table(&rows) {
        println!("{line}");
    }
    println!();
    for line in report::type_table(&report::instruments_by_type(&all_instruments)) {
        println!("{line}");
    }
    Ok(())
}

/// Percent-encode one path segment; unreserved ASCII passes through.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn normalize_base_url(raw: &str) -> Result<String, CliError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| CliError::InvalidBaseUrl(raw.to_owned()))?;
    if host.is_empty() {
        return Err(CliError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;
