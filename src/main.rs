use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use kundali_core::{BirthInput, Kundali, KundaliConfig, ReportContext};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Compute a sidereal birth chart and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "kundali", version, about)]
struct Cli {
    /// Local civil date of birth, YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// Local civil time of birth, HH:MM or HH:MM:SS
    #[arg(long)]
    time: String,
    /// UTC offset in hours, e.g. 5.5 or -3.5
    #[arg(long, allow_hyphen_values = true)]
    offset: f64,
    /// Geographic latitude, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Geographic longitude, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// TOML configuration file; falls back to $KUNDALI_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pin "now" for the current dasha (RFC 3339)
    #[arg(long)]
    now: Option<String>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
    /// Emit the report context (settings and readings) instead of the bare chart
    #[arg(long)]
    report: bool,
    /// Log as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn parse_date(value: &str) -> Result<(i32, u32, u32)> {
    let parts: Vec<&str> = value.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        bail!("expected YYYY-MM-DD, got {:?}", value);
    };
    Ok((
        year.parse().with_context(|| format!("bad year in {:?}", value))?,
        month.parse().with_context(|| format!("bad month in {:?}", value))?,
        day.parse().with_context(|| format!("bad day in {:?}", value))?,
    ))
}

fn parse_time(value: &str) -> Result<(u32, u32, u32)> {
    let parts: Vec<&str> = value.split(':').collect();
    let (hour, minute, second) = match parts.as_slice() {
        [hour, minute] => (*hour, *minute, "0"),
        [hour, minute, second] => (*hour, *minute, *second),
        _ => bail!("expected HH:MM or HH:MM:SS, got {:?}", value),
    };
    Ok((
        hour.parse().with_context(|| format!("bad hour in {:?}", value))?,
        minute.parse().with_context(|| format!("bad minute in {:?}", value))?,
        second.parse().with_context(|| format!("bad second in {:?}", value))?,
    ))
}

fn load_config(path: Option<&PathBuf>) -> Result<KundaliConfig> {
    match path {
        Some(path) => KundaliConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => KundaliConfig::from_env().context("loading config from environment"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = load_config(cli.config.as_ref())?;
    debug!(model = ?config.ephemeris.model, "loaded config");

    let (year, month, day) = parse_date(&cli.date)?;
    let (hour, minute, second) = parse_time(&cli.time)?;
    let input = BirthInput::new(
        year, month, day, hour, minute, second, cli.offset, cli.lat, cli.lon,
    )
    .context("invalid birth data")?;

    let now = match &cli.now {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .with_context(|| format!("bad --now timestamp {:?}", value))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let engine = Kundali::new(config);
    let chart = engine
        .compute_chart_at(&input, now)
        .context("chart computation failed")?;

    let output = if cli.report {
        let context = ReportContext::new(&chart, &engine.config().report);
        to_json(&context, cli.pretty)?
    } else {
        to_json(&chart, cli.pretty)?
    };
    println!("{}", output);
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
