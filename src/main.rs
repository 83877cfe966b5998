use std::io::Read;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use coin_forecast::config::Config;
use coin_forecast::forecast::{ForecastBundle, ForecastEngine};
use coin_forecast::model::{MarketChart, MarketColumn, Series};

const USAGE: &str = "usage: coin-forecast [--column prices|market_caps|total_volumes|all] \
                     [MARKET_CHART_JSON | -]";

/// Which market-chart columns to forecast.
enum Selection {
    One(MarketColumn),
    All,
}

struct Args {
    source: String,
    selection: Selection,
}

#[derive(Serialize)]
struct ColumnForecast {
    column: MarketColumn,
    bundle: ForecastBundle,
}

fn main() -> Result<()> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if raw.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return Ok(());
    }
    let args = parse_args(raw)?;

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    // Logs go to stderr so stdout carries only the bundle
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::try_new(&config.logging.level)
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            }),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .json()
        .init();

    let engine = ForecastEngine::new(config.forecast).context("invalid forecast config")?;
    let source = args.source.as_str();
    let json = read_input(source)?;
    let chart = MarketChart::from_json(&json)
        .with_context(|| format!("failed to parse market chart from {source}"))?;

    let out = match args.selection {
        Selection::One(column) => {
            let series = chart.series(column)?;
            log_series(&engine, source, column, &series);
            serde_json::to_string_pretty(&engine.run(&series))
        }
        Selection::All => {
            let inputs = chart.columns();
            for (column, series) in &inputs {
                log_series(&engine, source, *column, series);
            }
            let bundles = engine.run_batch(&inputs);
            let forecasts: Vec<ColumnForecast> = inputs
                .into_iter()
                .zip(bundles)
                .map(|((column, _), bundle)| ColumnForecast { column, bundle })
                .collect();
            serde_json::to_string_pretty(&forecasts)
        }
    }
    .context("failed to serialize forecast")?;
    println!("{out}");
    Ok(())
}

fn parse_args(raw: Vec<String>) -> Result<Args> {
    let mut source = None;
    let mut selection = Selection::One(MarketColumn::Prices);
    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--column" {
            let Some(value) = iter.next() else {
                bail!("--column needs a value\n{USAGE}");
            };
            selection = match value.as_str() {
                "all" => Selection::All,
                name => Selection::One(name.parse()?),
            };
        } else if source.is_none() {
            source = Some(arg);
        } else {
            bail!("unexpected argument '{arg}'\n{USAGE}");
        }
    }
    Ok(Args {
        source: source.unwrap_or_else(|| "-".to_string()),
        selection,
    })
}

fn log_series(engine: &ForecastEngine, source: &str, column: MarketColumn, series: &Series) {
    if !series.is_chronological() {
        tracing::warn!(
            %column,
            n = series.len(),
            "Observations are not in strictly ascending timestamp order"
        );
    }
    tracing::info!(
        source,
        %column,
        n = series.len(),
        from = ?series.first().and_then(|o| o.datetime()),
        to = ?series.last().and_then(|o| o.datetime()),
        horizon = engine.config().horizon,
        "Running forecast"
    );
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
}
