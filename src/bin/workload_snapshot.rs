use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::info;
use workload_rs::api::{InMemoryDirectory, WorkloadConfig, WorkloadEngine};
use workload_rs::render::{NullRenderer, Renderer};
use workload_rs::telemetry;

const USAGE: &str = "usage: workload_snapshot --input <fixture.json> [--output <chart.json>]";

#[derive(Debug, Deserialize)]
struct SnapshotFixture {
    config: WorkloadConfig,
    #[serde(default)]
    directory: InMemoryDirectory,
}

#[derive(Debug)]
struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let fixture: SnapshotFixture =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
    fixture
        .directory
        .validate()
        .map_err(|err| format!("invalid fixture: {err}"))?;

    let engine = WorkloadEngine::new(fixture.config).map_err(|err| err.to_string())?;
    let chart = engine
        .build(&fixture.directory)
        .map_err(|err| err.to_string())?;

    let mut renderer = NullRenderer::default();
    renderer.render(&chart).map_err(|err| err.to_string())?;
    info!(
        rows = renderer.last_row_count,
        buckets = renderer.last_bucket_count,
        displayed = renderer.last_displayed_count,
        truncated = chart.truncated,
        "chart snapshot ready"
    );

    let json = chart.to_json_pretty().map_err(|err| err.to_string())?;
    match args.output {
        Some(path) => fs::write(&path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<Args, String> {
    let mut input = None;
    let mut output = None;
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--input" => {
                input = Some(PathBuf::from(
                    iter.next().ok_or_else(|| "missing value for --input".to_owned())?,
                ));
            }
            "--output" => {
                output = Some(PathBuf::from(
                    iter.next().ok_or_else(|| "missing value for --output".to_owned())?,
                ));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(Args {
        input: input.ok_or_else(|| USAGE.to_owned())?,
        output,
    })
}
