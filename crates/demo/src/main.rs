// File: crates/demo/src/main.rs
// Summary: Demo runs the pie widget pipeline (builder data -> fetch -> transform -> Skia) and writes JSON + PNG.
//
// Usage:
//   pie-demo [csv [path]]        local CSV served as a snapshot
//   pie-demo query <id>          Dune query results (DUNE_API_KEY)
//   pie-demo endpoint <url>      custom JSON endpoint
//   pie-demo snapshot <cid>      snapshot from the IPFS gateway
// Log level via --log-level or PIE_LOG (trace|debug|info|warn|error).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use pie_core::{
    ActionKind, ApiRequest, Configurator, DataGateway, Dataset, FetchError, GatewayConfig, HttpGateway, Row, Widget,
};
use pie_render_skia::{render_to_png, RenderOptions, SkiaSurface};
use serde_json::{json, Value};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    source: Option<Source>,
}

#[derive(Subcommand)]
enum Source {
    /// Headered CSV served from memory (defaults to the bundled deposits data)
    Csv { path: Option<PathBuf> },
    /// Dune query results
    Query { id: String },
    /// Custom JSON endpoint
    Endpoint { url: String },
    /// Snapshot content by identifier
    Snapshot { cid: String },
}

/// Serves one in-memory dataset for every request.
struct LocalGateway {
    payload: Value,
}

impl LocalGateway {
    fn new(dataset: &Dataset) -> Self {
        Self {
            payload: json!({
                "metadata": { "column_names": dataset.column_names },
                "rows": dataset.rows
            }),
        }
    }
}

enum DemoGateway {
    Local(LocalGateway),
    Http(HttpGateway),
}

#[async_trait]
impl DataGateway for DemoGateway {
    async fn fetch_content(&self, cid: &str) -> Result<Value, FetchError> {
        match self {
            DemoGateway::Local(g) => Ok(g.payload.clone()),
            DemoGateway::Http(g) => g.fetch_content(cid).await,
        }
    }

    async fn call_api(&self, request: &ApiRequest) -> Result<Value, FetchError> {
        match self {
            DemoGateway::Local(g) => Ok(g.payload.clone()),
            DemoGateway::Http(g) => g.call_api(request).await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level.or_else(|| std::env::var("PIE_LOG").ok()));

    let source = args.source.unwrap_or(Source::Csv { path: None });
    let (gateway, data, stem) = match source {
        Source::Csv { path } => {
            let path = path.unwrap_or_else(default_csv);
            let dataset = load_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            println!("Loaded {} rows from {}", dataset.rows.len(), path.display());
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("local").to_string();
            let data = json!({ "mode": "Snapshot", "file": { "cid": format!("local:{stem}"), "name": path.display().to_string() } });
            (DemoGateway::Local(LocalGateway::new(&dataset)), data, stem)
        }
        Source::Query { id } => {
            let data = json!({ "mode": "Live", "dataSource": "Dune", "queryId": id });
            (http_gateway()?, data, format!("query_{id}"))
        }
        Source::Endpoint { url } => {
            let data = json!({ "mode": "Live", "dataSource": "Custom", "apiEndpoint": url });
            (http_gateway()?, data, "endpoint".to_string())
        }
        Source::Snapshot { cid } => {
            let data = json!({ "mode": "Snapshot", "file": { "cid": cid } });
            (http_gateway()?, data, "snapshot".to_string())
        }
    };

    let mut widget = Widget::new(gateway, SkiaSurface::new(RenderOptions::default()));
    widget
        .set_data_from(Configurator::Builder, &data)
        .await
        .context("builder data does not form a configuration")?;
    println!("Columns: {:?}", widget.dataset().column_names);

    // Same path a page builder takes when the user confirms the Edit form.
    let actions = widget.actions(Configurator::Builder);
    let edit = actions
        .iter()
        .find(|a| a.kind == ActionKind::Edit)
        .context("builder exposes no Edit action")?;
    let form = json!({
        "title": widget.get_data().title,
        "description": format!("{} rows", widget.dataset().rows.len()),
        "darkShadow": true
    });
    let cmd = edit.command(&form, widget.get_data())?;
    widget.execute(cmd).await?;

    let frame = widget
        .frame()
        .context("nothing to draw; options are missing or incomplete")?;
    if let Some(series) = frame.spec.pie() {
        for (i, pct) in series.percentages().into_iter().enumerate() {
            let text = frame.spec.tooltip_text(i, "*").unwrap_or_default();
            println!("  {:>5.1}%  {}", pct, text);
        }
    }

    let out_dir = PathBuf::from("target/out");
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let spec_path = out_dir.join(format!("pie_{stem}.json"));
    std::fs::write(&spec_path, serde_json::to_string_pretty(&frame.spec)?)?;
    println!("Wrote {}", spec_path.display());

    let mut opts = widget.surface().options().clone();
    opts.draw_labels = true;
    let png_path = out_dir.join(format!("pie_{stem}.png"));
    render_to_png(&frame, &opts, &png_path)?;
    println!("Wrote {}", png_path.display());

    let link = widget.link_params()?;
    info!(len = link.data.as_deref().map_or(0, str::len), "link parameter ready");
    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("hyper=off,reqwest=warn,{}", log_level)))
        .without_time()
        .init();
}

/// Sample data shipped with the demo, found from the workspace root or the crate dir.
fn default_csv() -> PathBuf {
    let local = PathBuf::from("crates/demo/data/deposits.csv");
    if local.exists() {
        return local;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/deposits.csv")
}

fn http_gateway() -> Result<DemoGateway> {
    let config = GatewayConfig::from_env();
    info!(ipfs = %config.ipfs_gateway_url, dune = %config.dune_base_url, "using HTTP gateway");
    Ok(DemoGateway::Http(HttpGateway::new(config)?))
}

/// Load a headered CSV; numeric cells become JSON numbers, others strings.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    println!("Headers: {:?}", headers);

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let mut row = Row::new();
        for (name, cell) in headers.iter().zip(rec.iter()) {
            row.insert(name.clone(), cell_value(cell));
        }
        rows.push(row);
    }
    Ok(Dataset::new(headers, rows))
}

fn cell_value(cell: &str) -> Value {
    if let Ok(n) = cell.parse::<i64>() {
        return Value::from(n);
    }
    match cell.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(cell.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_bundled_csv() {
        let cli = Cli::try_parse_from(["pie-demo"]).unwrap();
        assert!(cli.source.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn cli_sources_and_global_log_level() {
        let cli = Cli::try_parse_from(["pie-demo", "query", "2030664", "--log-level", "debug"]).unwrap();
        assert!(matches!(cli.source, Some(Source::Query { ref id }) if id == "2030664"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));

        let cli = Cli::try_parse_from(["pie-demo", "csv", "rows.csv"]).unwrap();
        assert!(matches!(cli.source, Some(Source::Csv { path: Some(ref p) }) if p == Path::new("rows.csv")));

        assert!(Cli::try_parse_from(["pie-demo", "--cid", "bafy"]).is_err());
        assert!(Cli::try_parse_from(["pie-demo", "snapshot"]).is_err());
    }

    #[test]
    fn csv_cells_keep_numbers_numeric() {
        assert_eq!(cell_value("42"), json!(42));
        assert_eq!(cell_value("1.5"), json!(1.5));
        assert_eq!(cell_value("Lido"), json!("Lido"));
    }
}
