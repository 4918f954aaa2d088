// File: crates/pie-core/tests/snapshot.rs
// Purpose: Golden snapshot of the declarative chart spec with bless flow.
// Behavior:
// - Builds a deterministic spec covering legend, grid, labels and overrides.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares parsed JSON for structural equality.
// - Else, logs a note and returns (skips) without failing to ease first run.

use pie_core::model::{LegendOptions, LegendPosition, Padding, ValueOption};
use pie_core::{build_chart_spec, Dataset, Dimension, VisualizationOptions};
use serde_json::json;

fn spec_json() -> serde_json::Value {
    let ds = Dataset::from_payload(json!({
        "metadata": { "column_names": ["entity", "eth"] },
        "rows": [{ "entity": "Lido", "eth": 100 }, { "entity": "Other", "eth": 50 }]
    }))
    .expect("payload");
    let opts = VisualizationOptions {
        serie_name: Some("ETH deposited".into()),
        number_format: Some("0,000.00ma".into()),
        show_data_labels: true,
        legend: Some(LegendOptions {
            show: true,
            font_color: Some("#333".into()),
            scroll: true,
            position: Some(LegendPosition::Right),
        }),
        padding: Padding { top: Some(Dimension::Px(20.0)), ..Padding::default() },
        values_options: vec![ValueOption::new("Lido", "#e58f8f")],
        ..VisualizationOptions::new("entity", "eth")
    };
    serde_json::to_value(build_chart_spec(&ds, &opts)).expect("serialize spec")
}

#[test]
fn golden_lido_spec() {
    let got = spec_json();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("lido_spec.json");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        let text = serde_json::to_string_pretty(&got).expect("pretty json");
        std::fs::write(&snap_path, text).expect("write snapshot");
        eprintln!("[snapshot] Updated {}", snap_path.display());
        return;
    }

    if snap_path.exists() {
        let want_text = std::fs::read_to_string(&snap_path).expect("read snapshot");
        let want: serde_json::Value = serde_json::from_str(&want_text).expect("parse snapshot");
        assert_eq!(got, want, "chart spec differs from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
