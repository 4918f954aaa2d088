// File: crates/pie-core/tests/transform_props.rs
// Purpose: Series transform properties (override matching, row order, fallback, purity, labels, tooltip text).

use pie_core::model::ValueOption;
use pie_core::{build_chart_spec, Dataset, Dimension, Grid, Legend, VisualizationOptions};
use serde_json::{json, Value};

fn dataset(rows: Value) -> Dataset {
    Dataset::from_payload(json!({ "metadata": { "column_names": ["entity", "eth"] }, "rows": rows }))
        .expect("valid payload")
}

fn lido_options() -> VisualizationOptions {
    VisualizationOptions {
        values_options: vec![ValueOption::new("Lido", "#e58f8f")],
        ..VisualizationOptions::new("entity", "eth")
    }
}

#[test]
fn lido_and_other_scenario() {
    let ds = dataset(json!([{ "entity": "Lido", "eth": 100 }, { "entity": "Other", "eth": 50 }]));
    let spec = build_chart_spec(&ds, &lido_options());
    let data = &spec.pie().expect("pie series").data;

    assert_eq!(data.len(), 2);
    assert_eq!(data[0].name, "Lido");
    assert_eq!(data[0].value, json!(100));
    assert_eq!(data[0].color(), Some("#e58f8f"));
    assert_eq!(data[1].name, "Other");
    assert_eq!(data[1].value, json!(50));
    assert_eq!(data[1].color(), None);

    // unmatched slices carry no itemStyle at all on the wire
    let wire = serde_json::to_value(&spec).unwrap();
    assert!(wire["series"][0]["data"][1].get("itemStyle").is_none());
}

#[test]
fn slice_order_follows_rows_not_overrides() {
    let ds = dataset(json!([
        { "entity": "Kraken", "eth": 3 },
        { "entity": "Lido", "eth": 2 },
        { "entity": "Binance", "eth": 1 }
    ]));
    let opts = VisualizationOptions {
        values_options: vec![
            ValueOption::new("Binance", "#f4f000"),
            ValueOption::new("Lido", "#e58f8f"),
            ValueOption::new("Lido", "#000000"),
        ],
        ..VisualizationOptions::new("entity", "eth")
    };
    let spec = build_chart_spec(&ds, &opts);
    let names: Vec<&str> = spec.pie().unwrap().data.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Kraken", "Lido", "Binance"]);
    // first match wins
    assert_eq!(spec.pie().unwrap().data[1].color(), Some("#e58f8f"));
    assert_eq!(spec.pie().unwrap().data[0].color(), None);
}

#[test]
fn no_overrides_means_raw_names_and_no_colours() {
    let ds = dataset(json!([{ "entity": "Lido", "eth": 1 }, { "entity": "Coinbase", "eth": 2 }]));
    let spec = build_chart_spec(&ds, &VisualizationOptions::new("entity", "eth"));
    for (slice, row) in spec.pie().unwrap().data.iter().zip(&ds.rows) {
        assert_eq!(Value::String(slice.name.clone()), row["entity"]);
        assert!(slice.color().is_none());
    }
}

#[test]
fn transform_is_idempotent() {
    let ds = dataset(json!([{ "entity": "Lido", "eth": 100 }, { "entity": "Other", "eth": 50 }]));
    let opts = VisualizationOptions { show_data_labels: true, ..lido_options() };
    assert_eq!(build_chart_spec(&ds, &opts), build_chart_spec(&ds, &opts));
}

#[test]
fn data_labels_follow_the_option() {
    let ds = dataset(json!([
        { "entity": "Lido", "eth": 97 },
        { "entity": "Other", "eth": 3 }
    ]));
    let off = build_chart_spec(&ds, &lido_options());
    assert!(off.pie().unwrap().data.iter().all(|s| !s.label_visible()));
    assert_eq!(off.pie().unwrap().slice_labels(), vec![None, None]);

    let on = build_chart_spec(&ds, &VisualizationOptions { show_data_labels: true, ..lido_options() });
    let series = on.pie().unwrap();
    assert!(series.data.iter().all(|s| s.label_visible()));
    assert_eq!(series.slice_labels(), vec![Some("97%".to_string()), Some(String::new())]);
    // the series-level label stays hidden either way
    assert!(!series.label.show);
    assert_eq!(series.label.formatter, "{d}%");
}

#[test]
fn tooltip_text_uses_series_name_and_number_format() {
    let ds = dataset(json!([{ "entity": "Lido", "eth": 1234567.891 }]));
    let opts = VisualizationOptions {
        serie_name: Some("ETH deposited".into()),
        number_format: Some("0,000.00ma".into()),
        ..lido_options()
    };
    let spec = build_chart_spec(&ds, &opts);
    assert_eq!(spec.tooltip_text(0, "●").as_deref(), Some("Lido ● ETH deposited: 1.23M"));
    assert_eq!(spec.tooltip_text(1, "●"), None);

    let plain = build_chart_spec(&ds, &lido_options());
    assert_eq!(plain.tooltip_text(0, "*").as_deref(), Some("Lido * eth: 1,234,567.891"));
}

#[test]
fn unset_padding_and_legend_use_widget_defaults() {
    let spec = build_chart_spec(&dataset(json!([])), &lido_options());
    let grid = Grid {
        top: Dimension::Px(60.0),
        bottom: Dimension::Px(60.0),
        left: Dimension::Percent(10.0),
        right: Dimension::Percent(10.0),
    };
    assert_eq!(spec.grid, grid);
    assert_eq!(spec.legend, Legend::default());
}
