// File: crates/pie-core/src/model.rs
// Summary: Persisted widget configuration: data source selection, title/description and visualization options.
// Notes:
// - Field names follow the host's camelCase JSON so configurations round-trip
//   through `getData`/`setData` and link parameters unchanged.
// - Options may name columns that no longer exist in the latest dataset; such
//   references resolve to empty cells instead of being rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Dimension;

/// How the widget acquires its rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSourceMode {
    /// Call a remote query/API endpoint.
    #[default]
    Live,
    /// Fetch immutable content by content identifier.
    Snapshot,
}

/// Query provider used in Live mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    /// Dune query results addressed by `queryId`.
    Dune,
    /// Arbitrary endpoint given by `apiEndpoint`.
    Custom,
}

/// Content-addressed snapshot reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    pub cid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FileReference {
    pub fn new(cid: impl Into<String>) -> Self {
        Self { cid: cid.into(), name: None }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub mode: DataSourceMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<VisualizationOptions>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            mode: DataSourceMode::Live,
            data_source: Some(DataSource::Dune),
            query_id: None,
            api_endpoint: None,
            file: None,
            options: None,
        }
    }
}

impl Configuration {
    /// Starting point handed to the page builder before any user data is applied.
    pub fn default_builder() -> Self {
        Self {
            title: "Ethereum Beacon Chain Deposits Entity".to_string(),
            description: None,
            mode: DataSourceMode::Live,
            data_source: Some(DataSource::Custom),
            query_id: None,
            api_endpoint: Some("https://api.dune.com/api/v1/query/2030664/results".to_string()),
            file: None,
            options: Some(VisualizationOptions {
                serie_name: Some("ETH deposited".to_string()),
                number_format: Some("0,000.00ma".to_string()),
                show_data_labels: true,
                values_options: vec![
                    ValueOption::new("Lido", "#e58f8f"),
                    ValueOption::new("Other", "#a9a4a4"),
                    ValueOption::new("Kraken", "#0077ff"),
                    ValueOption::new("Binance", "#f4f000"),
                    ValueOption::new("Coinbase", "#0c22e3"),
                ],
                ..VisualizationOptions::new("entity", "eth_deposited")
            }),
        }
    }

    /// Shallow-merge a JSON object over this configuration: top-level keys in
    /// `patch` replace the current ones, everything else is retained.
    pub fn merged_with(&self, patch: &Value) -> Result<Configuration, serde_json::Error> {
        let mut base = serde_json::to_value(self)?;
        if let (Value::Object(base), Value::Object(patch)) = (&mut base, patch) {
            for (key, value) in patch {
                base.insert(key.clone(), value.clone());
            }
        } else if !patch.is_null() {
            base = patch.clone();
        }
        serde_json::from_value(base)
    }

    /// The content identifier of the snapshot, when one is set and non-empty.
    pub fn snapshot_cid(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.cid.as_str()).filter(|cid| !cid.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationOptions {
    /// Category column: one slice per row, named by this cell.
    pub x_column: String,
    /// Value column: the slice magnitude.
    pub y_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serie_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendOptions>,
    #[serde(default)]
    pub show_data_labels: bool,
    #[serde(default, skip_serializing_if = "Padding::is_empty")]
    pub padding: Padding,
    /// Per-category overrides; the first entry whose `name` equals the cell wins.
    #[serde(default)]
    pub values_options: Vec<ValueOption>,
}

impl VisualizationOptions {
    pub fn new(x_column: impl Into<String>, y_column: impl Into<String>) -> Self {
        Self { x_column: x_column.into(), y_column: y_column.into(), ..Default::default() }
    }

    /// Both column bindings are set.
    pub fn is_complete(&self) -> bool {
        !self.x_column.is_empty() && !self.y_column.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendOptions {
    #[serde(default)]
    pub show: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default)]
    pub scroll: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl LegendPosition {
    /// Side legends stack their entries vertically.
    pub fn is_vertical(self) -> bool {
        matches!(self, LegendPosition::Left | LegendPosition::Right)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Dimension>,
}

impl Padding {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueOption {
    pub name: String,
    pub color: String,
}

impl ValueOption {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self { name: name.into(), color: color.into() }
    }
}
