// File: crates/pie-core/src/series.rs
// Summary: Pie series model: slices, per-slice labels and share computation.
// Notes:
// - Serialized field names match the declarative input of the chart primitive
//   (`itemStyle`, `label`, `radius`, `type: "pie"`).
// - Two label mechanisms coexist: the series-level label (always hidden,
//   `{d}%` template) and the optional per-slice inside label driven by
//   `showDataLabels`.

use serde::Serialize;
use serde_json::Value;

use crate::format::numeric;
use crate::types::{Dimension, DONUT_RADIUS, LABEL_MIN_PERCENT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    #[default]
    Pie,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemStyle {
    pub color: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Inside,
}

/// How a per-slice label turns the slice's share into text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelFormatter {
    /// `"<share>%"` rounded to a whole percent, blank below the threshold.
    PercentAtLeast(f64),
}

impl LabelFormatter {
    pub fn format(self, percent: f64) -> String {
        match self {
            LabelFormatter::PercentAtLeast(threshold) => {
                if percent >= threshold {
                    format!("{}%", percent.round())
                } else {
                    String::new()
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SliceLabel {
    pub show: bool,
    pub position: LabelPosition,
    pub formatter: LabelFormatter,
}

impl SliceLabel {
    pub fn inside_percent() -> Self {
        Self {
            show: true,
            position: LabelPosition::Inside,
            formatter: LabelFormatter::PercentAtLeast(LABEL_MIN_PERCENT),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub name: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<ItemStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SliceLabel>,
}

impl Slice {
    pub fn color(&self) -> Option<&str> {
        self.item_style.as_ref().map(|s| s.color.as_str())
    }

    pub fn label_visible(&self) -> bool {
        self.label.as_ref().is_some_and(|l| l.show)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesLabel {
    pub show: bool,
    pub formatter: String,
}

impl Default for SeriesLabel {
    fn default() -> Self {
        Self { show: false, formatter: "{d}%".to_string() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    #[serde(rename = "type")]
    pub series_type: SeriesType,
    pub radius: [Dimension; 2],
    pub label: SeriesLabel,
    pub data: Vec<Slice>,
}

impl Series {
    pub fn pie(name: impl Into<String>, data: Vec<Slice>) -> Self {
        Self {
            name: name.into(),
            series_type: SeriesType::Pie,
            radius: [Dimension::Percent(DONUT_RADIUS.0), Dimension::Percent(DONUT_RADIUS.1)],
            label: SeriesLabel::default(),
            data,
        }
    }

    /// Share of each slice in percent. All zero when the total is not positive.
    pub fn percentages(&self) -> Vec<f64> {
        let values: Vec<f64> = self.data.iter().map(|s| numeric(&s.value).max(0.0)).collect();
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return vec![0.0; values.len()];
        }
        values.iter().map(|v| v * 100.0 / total).collect()
    }

    /// Text of each slice's inside label; `None` where labels are off.
    pub fn slice_labels(&self) -> Vec<Option<String>> {
        self.data
            .iter()
            .zip(self.percentages())
            .map(|(slice, pct)| {
                slice.label.as_ref().filter(|l| l.show).map(|l| l.formatter.format(pct))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slice(name: &str, value: Value, labelled: bool) -> Slice {
        Slice {
            name: name.into(),
            value,
            item_style: None,
            label: labelled.then(SliceLabel::inside_percent),
        }
    }

    #[test]
    fn percent_label_is_blank_below_threshold() {
        let f = LabelFormatter::PercentAtLeast(5.0);
        assert_eq!(f.format(66.6667), "67%");
        assert_eq!(f.format(5.0), "5%");
        assert_eq!(f.format(4.99), "");
    }

    #[test]
    fn shares_and_labels() {
        let s = Series::pie(
            "eth",
            vec![
                slice("a", json!(96), true),
                slice("b", json!("3"), true),
                slice("c", json!(1), false),
            ],
        );
        assert_eq!(s.percentages(), vec![96.0, 3.0, 1.0]);
        assert_eq!(s.slice_labels(), vec![Some("96%".to_string()), Some(String::new()), None]);
    }

    #[test]
    fn zero_total_has_zero_shares() {
        let s = Series::pie("x", vec![slice("a", Value::Null, false), slice("b", json!(0), false)]);
        assert_eq!(s.percentages(), vec![0.0, 0.0]);
    }
}
