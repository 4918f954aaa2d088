// File: crates/pie-core/src/chart.rs
// Summary: Declarative chart specification handed to the chart primitive (tooltip, legend, grid, one pie series).

use serde::Serialize;

use crate::format::format_value;
use crate::geometry::{Point, Size};
use crate::series::Series;
use crate::tooltip;
use crate::types::Dimension;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    #[default]
    Item,
}

/// Per-item tooltip. Placement and text are computed on demand by the
/// primitive through [`Tooltip::position`] and [`ChartSpec::tooltip_text`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub trigger: TooltipTrigger,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
}

impl Tooltip {
    pub fn position(&self, point: Point, content: Size, viewport: Size) -> Point {
        tooltip::place(point, content, viewport)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orient {
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendType {
    Scroll,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub color: String,
}

/// Legend block. Every optional field maps to a disjoint output key, so the
/// user's legend settings compose without precedence rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<Orient>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub legend_type: Option<LegendType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Grid {
    pub top: Dimension,
    pub bottom: Dimension,
    pub left: Dimension,
    pub right: Dimension,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub tooltip: Tooltip,
    pub legend: Legend,
    pub grid: Grid,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// The single pie series.
    pub fn pie(&self) -> Option<&Series> {
        self.series.first()
    }

    /// Tooltip text for the slice at `index`:
    /// `"<category> <marker> <series>: <formatted value>"`.
    pub fn tooltip_text(&self, index: usize, marker: &str) -> Option<String> {
        let series = self.pie()?;
        let slice = series.data.get(index)?;
        Some(format!(
            "{} {} {}: {}",
            slice.name,
            marker,
            series.name,
            format_value(&slice.value, self.tooltip.number_format.as_deref())
        ))
    }
}

/// Everything one draw needs: header captions plus the chart spec.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartFrame {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub spec: ChartSpec,
}

impl ChartFrame {
    pub fn description_visible(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}
