// File: crates/pie-core/src/transform.rs
// Summary: Series transform; maps a dataset plus visualization options to a declarative pie chart spec.
// Notes:
// - Pure: same inputs give structurally identical output, no hidden state.
// - Slice order follows row order; `valuesOptions` only supplies names/colours.
// - Stale column bindings read as `null` cells rather than failing.

use serde_json::Value;
use tracing::debug;

use crate::chart::{
    ChartSpec, Grid, Legend, LegendType, Orient, Placement, TextStyle, Tooltip, TooltipTrigger,
};
use crate::dataset::{Dataset, Row};
use crate::model::{Configuration, LegendOptions, LegendPosition, Padding, ValueOption, VisualizationOptions};
use crate::series::{ItemStyle, Series, Slice, SliceLabel};
use crate::types::{Dimension, PADDING_X_PERCENT, PADDING_Y_PX};

/// Build the chart spec for `dataset` under `options`.
pub fn build_chart_spec(dataset: &Dataset, options: &VisualizationOptions) -> ChartSpec {
    let data = dataset.rows.iter().map(|row| slice_for(row, options)).collect();
    let name = options
        .serie_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(&options.y_column);

    ChartSpec {
        tooltip: Tooltip { trigger: TooltipTrigger::Item, number_format: options.number_format.clone() },
        legend: legend_for(options.legend.as_ref()),
        grid: grid_for(&options.padding),
        series: vec![Series::pie(name, data)],
    }
}

/// Chart spec for a whole configuration; `None` while there is nothing to draw
/// (no options yet, or a column binding is missing).
pub fn build_for(config: &Configuration, dataset: &Dataset) -> Option<ChartSpec> {
    let Some(options) = config.options.as_ref() else {
        debug!("no visualization options; skipping transform");
        return None;
    };
    if !options.is_complete() {
        debug!(x = %options.x_column, y = %options.y_column, "incomplete column bindings; skipping transform");
        return None;
    }
    Some(build_chart_spec(dataset, options))
}

fn slice_for(row: &Row, options: &VisualizationOptions) -> Slice {
    let category = row.get(&options.x_column).unwrap_or(&Value::Null);
    let value = row.get(&options.y_column).cloned().unwrap_or(Value::Null);
    let matched = find_override(&options.values_options, category);

    Slice {
        name: matched.map(|m| m.name.clone()).unwrap_or_else(|| category_name(category)),
        value,
        item_style: matched.map(|m| ItemStyle { color: m.color.clone() }),
        label: options.show_data_labels.then(SliceLabel::inside_percent),
    }
}

/// First entry whose name equals the cell exactly. Only string cells match.
fn find_override<'a>(values: &'a [ValueOption], category: &Value) -> Option<&'a ValueOption> {
    let Value::String(cell) = category else {
        return None;
    };
    values.iter().find(|v| v.name == *cell)
}

fn category_name(category: &Value) -> String {
    match category {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn legend_for(options: Option<&LegendOptions>) -> Legend {
    let Some(options) = options else {
        return Legend::default();
    };
    let mut legend = Legend { show: options.show, ..Legend::default() };

    if let Some(position) = options.position {
        let side = match position {
            LegendPosition::Top => &mut legend.top,
            LegendPosition::Bottom => &mut legend.bottom,
            LegendPosition::Left => &mut legend.left,
            LegendPosition::Right => &mut legend.right,
        };
        *side = Some(Placement::Auto);
        if position.is_vertical() {
            legend.orient = Some(Orient::Vertical);
        }
    }
    if options.scroll {
        legend.legend_type = Some(LegendType::Scroll);
    }
    if let Some(color) = options.font_color.as_ref() {
        legend.text_style = Some(TextStyle { color: color.clone() });
    }
    legend
}

fn grid_for(padding: &Padding) -> Grid {
    Grid {
        top: padding.top.unwrap_or(Dimension::Px(PADDING_Y_PX)),
        bottom: padding.bottom.unwrap_or(Dimension::Px(PADDING_Y_PX)),
        left: padding.left.unwrap_or(Dimension::Percent(PADDING_X_PERCENT)),
        right: padding.right.unwrap_or(Dimension::Percent(PADDING_X_PERCENT)),
    }
}
