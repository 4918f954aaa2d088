// File: crates/pie-core/src/types.rs
// Summary: Shared types and constants (default sizes, grid paddings, donut ring, debounce).

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default widget width in pixels when no `width` tag is set.
pub const WIDTH: f64 = 700.0;
/// Default widget height in pixels when no `height` tag is set.
pub const HEIGHT: f64 = 500.0;

/// Default top/bottom grid padding, in pixels.
pub const PADDING_Y_PX: f64 = 60.0;
/// Default left/right grid padding, in percent of the container width.
pub const PADDING_X_PERCENT: f64 = 10.0;

/// Inner and outer radius of the donut ring, in percent of the drawable area.
pub const DONUT_RADIUS: (f64, f64) = (40.0, 70.0);

/// Inside labels are blanked for slices whose share is below this percentage.
pub const LABEL_MIN_PERCENT: f64 = 5.0;

/// Resize bursts closer together than this collapse into one resize.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(300);

/// A length that is either absolute pixels or a percentage of the container.
///
/// On the wire a pixel value is a bare number (`60`) and a percentage is a
/// string (`"10%"`). Numeric strings without `%` (`"60"`, `"60px"`) read as pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "DimensionRepr")]
pub enum Dimension {
    Px(f64),
    Percent(f64),
}

impl Dimension {
    /// Resolve against a container extent, in pixels.
    pub fn to_px(self, extent: f64) -> f64 {
        match self {
            Dimension::Px(px) => px,
            Dimension::Percent(p) => extent * p / 100.0,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Px(px) => write!(f, "{px}px"),
            Dimension::Percent(p) => write!(f, "{p}%"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = String;

    fn try_from(repr: DimensionRepr) -> Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Number(px) => Ok(Dimension::Px(px)),
            DimensionRepr::Text(text) => {
                let t = text.trim();
                if let Some(p) = t.strip_suffix('%') {
                    p.trim()
                        .parse::<f64>()
                        .map(Dimension::Percent)
                        .map_err(|_| format!("invalid percentage: {text:?}"))
                } else {
                    t.trim_end_matches("px")
                        .trim()
                        .parse::<f64>()
                        .map(Dimension::Px)
                        .map_err(|_| format!("invalid length: {text:?}"))
                }
            }
        }
    }
}

impl From<Dimension> for DimensionRepr {
    fn from(d: Dimension) -> Self {
        match d {
            Dimension::Px(px) => DimensionRepr::Number(px),
            Dimension::Percent(p) => DimensionRepr::Text(format!("{p}%")),
        }
    }
}
