// File: crates/pie-core/src/lib.rs
// Summary: Core library entry point; exports the widget model, data gateway, series transform and command pipeline.

pub mod chart;
pub mod command;
pub mod config;
pub mod configurator;
pub mod dataset;
pub mod error;
pub mod format;
pub mod gateway;
pub mod geometry;
pub mod history;
pub mod link;
pub mod model;
pub mod schema;
pub mod series;
pub mod theme;
pub mod tooltip;
pub mod transform;
pub mod types;
pub mod widget;

pub use chart::{ChartFrame, ChartSpec, Grid, Legend, Tooltip};
pub use command::{Command, CommandStatus, DataInput, Direction, EditInput, WidgetState};
pub use config::GatewayConfig;
pub use configurator::{Action, ActionKind, Configurator};
pub use dataset::{Dataset, Row};
pub use error::{ActionError, CommandError, FetchError, LinkError, ValidationError};
pub use format::format_number;
pub use gateway::{resolve, resolve_or_empty, ApiRequest, DataGateway, HttpGateway};
pub use history::CommandHistory;
pub use link::LinkParams;
pub use model::{Configuration, DataSource, DataSourceMode, FileReference, VisualizationOptions};
pub use series::{Series, Slice};
pub use theme::{ParentTheme, ResolvedTheme, ThemeSettings, ThemeTags};
pub use transform::{build_chart_spec, build_for};
pub use types::Dimension;
pub use widget::{ChartSurface, FetchTicket, Widget};
