// File: crates/pie-core/src/command.rs
// Summary: Reversible user edits over the widget state (configuration + theme tags).
// Notes:
// - `Command` is a tagged union; each variant records `before`/`after`
//   snapshots on first execution and replays them on undo/redo.
// - Lifecycle: Created -> Executed -> (Undone <-> Executed)*.
// - Commands only mutate state. Re-rendering after every transition is the
//   orchestrator's job (`Widget::execute` / `undo` / `redo`).

use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::error::{CommandError, ValidationError};
use crate::model::{Configuration, DataSource, DataSourceMode, FileReference, VisualizationOptions};
use crate::theme::{ThemeSettings, ThemeTags};

/// Everything a widget instance owns and a command may change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidgetState {
    pub config: Configuration,
    pub tags: ThemeTags,
}

impl WidgetState {
    pub fn new(config: Configuration, tags: ThemeTags) -> Self {
        Self { config, tags }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommandStatus {
    #[default]
    Created,
    Executed,
    Undone,
}

/// Snapshots taken around the first execution.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<T> {
    pub before: T,
    pub after: T,
}

/// Form data of the Edit action: general fields plus theme settings.
/// Anything that is not `title`, `description` or `options` is a theme field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<VisualizationOptions>,
    #[serde(flatten)]
    pub theme: ThemeSettings,
}

/// Payload of the Data action. Absent fields leave the configuration alone.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataInput {
    #[serde(default, deserialize_with = "non_empty")]
    pub mode: Option<DataSourceMode>,
    #[serde(default)]
    pub file: Option<FileReference>,
    #[serde(default, deserialize_with = "non_empty")]
    pub data_source: Option<DataSource>,
    #[serde(default)]
    pub query_id: Option<String>,
    #[serde(default)]
    pub api_endpoint: Option<String>,
    /// `Some(None)` is an explicit `null`, which clears the options.
    #[serde(default, deserialize_with = "present")]
    pub options: Option<Option<VisualizationOptions>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Enum field sent as a string; `""` and `null` read as absent.
fn non_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.is_empty() => T::deserialize(s.into_deserializer()).map(Some),
        _ => Ok(None),
    }
}

impl DataInput {
    /// Confirm gate: Live needs a data source, Snapshot a non-empty content id.
    /// Fields the input omits are taken from `current`.
    pub fn validate(&self, current: &Configuration) -> Result<(), ValidationError> {
        match self.mode.unwrap_or(current.mode) {
            DataSourceMode::Live => {
                if self.data_source.or(current.data_source).is_none() {
                    return Err(ValidationError::MissingDataSource);
                }
            }
            DataSourceMode::Snapshot => {
                let cid = self.file.as_ref().or(current.file.as_ref()).map(|f| f.cid.as_str());
                if cid.map_or(true, str::is_empty) {
                    return Err(ValidationError::MissingFile);
                }
            }
        }
        Ok(())
    }

    /// Apply present fields. Empty strings do not clear `queryId` or `apiEndpoint`.
    fn apply_to(&self, config: &mut Configuration) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(file) = &self.file {
            config.file = Some(file.clone());
        }
        if let Some(data_source) = self.data_source {
            config.data_source = Some(data_source);
        }
        if let Some(query_id) = self.query_id.as_ref().filter(|q| !q.is_empty()) {
            config.query_id = Some(query_id.clone());
        }
        if let Some(endpoint) = self.api_endpoint.as_ref().filter(|e| !e.is_empty()) {
            config.api_endpoint = Some(endpoint.clone());
        }
        if let Some(options) = &self.options {
            config.options = options.clone();
        }
    }
}

/// Edit of general metadata, visualization options and theme.
#[derive(Clone, Debug, PartialEq)]
pub struct EditCommand {
    pub input: EditInput,
    /// Options are edited through a separate advanced form; this command then
    /// leaves `options` alone, including on undo.
    pub advanced: bool,
    status: CommandStatus,
    transition: Option<Transition<WidgetState>>,
}

impl EditCommand {
    pub fn new(input: EditInput, advanced: bool) -> Self {
        Self { input, advanced, status: CommandStatus::Created, transition: None }
    }

    pub fn transition(&self) -> Option<&Transition<WidgetState>> {
        self.transition.as_ref()
    }

    fn run(&mut self, state: &mut WidgetState) {
        let before = state.clone();
        let input = &self.input;
        if let Some(title) = &input.title {
            state.config.title = title.clone();
        }
        state.config.description = input.description.clone();
        if !self.advanced {
            state.config.options = input.options.clone();
        }
        state.tags.merge(&input.theme);
        self.transition = Some(Transition { before, after: state.clone() });
    }

    fn restore(&self, snapshot: &WidgetState, state: &mut WidgetState) {
        let mut restored = snapshot.clone();
        if self.advanced {
            restored.config.options = state.config.options.take();
        }
        *state = restored;
    }
}

/// Edit of the data source, mode and options.
#[derive(Clone, Debug, PartialEq)]
pub struct DataCommand {
    pub input: DataInput,
    status: CommandStatus,
    transition: Option<Transition<Configuration>>,
}

impl DataCommand {
    pub fn new(input: DataInput) -> Self {
        Self { input, status: CommandStatus::Created, transition: None }
    }

    pub fn transition(&self) -> Option<&Transition<Configuration>> {
        self.transition.as_ref()
    }

    fn run(&mut self, config: &mut Configuration) {
        let before = config.clone();
        self.input.apply_to(config);
        self.transition = Some(Transition { before, after: config.clone() });
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Edit(EditCommand),
    Data(DataCommand),
}

impl Command {
    pub fn edit(input: EditInput, advanced: bool) -> Self {
        Command::Edit(EditCommand::new(input, advanced))
    }

    pub fn data(input: DataInput) -> Self {
        Command::Data(DataCommand::new(input))
    }

    /// Build a Data command only when its input passes the confirm gate.
    pub fn confirm_data(input: DataInput, current: &Configuration) -> Result<Self, ValidationError> {
        input.validate(current)?;
        Ok(Command::data(input))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Edit(_) => "Edit",
            Command::Data(_) => "Data",
        }
    }

    pub fn status(&self) -> CommandStatus {
        match self {
            Command::Edit(c) => c.status,
            Command::Data(c) => c.status,
        }
    }

    pub fn execute(&mut self, state: &mut WidgetState) -> Result<(), CommandError> {
        self.apply(Direction::Forward, state)
    }

    pub fn undo(&mut self, state: &mut WidgetState) -> Result<(), CommandError> {
        self.apply(Direction::Backward, state)
    }

    /// Replays the recorded post-execute state; never re-runs the edit itself.
    pub fn redo(&mut self, state: &mut WidgetState) -> Result<(), CommandError> {
        self.apply(Direction::Forward, state)
    }

    pub fn apply(&mut self, direction: Direction, state: &mut WidgetState) -> Result<(), CommandError> {
        let status = self.status();
        let next = match (status, direction) {
            (CommandStatus::Created, Direction::Forward) => {
                match self {
                    Command::Edit(c) => c.run(state),
                    Command::Data(c) => c.run(&mut state.config),
                }
                CommandStatus::Executed
            }
            (CommandStatus::Undone, Direction::Forward) => {
                self.replay(Direction::Forward, state);
                CommandStatus::Executed
            }
            (CommandStatus::Executed, Direction::Backward) => {
                self.replay(Direction::Backward, state);
                CommandStatus::Undone
            }
            (status, direction) => {
                let action = match direction {
                    Direction::Forward => "redo",
                    Direction::Backward => "undo",
                };
                return Err(CommandError::InvalidTransition { action, status });
            }
        };
        match self {
            Command::Edit(c) => c.status = next,
            Command::Data(c) => c.status = next,
        }
        info!(command = self.name(), ?direction, status = ?next, "command applied");
        Ok(())
    }

    fn replay(&self, direction: Direction, state: &mut WidgetState) {
        match self {
            Command::Edit(c) => {
                if let Some(t) = &c.transition {
                    c.restore(pick(t, direction), state);
                }
            }
            Command::Data(c) => {
                if let Some(t) = &c.transition {
                    state.config = pick(t, direction).clone();
                }
            }
        }
    }
}

fn pick<T>(t: &Transition<T>, direction: Direction) -> &T {
    match direction {
        Direction::Forward => &t.after,
        Direction::Backward => &t.before,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimension;
    use serde_json::json;

    fn state() -> WidgetState {
        WidgetState::new(
            Configuration {
                title: "Old".into(),
                description: Some("old description".into()),
                query_id: Some("99".into()),
                options: Some(VisualizationOptions::new("entity", "eth")),
                ..Configuration::default()
            },
            ThemeTags::initial(),
        )
    }

    fn edit_input() -> EditInput {
        serde_json::from_value(json!({
            "title": "New",
            "description": "",
            "options": { "xColumn": "a", "yColumn": "b" },
            "darkShadow": true,
            "height": "400"
        }))
        .unwrap()
    }

    #[test]
    fn edit_input_splits_general_and_theme_fields() {
        let input = edit_input();
        assert_eq!(input.title.as_deref(), Some("New"));
        assert_eq!(input.theme.dark_shadow, Some(true));
        assert_eq!(input.theme.height, Some(Dimension::Px(400.0)));
    }

    #[test]
    fn edit_replaces_options_unless_advanced() {
        let mut s = state();
        Command::edit(edit_input(), false).execute(&mut s).unwrap();
        assert_eq!(s.config.options.as_ref().unwrap().x_column, "a");

        let mut s = state();
        Command::edit(edit_input(), true).execute(&mut s).unwrap();
        assert_eq!(s.config.options.as_ref().unwrap().x_column, "entity");
        assert_eq!(s.config.title, "New");
    }

    #[test]
    fn advanced_undo_keeps_latest_options() {
        let mut s = state();
        let mut cmd = Command::edit(edit_input(), true);
        cmd.execute(&mut s).unwrap();
        s.config.options = Some(VisualizationOptions::new("x2", "y2"));
        cmd.undo(&mut s).unwrap();
        assert_eq!(s.config.title, "Old");
        assert_eq!(s.config.options.unwrap().x_column, "x2");
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut s = state();
        let mut cmd = Command::data(DataInput::default());
        assert!(cmd.undo(&mut s).is_err());
        cmd.execute(&mut s).unwrap();
        assert_eq!(
            cmd.redo(&mut s),
            Err(CommandError::InvalidTransition { action: "redo", status: CommandStatus::Executed })
        );
    }

    #[test]
    fn data_input_distinguishes_null_options_from_absent() {
        let absent: DataInput = serde_json::from_value(json!({ "queryId": "1" })).unwrap();
        assert_eq!(absent.options, None);
        let cleared: DataInput = serde_json::from_value(json!({ "options": null })).unwrap();
        assert_eq!(cleared.options, Some(None));

        let mut s = state();
        Command::data(cleared).execute(&mut s).unwrap();
        assert_eq!(s.config.options, None);
    }

    #[test]
    fn empty_strings_do_not_clear_identifiers() {
        let mut s = state();
        let input: DataInput = serde_json::from_value(json!({ "queryId": "", "apiEndpoint": "" })).unwrap();
        Command::data(input).execute(&mut s).unwrap();
        assert_eq!(s.config.query_id.as_deref(), Some("99"));
    }

    #[test]
    fn empty_mode_and_source_are_ignored() {
        let mut s = state();
        s.config.data_source = Some(DataSource::Dune);
        let input: DataInput =
            serde_json::from_value(json!({ "mode": "", "dataSource": "", "queryId": "123" })).unwrap();
        assert_eq!((input.mode, input.data_source), (None, None));
        Command::data(input).execute(&mut s).unwrap();
        assert_eq!(s.config.mode, DataSourceMode::Live);
        assert_eq!(s.config.data_source, Some(DataSource::Dune));
        assert_eq!(s.config.query_id.as_deref(), Some("123"));

        let nulls: DataInput = serde_json::from_value(json!({ "mode": null, "dataSource": null })).unwrap();
        assert_eq!(nulls, DataInput::default());
        let snapshot: DataInput = serde_json::from_value(json!({ "mode": "Snapshot" })).unwrap();
        assert_eq!(snapshot.mode, Some(DataSourceMode::Snapshot));
        assert!(serde_json::from_value::<DataInput>(json!({ "dataSource": "Nope" })).is_err());
    }

    #[test]
    fn confirm_gate() {
        let live = Configuration { data_source: None, ..Configuration::default() };
        assert_eq!(DataInput::default().validate(&live), Err(ValidationError::MissingDataSource));
        let with_source = DataInput { data_source: Some(DataSource::Custom), ..DataInput::default() };
        assert!(with_source.validate(&live).is_ok());

        let snapshot = DataInput { mode: Some(DataSourceMode::Snapshot), ..DataInput::default() };
        assert_eq!(snapshot.validate(&Configuration::default()), Err(ValidationError::MissingFile));
        let with_file = DataInput { file: Some(FileReference::new("bafy")), ..snapshot };
        assert!(with_file.validate(&Configuration::default()).is_ok());
        assert!(Command::confirm_data(DataInput::default(), &live).is_err());
    }
}
