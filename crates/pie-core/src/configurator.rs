// File: crates/pie-core/src/configurator.rs
// Summary: Host-facing configurators (page builder vs. embedder) and the editing actions they expose.

use serde_json::Value;

use crate::command::{Command, DataInput, EditInput};
use crate::error::ActionError;
use crate::model::Configuration;
use crate::schema::{builder_schema, embedder_schema, FormSchema};

/// Which host is driving the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Configurator {
    /// Page builder: general/theme form plus a separate options form.
    Builder,
    /// Embedding host: one form for everything, plus link parameters.
    Embedder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Edit,
    Data,
}

/// One editing action offered to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub name: &'static str,
    pub icon: &'static str,
    /// Form the host renders for this action; `None` for the data action,
    /// which the host renders with its own data-source editor.
    pub form: Option<FormSchema>,
    /// Options form managed outside the general form (builder only).
    pub advanced: Option<FormSchema>,
}

impl Action {
    /// Build the command for confirmed form data. Data commands must pass the
    /// confirm gate against `current` first.
    pub fn command(&self, input: &Value, current: &Configuration) -> Result<Command, ActionError> {
        match self.kind {
            ActionKind::Edit => {
                let input: EditInput = serde_json::from_value(input.clone())?;
                Ok(Command::edit(input, self.advanced.is_some()))
            }
            ActionKind::Data => {
                let input: DataInput = serde_json::from_value(input.clone())?;
                Ok(Command::confirm_data(input, current)?)
            }
        }
    }
}

impl Configurator {
    pub fn name(self) -> &'static str {
        match self {
            Configurator::Builder => "Builder Configurator",
            Configurator::Embedder => "Embedder Configurator",
        }
    }

    pub fn target(self) -> &'static str {
        match self {
            Configurator::Builder => "Builders",
            Configurator::Embedder => "Embedders",
        }
    }

    /// Edit and Data actions; column pickers list `columns`.
    pub fn actions(self, columns: &[String]) -> Vec<Action> {
        let (form, advanced) = match self {
            Configurator::Builder => {
                let schema = builder_schema(columns);
                (FormSchema { data_schema: schema.data_schema, ui_schema: schema.ui_schema }, Some(schema.advanced))
            }
            Configurator::Embedder => (embedder_schema(columns), None),
        };
        vec![
            Action { kind: ActionKind::Edit, name: "Edit", icon: "edit", form: Some(form), advanced: advanced.clone() },
            Action { kind: ActionKind::Data, name: "Data", icon: "database", form: None, advanced },
        ]
    }

    /// Configuration to install for host-supplied data. The builder fills
    /// gaps from its default data; the embedder takes the data as-is.
    pub fn incoming_data(self, data: &Value) -> Result<Configuration, serde_json::Error> {
        match self {
            Configurator::Builder => Configuration::default_builder().merged_with(data),
            Configurator::Embedder => serde_json::from_value(data.clone()),
        }
    }

    pub fn supports_link_params(self) -> bool {
        self == Configurator::Embedder
    }
}
