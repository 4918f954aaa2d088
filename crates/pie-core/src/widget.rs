// File: crates/pie-core/src/widget.rs
// Summary: Render orchestrator; owns widget state and sequences fetch -> transform -> draw.
// Notes:
// - `loading` is on for exactly the fetch+transform step of `refresh`.
//   Theme-only updates go through `render` and never touch it.
// - Fetches are fenced by generation: a result whose ticket is older than the
//   latest `begin_fetch` is dropped.
// - Resize is layout-only and debounced.

use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info};

use crate::chart::ChartFrame;
use crate::command::{Command, WidgetState};
use crate::configurator::{Action, Configurator};
use crate::dataset::Dataset;
use crate::error::{CommandError, FetchError, LinkError};
use crate::gateway::{self, DataGateway};
use crate::history::CommandHistory;
use crate::link::{self, LinkParams};
use crate::model::Configuration;
use crate::theme::{ParentTheme, ResolvedTheme, ThemeSettings, ThemeTags};
use crate::transform;
use crate::types::RESIZE_DEBOUNCE;

/// The external chart primitive, as seen by the orchestrator.
pub trait ChartSurface {
    /// Replace whatever is drawn with `frame`.
    fn draw(&mut self, frame: &ChartFrame);
    /// Re-layout the existing drawing to the current container size.
    fn resize(&mut self);
    fn set_loading(&mut self, loading: bool);
    fn apply_theme(&mut self, theme: &ResolvedTheme);
}

/// Trailing-edge debounce: the action fires once the events stop for `delay`.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE)
    }
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True once, when the quiet period has elapsed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Handle for one in-flight fetch.
#[derive(Clone, Debug)]
pub struct FetchTicket {
    pub generation: u64,
    /// Configuration the fetch was started for.
    pub config: Configuration,
}

pub struct Widget<G, S> {
    gateway: G,
    surface: S,
    state: WidgetState,
    dataset: Dataset,
    history: CommandHistory,
    loading: bool,
    generation: u64,
    resize: ResizeDebouncer,
}

impl<G, S> Widget<G, S>
where
    G: DataGateway,
    S: ChartSurface,
{
    pub fn new(gateway: G, surface: S) -> Self {
        Self::with_state(gateway, surface, WidgetState::new(Configuration::default(), ThemeTags::initial()))
    }

    pub fn with_state(gateway: G, surface: S, state: WidgetState) -> Self {
        Self {
            gateway,
            surface,
            state,
            dataset: Dataset::empty(),
            history: CommandHistory::default(),
            loading: false,
            generation: 0,
            resize: ResizeDebouncer::default(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    // ---- host contract -------------------------------------------------

    pub fn get_data(&self) -> &Configuration {
        &self.state.config
    }

    pub async fn set_data(&mut self, config: Configuration) {
        self.state.config = config;
        self.refresh().await;
    }

    /// Install host-supplied data the way `configurator` expects it.
    pub async fn set_data_from(&mut self, configurator: Configurator, data: &Value) -> Result<(), serde_json::Error> {
        let config = configurator.incoming_data(data)?;
        self.set_data(config).await;
        Ok(())
    }

    pub fn get_tag(&self) -> &ThemeTags {
        &self.state.tags
    }

    pub fn set_tag(&mut self, settings: &ThemeSettings) {
        self.state.tags.merge(settings);
        self.render();
    }

    pub fn inherit_tag(&mut self, parent: &ParentTheme) {
        self.state.tags.inherit(parent);
        self.render();
    }

    /// Editing actions; column pickers list the latest dataset's columns.
    pub fn actions(&self, configurator: Configurator) -> Vec<Action> {
        configurator.actions(&self.dataset.column_names)
    }

    pub fn link_params(&self) -> Result<LinkParams, LinkError> {
        link::encode(&self.state.config)
    }

    pub async fn set_link_params(&mut self, params: &LinkParams) -> Result<(), LinkError> {
        if params.data.is_none() {
            return Ok(());
        }
        let config = link::decode_over(&self.state.config, params)?;
        self.set_data(config).await;
        Ok(())
    }

    // ---- commands ------------------------------------------------------

    pub async fn execute(&mut self, cmd: Command) -> Result<(), CommandError> {
        self.history.execute(cmd, &mut self.state)?;
        self.refresh().await;
        Ok(())
    }

    pub async fn undo(&mut self) -> Result<bool, CommandError> {
        let undone = self.history.undo(&mut self.state)?;
        if undone.is_some() {
            self.refresh().await;
        }
        Ok(undone.is_some())
    }

    pub async fn redo(&mut self) -> Result<bool, CommandError> {
        let redone = self.history.redo(&mut self.state)?;
        if redone.is_some() {
            self.refresh().await;
        }
        Ok(redone.is_some())
    }

    // ---- rendering -----------------------------------------------------

    /// Full cycle: fetch the dataset, transform, draw.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let result = gateway::resolve(&self.gateway, &ticket.config).await;
        self.complete_fetch(ticket, result);
    }

    /// Start a fetch for the current configuration and switch loading on.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.set_loading(true);
        FetchTicket { generation: self.generation, config: self.state.config.clone() }
    }

    /// Finish the fetch `ticket` was issued for. Returns false, changing
    /// nothing, when a newer fetch has started since.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Dataset, FetchError>) -> bool {
        if ticket.generation != self.generation {
            debug!(stale = ticket.generation, current = self.generation, "dropping stale fetch result");
            return false;
        }
        self.dataset = match result {
            Ok(dataset) => dataset,
            Err(e) => {
                gateway::degrade(&e, ticket.config.mode);
                Dataset::empty()
            }
        };
        info!(rows = self.dataset.rows.len(), columns = self.dataset.column_names.len(), "dataset resolved");
        self.render();
        self.set_loading(false);
        true
    }

    /// Transform the current dataset and draw it, then apply the theme.
    /// Returns whether a chart was drawn.
    pub fn render(&mut self) -> bool {
        let drawn = match self.frame() {
            Some(frame) => {
                self.surface.draw(&frame);
                true
            }
            None => false,
        };
        self.surface.apply_theme(&self.state.tags.resolve());
        drawn
    }

    /// What `render` would draw right now.
    pub fn frame(&self) -> Option<ChartFrame> {
        let spec = transform::build_for(&self.state.config, &self.dataset)?;
        Some(ChartFrame {
            title: self.state.config.title.clone(),
            description: self.state.config.description.clone(),
            spec,
        })
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.surface.set_loading(loading);
    }

    // ---- resize --------------------------------------------------------

    pub fn on_resize(&mut self, now: Instant) {
        self.resize.trigger(now);
    }

    /// Resize the drawn chart if the debounce period has elapsed.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        if self.resize.fire(now) {
            self.surface.resize();
            true
        } else {
            false
        }
    }
}
