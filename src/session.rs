//! Replay sessions: an [`EngineCore`] driven by a JSON-lines script.
//!
//! Each script line is one [`ScriptEvent`]. The engine's actions are written
//! back as JSON lines, except `render_needed`, which has no meaning without a
//! canvas. Mutations go through the synchronizer when one is attached, and
//! acknowledged entities are upserted before the next event runs. Offline
//! sessions print the mutation itself.

use std::io::{BufRead, Write};

use floor_canvas::camera::Point;
use floor_canvas::config::ConfigUpdate;
use floor_canvas::engine::{Action, EngineCore, Notice, Zoom};
use floor_canvas::input::{Mode, Tool};
use floor_canvas::local::LocalElement;
use floor_canvas::search::SearchHit;
use floor_store::{FloorPlanStore, Synchronizer, fetch_floor_plan};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::CliError;

// =============================================================================
// SCRIPT
// =============================================================================

/// One line of a replay script. Coordinates are screen pixels except for
/// `drag`, whose target is in floor-plan pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Select a tool, or deselect with `null`.
    Tool {
        #[serde(default)]
        tool: Option<Tool>,
    },
    Click { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Dblclick,
    Drag {
        id: String,
        x: f64,
        y: f64,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
    },
    Undo,
    Redo,
    Clear,
    Zoom { zoom: Zoom },
    /// Shift the view by a screen-pixel delta.
    Pan { dx: f64, dy: f64 },
    Config { update: ConfigUpdate },
    SavePath,
    CancelPath,
    AddLocal { element: LocalElement },
    /// Print the footer state.
    Status,
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// `Script` with the 1-based line number when the line is not a valid event,
/// including a `drag` that carries only one of `width` and `height`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<ScriptEvent>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let event: ScriptEvent =
        serde_json::from_str(trimmed).map_err(|e| CliError::Script { line: line_no, message: e.to_string() })?;
    if let ScriptEvent::Drag { width, height, .. } = &event
        && width.is_some() != height.is_some()
    {
        return Err(CliError::Script { line: line_no, message: "drag needs both width and height, or neither".to_owned() });
    }
    Ok(Some(event))
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Footer state: mode, hint, counts and zoom.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename = "status", rename_all = "camelCase")]
pub struct Status {
    pub mode: Mode,
    pub hint: &'static str,
    pub element_count: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub zoom_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Action(Action),
    Status(Status),
}

// =============================================================================
// SESSION
// =============================================================================

pub struct Session<'a, S> {
    core: EngineCore,
    sync: Option<&'a Synchronizer<S>>,
}

impl<'a, S: FloorPlanStore> Session<'a, S> {
    /// `sync: None` runs offline.
    pub fn new(core: EngineCore, sync: Option<&'a Synchronizer<S>>) -> Self {
        Self { core, sync }
    }

    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    /// Select a floor plan and load its collections.
    ///
    /// Collections that fail to load come back as error notices; the rest of
    /// the plan stays usable.
    pub async fn open(&mut self, floor_plan_id: Option<&str>) -> Vec<Output> {
        self.core.set_floor_plan(floor_plan_id.map(str::to_owned));
        let Some(sync) = self.sync else {
            return Vec::new();
        };

        let fetch = fetch_floor_plan(sync.store(), floor_plan_id).await;
        for collection in fetch.collections {
            self.core.load(collection);
        }
        info!(elements = self.core.element_count(), failed = fetch.failed.len(), "floor plan loaded");

        fetch
            .failed
            .into_iter()
            .map(|(kind, e)| {
                let message = e.server_message().map_or_else(
                    || format!("Failed to load {}", kind.type_label()),
                    str::to_owned,
                );
                Output::Action(Action::Notify { notice: Notice::error(message) })
            })
            .collect()
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.core.search(query)
    }

    #[must_use]
    pub fn status(&self) -> Status {
        Status {
            mode: self.core.mode(),
            hint: self.core.hint(),
            element_count: self.core.element_count(),
            can_undo: self.core.can_undo(),
            can_redo: self.core.can_redo(),
            zoom_percent: self.core.camera.zoom_percent,
        }
    }

    /// Run one event and settle its actions.
    pub async fn handle(&mut self, event: ScriptEvent) -> Vec<Output> {
        if matches!(event, ScriptEvent::Status) {
            return vec![Output::Status(self.status())];
        }
        let core = &mut self.core;
        let actions = match event {
            ScriptEvent::Status => Vec::new(),
            ScriptEvent::Tool { tool } => core.set_tool(tool),
            ScriptEvent::Click { x, y } => core.on_click(Point::new(x, y)),
            ScriptEvent::Move { x, y } => core.on_pointer_move(Point::new(x, y)),
            ScriptEvent::Up => core.on_pointer_up(),
            ScriptEvent::Dblclick => core.on_double_click(),
            ScriptEvent::Drag { id, x, y, width, height } => core.on_drag_end(&id, Point::new(x, y), width.zip(height)),
            ScriptEvent::Undo => core.undo(),
            ScriptEvent::Redo => core.redo(),
            ScriptEvent::Clear => core.clear_all(),
            ScriptEvent::Zoom { zoom } => core.zoom(zoom),
            ScriptEvent::Pan { dx, dy } => core.pan(dx, dy),
            ScriptEvent::Config { update } => core.apply_config(update),
            ScriptEvent::SavePath => core.save_path(),
            ScriptEvent::CancelPath => core.cancel_path(),
            ScriptEvent::AddLocal { element } => core.add_local_element(element),
        };
        self.settle(actions).await
    }

    async fn settle(&mut self, actions: Vec<Action>) -> Vec<Output> {
        let mut out = Vec::new();
        for action in actions {
            match action {
                Action::RenderNeeded => {}
                Action::Mutation { mutation } => match self.sync {
                    Some(sync) => {
                        let outcome = sync.dispatch(&mutation).await;
                        if let Some(entity) = outcome.entity {
                            self.core.apply_remote(entity);
                        }
                        out.push(Output::Action(Action::Notify { notice: outcome.notice }));
                    }
                    None => {
                        debug!("offline; mutation printed, not sent");
                        out.push(Output::Action(Action::Mutation { mutation }));
                    }
                },
                other => out.push(Output::Action(other)),
            }
        }
        out
    }
}

/// Feed a whole script through `session`, writing one JSON line per output.
/// Returns the number of events run.
///
/// # Errors
///
/// Stops at the first unreadable or invalid line, or on a write failure.
pub async fn run_script<S, R, W>(session: &mut Session<'_, S>, reader: R, mut writer: W) -> Result<usize, CliError>
where
    S: FloorPlanStore,
    R: BufRead,
    W: Write,
{
    let mut events = 0_usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(CliError::ReadScript)?;
        let Some(event) = parse_line(index + 1, &line)? else {
            continue;
        };
        events += 1;
        for output in session.handle(event).await {
            write_json_line(&mut writer, &output)?;
        }
    }
    Ok(events)
}

/// Write `value` as one compact JSON line.
///
/// # Errors
///
/// Serialization or I/O failure.
pub fn write_json_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n").map_err(CliError::Write)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
