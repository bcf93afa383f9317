use std::io;
use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::layout_engine::plan::WmOp;
use crate::model::Frame;

#[derive(Debug, Error)]
pub enum YabaiError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("yabai command failed: {0}")]
    Failed(String),
    #[error("could not parse yabai output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Window record as emitted by `yabai -m query --windows`. Only the fields
/// the tree reconstruction and the commands consume are kept; unknown keys
/// are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawWindow {
    pub id: u32,
    #[serde(default)]
    pub pid: i32,
    pub app: String,
    pub title: String,
    pub frame: Frame,
    #[serde(default)]
    pub space: u64,
    #[serde(default)]
    pub display: u32,
    #[serde(default)]
    pub split_type: Option<String>,
    #[serde(default)]
    pub split_child: Option<String>,
    #[serde(default)]
    pub stack_index: Option<u32>,
    #[serde(default)]
    pub has_focus: bool,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_floating: bool,
    #[serde(default)]
    pub is_minimized: bool,
}

/// Space record as emitted by `yabai -m query --spaces`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawSpace {
    pub id: u64,
    #[serde(default)]
    pub uuid: String,
    pub index: u32,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub space_type: String,
    #[serde(default)]
    pub display: u32,
    #[serde(default)]
    pub windows: Vec<u32>,
    #[serde(default)]
    pub has_focus: bool,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_native_fullscreen: bool,
}

impl RawSpace {
    pub fn is_bsp(&self) -> bool { self.space_type == "bsp" }
}

/// Thin adapter around the yabai binary. Queries return deserialized
/// records; mutations are expressed as [`WmOp`] values and executed one at a
/// time, strictly in plan order.
pub struct Yabai {
    program: String,
}

impl Yabai {
    pub fn new(program: impl Into<String>) -> Self { Yabai { program: program.into() } }

    fn call(&self, args: &[&str]) -> Result<String, YabaiError> {
        debug!("> {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program).args(args).output().map_err(|source| {
            YabaiError::Spawn {
                program: self.program.clone(),
                source,
            }
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(YabaiError::Failed(stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn window_command(&self, window: u32, args: &[&str]) -> Result<(), YabaiError> {
        let id = window.to_string();
        let mut full = vec!["-m", "window", id.as_str()];
        full.extend_from_slice(args);
        self.call(&full).map(drop)
    }

    /// All windows of one space. `"focused"` selects the focused space.
    pub fn query_windows(&self, space: &str) -> Result<Vec<RawWindow>, YabaiError> {
        let mut args = vec!["-m", "query", "--windows", "--space"];
        if space != "focused" {
            args.push(space);
        }
        Ok(serde_json::from_str(&self.call(&args)?)?)
    }

    pub fn query_window(&self, window: &str) -> Result<RawWindow, YabaiError> {
        let mut args = vec!["-m", "query", "--windows", "--window"];
        if window != "focused" {
            args.push(window);
        }
        Ok(serde_json::from_str(&self.call(&args)?)?)
    }

    pub fn query_space(&self, space: &str) -> Result<RawSpace, YabaiError> {
        let mut args = vec!["-m", "query", "--spaces", "--space"];
        if space != "focused" {
            args.push(space);
        }
        Ok(serde_json::from_str(&self.call(&args)?)?)
    }

    pub fn close_window(&self, window: u32) -> Result<(), YabaiError> {
        self.window_command(window, &["--close"])
    }

    /// Executes one planned operation. A warp carrying an insert direction
    /// is realised as `--insert` on the target followed by the warp itself,
    /// which is how yabai expects the pair to arrive.
    pub fn execute(&self, op: &WmOp) -> Result<(), YabaiError> {
        match op {
            WmOp::Focus { window } => self.window_command(*window, &["--focus"]),
            WmOp::Warp {
                window,
                target,
                insert_direction,
            } => {
                if let Some(direction) = insert_direction {
                    self.execute(&WmOp::SetInsertDirection {
                        window: *target,
                        direction: *direction,
                    })?;
                }
                self.window_command(*window, &["--warp", &target.to_string()])
            }
            WmOp::Stack { window, target } => {
                self.window_command(*window, &["--stack", &target.to_string()])
            }
            WmOp::ToggleFloat { window } => self.window_command(*window, &["--toggle", "float"]),
            WmOp::Resize { window, edge, dx, dy } => {
                self.window_command(*window, &["--resize", &format!("{edge}:{dx}:{dy}")])
            }
            WmOp::SetInsertDirection { window, direction } => {
                self.window_command(*window, &["--insert", &direction.to_string()])
            }
        }
    }

    /// Runs a plan in order, stopping at the first failure. Later operations
    /// assume the window state left behind by earlier ones, so nothing is
    /// retried or reordered here.
    pub fn run_plan(&self, ops: &[WmOp]) -> Result<(), YabaiError> {
        for op in ops {
            self.execute(op)?;
        }
        Ok(())
    }
}
