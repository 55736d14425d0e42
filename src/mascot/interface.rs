use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use super::mood::Mood;
use super::pointer::PointerPosition;

// ── Error Types ────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MascotError {
    #[error("Invalid mascot config: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] serde_json::Error),

    #[error("Mascot runtime has shut down")]
    RuntimeClosed,

    #[error("Mascot runtime task failed: {0}")]
    TaskFailed(String),
}

// For host command return compatibility
impl From<MascotError> for String {
    fn from(e: MascotError) -> String {
        e.to_string()
    }
}

// ── Random Capability ──────────────────────────────────

/// Source of every random pick the controller makes.
///
/// Injected rather than called globally so tests can script the outcome
/// of idle-action and click-message selection.
pub trait RandomSource: Send {
    /// Return an index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

// ── Inputs ─────────────────────────────────────────────

/// Everything the host page can tell the mascot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum MascotInput {
    /// Pointer moved anywhere on the page (already normalized).
    PointerMove(PointerPosition),
    /// Click anywhere on the page.
    Click,
    KeyPress,
    /// Click on the character itself.
    CharacterClick,
    Minimize,
    Restore,
    /// Close button on the speech bubble.
    DismissBubble,
    /// Pointer entered (`true`) or left (`false`) the character.
    Hover(bool),
}

impl MascotInput {
    /// Whether this input counts as user activity for the idle clock.
    pub fn is_activity(&self) -> bool {
        matches!(
            self,
            MascotInput::PointerMove(_) | MascotInput::Click | MascotInput::KeyPress
        )
    }
}

// ── Snapshots ──────────────────────────────────────────

/// Speech bubble overlay. The message is kept after hiding so a re-show
/// without new text is possible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BubbleState {
    pub visible: bool,
    pub message: String,
}

/// What the renderer needs to draw the widget this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MascotView {
    pub mood: Mood,
    /// Visible bubble text, `None` when hidden.
    pub bubble: Option<String>,
    pub minimized: bool,
}
