//! Mascot behavior engine: mood state machine, timers, bubble, pointer
//! tracking and per-frame pose parameters for a small animated character.

pub mod config;
pub mod controller;
pub mod idle_actions;
pub mod interface;
pub mod mood;
pub mod pointer;
pub mod pose;
pub mod random;
pub mod runtime;
pub mod timers;

#[cfg(test)]
mod tests;

pub use config::MascotConfig;
pub use controller::MascotController;
pub use idle_actions::IdleAction;
pub use interface::{BubbleState, MascotError, MascotInput, MascotView, RandomSource};
pub use mood::Mood;
pub use pointer::{PointerPosition, PointerTracker, Viewport};
pub use pose::{compute_pose, Pose};
pub use random::{ScriptedRandom, StdRandom};
pub use runtime::{MascotHandle, MascotRuntime};
