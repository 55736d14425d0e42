pub mod config;
pub mod mascot;

pub use mascot::{
    MascotConfig, MascotController, MascotError, MascotHandle, MascotInput, MascotRuntime,
    MascotView, Mood,
};
