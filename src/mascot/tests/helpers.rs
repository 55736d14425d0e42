use crate::mascot::config::MascotConfig;
use crate::mascot::controller::MascotController;
use crate::mascot::interface::MascotInput;
use crate::mascot::pointer::PointerPosition;
use crate::mascot::random::ScriptedRandom;

// ── Timeline constants (default config, mounted at 0) ──────

/// Greeting wave starts.
pub const BOOT_WAVE_AT: u64 = 2000;
/// Greeting wave is over and the mascot is idle again.
pub const BOOT_SETTLED_AT: u64 = 5000;
/// First poll that sees 8 s of quiet when nobody touched anything.
pub const FIRST_IDLE_ACTION_AT: u64 = 8000;

// ── Controller setup ────────────────────────────────────

/// A controller mounted at t=0 with scripted random picks.
pub fn mounted(picks: impl IntoIterator<Item = usize>) -> MascotController {
    mounted_with(MascotConfig::default(), picks)
}

pub fn mounted_with(
    config: MascotConfig,
    picks: impl IntoIterator<Item = usize>,
) -> MascotController {
    let mut controller = MascotController::new(config, ScriptedRandom::new(picks));
    controller.mount(0);
    controller
}

/// Visible bubble text, if any.
pub fn bubble(controller: &MascotController) -> Option<String> {
    controller.view().and_then(|v| v.bubble)
}

pub fn pointer_move(x: f32, y: f32) -> MascotInput {
    MascotInput::PointerMove(PointerPosition::new(x, y))
}

/// Config whose idle actions never trigger on their own.
pub fn quiet_config() -> MascotConfig {
    MascotConfig {
        idle_threshold_ms: u64::MAX / 4,
        ..MascotConfig::default()
    }
}
