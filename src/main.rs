//! mascot-sim: replays a short interaction script against the mascot
//! runtime and logs every view it publishes.
//!
//! Usage: `mascot-sim [config.json]`. Without an argument the config is read
//! from the platform config dir, falling back to defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use mascot_engine::mascot::config::{load_config, try_load_config};
use mascot_engine::mascot::{
    MascotConfig, MascotInput, MascotRuntime, PointerTracker, StdRandom, Viewport,
};
use tracing_subscriber::EnvFilter;

const APP_DIR: &str = "mascot-engine";
const CONFIG_FILE: &str = "mascot.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mascot_engine=debug,mascot_sim=info")),
        )
        .init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => try_load_config(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => match mascot_engine::config::default_config_path(APP_DIR, CONFIG_FILE) {
            Some(path) => load_config(&path),
            None => MascotConfig::default(),
        },
    };

    let handle = MascotRuntime::spawn(config, StdRandom::from_entropy());

    let mut views = handle.subscribe();
    let logger = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            match views.borrow_and_update().clone() {
                Some(view) => tracing::info!(
                    mood = %view.mood,
                    bubble = view.bubble.as_deref().unwrap_or("-"),
                    minimized = view.minimized,
                    "view"
                ),
                None => tracing::info!("view cleared"),
            }
        }
    });

    let mut pointer = PointerTracker::new(Viewport::new(1280.0, 800.0));
    let script = [
        (2500, MascotInput::PointerMove(pointer.track(900.0, 200.0))),
        (9000, MascotInput::KeyPress),
        (12_000, MascotInput::Hover(true)),
        (100, MascotInput::CharacterClick),
        (3000, MascotInput::Hover(false)),
        (500, MascotInput::Minimize),
        (10_000, MascotInput::Restore),
        (3000, MascotInput::DismissBubble),
    ];

    for (wait_ms, input) in script {
        tokio::time::sleep(Duration::from_millis(wait_ms)).await;
        tracing::info!(?input, "send");
        handle.send(input)?;
    }

    tokio::time::sleep(Duration::from_millis(500)).await;
    handle.shutdown().await?;
    logger.await.context("view logger panicked")?;
    Ok(())
}
