//! Mascot Runtime: background task that owns a controller and drives it
//! from real (tokio) time.
//!
//! Inputs arrive on an unbounded channel and are applied in arrival order.
//! Between inputs the task sleeps until the controller's next timer
//! deadline. After every step the current [`MascotView`] is published on a
//! watch channel; subscribers see `None` before mount and after shutdown.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::config::MascotConfig;
use super::controller::MascotController;
use super::interface::{MascotError, MascotInput, MascotView, RandomSource};

enum Command {
    Input(MascotInput),
    Shutdown,
}

pub struct MascotRuntime;

impl MascotRuntime {
    /// Spawn the driver task on the current tokio runtime.
    pub fn spawn(config: MascotConfig, random: impl RandomSource + 'static) -> MascotHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(None);
        let controller = MascotController::new(config, random);
        let task = tokio::spawn(drive(controller, rx, view_tx));
        MascotHandle { tx, view_rx, task }
    }
}

/// Host-side handle. Dropping it without calling [`MascotHandle::shutdown`]
/// still tears the task down once the channel closes.
pub struct MascotHandle {
    tx: mpsc::UnboundedSender<Command>,
    view_rx: watch::Receiver<Option<MascotView>>,
    task: JoinHandle<()>,
}

impl MascotHandle {
    pub fn send(&self, input: MascotInput) -> Result<(), MascotError> {
        self.tx
            .send(Command::Input(input))
            .map_err(|_| MascotError::RuntimeClosed)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<MascotView>> {
        self.view_rx.clone()
    }

    /// Latest published view.
    pub fn view(&self) -> Option<MascotView> {
        self.view_rx.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Unmount the controller, cancel its timers and wait for the task.
    pub async fn shutdown(self) -> Result<(), MascotError> {
        // The task may already be gone; joining below reports that.
        let _ = self.tx.send(Command::Shutdown);
        self.task
            .await
            .map_err(|e| MascotError::TaskFailed(e.to_string()))
    }
}

async fn drive(
    mut controller: MascotController,
    mut rx: mpsc::UnboundedReceiver<Command>,
    view_tx: watch::Sender<Option<MascotView>>,
) {
    let origin = Instant::now();
    let elapsed_ms = || origin.elapsed().as_millis() as u64;

    controller.mount(0);
    publish(&view_tx, &controller);

    loop {
        let wake_at = controller
            .next_deadline()
            .and_then(|ms| origin.checked_add(Duration::from_millis(ms)));

        tokio::select! {
            biased;
            cmd = rx.recv() => match cmd {
                Some(Command::Input(input)) => controller.handle(input, elapsed_ms()),
                Some(Command::Shutdown) | None => break,
            },
            _ = sleep_until(wake_at) => {
                controller.advance(elapsed_ms());
            }
        }

        publish(&view_tx, &controller);
    }

    controller.unmount();
    view_tx.send_replace(None);
    tracing::info!("mascot runtime stopped");
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn publish(view_tx: &watch::Sender<Option<MascotView>>, controller: &MascotController) {
    let next = controller.view();
    view_tx.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}
