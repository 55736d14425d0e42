//! Mascot Behavior Controller: decides which mood is visible and whether
//! the speech bubble is shown.
//!
//! The controller is a synchronous state machine on a virtual millisecond
//! clock. Its owner feeds it inputs with [`MascotController::handle`] and
//! lets time pass with [`MascotController::advance`]; due timers always run
//! before an input stamped with the same or a later instant.
//!
//! Every force-transition starts a new mood epoch and cancels the reversion
//! scheduled by the previous one. Reversion timers also carry their epoch,
//! so one that slips through never overwrites a newer mood.

use tracing::{debug, info, trace, warn};

use super::config::MascotConfig;
use super::idle_actions::pick;
use super::interface::{BubbleState, MascotInput, MascotView, RandomSource};
use super::mood::Mood;
use super::pointer::PointerPosition;
use super::pose::{compute_pose, Pose};
use super::timers::{FiredTimer, TimerId, TimerKind, TimerQueue};

pub struct MascotController {
    config: MascotConfig,
    random: Box<dyn RandomSource>,
    timers: TimerQueue,
    mounted: bool,
    now_ms: u64,

    mood: Mood,
    mood_epoch: u64,
    reversion: Option<TimerId>,

    bubble: BubbleState,
    bubble_generation: u64,
    bubble_hide: Option<TimerId>,

    minimized: bool,
    hovered: bool,
    pointer: PointerPosition,
    last_activity_ms: u64,
}

impl MascotController {
    pub fn new(config: MascotConfig, random: impl RandomSource + 'static) -> Self {
        Self {
            config,
            random: Box::new(random),
            timers: TimerQueue::new(),
            mounted: false,
            now_ms: 0,
            mood: Mood::Idle,
            mood_epoch: 0,
            reversion: None,
            bubble: BubbleState::default(),
            bubble_generation: 0,
            bubble_hide: None,
            minimized: false,
            hovered: false,
            pointer: PointerPosition::CENTER,
            last_activity_ms: 0,
        }
    }

    // ── Lifecycle ──────────────────────────────────────

    /// Second phase of initialization: start the clocks. Until this is
    /// called the controller renders nothing and ignores input.
    pub fn mount(&mut self, now_ms: u64) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.now_ms = now_ms;
        self.last_activity_ms = now_ms;
        self.mood = Mood::Idle;
        self.minimized = false;
        self.timers.schedule(
            now_ms.saturating_add(self.config.boot_delay_ms),
            TimerKind::BootGreeting,
        );
        self.timers.schedule(
            now_ms.saturating_add(self.config.poll_interval_ms),
            TimerKind::IdlePoll,
        );
        info!(now_ms, "mascot mounted");
    }

    /// Tear down: every pending timer is dropped and later calls are no-ops.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.timers.clear();
        self.reversion = None;
        self.bubble_hide = None;
        self.mounted = false;
        info!(now_ms = self.now_ms, "mascot unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // ── Driving ────────────────────────────────────────

    /// Fire every timer due at or before `now_ms`, in deadline order.
    /// Returns how many fired.
    pub fn advance(&mut self, now_ms: u64) -> usize {
        if !self.mounted {
            return 0;
        }
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(timer.deadline_ms);
            self.fire(timer);
            fired += 1;
        }
        self.now_ms = self.now_ms.max(now_ms);
        fired
    }

    /// Apply one input at `now_ms`, after catching up on due timers.
    pub fn handle(&mut self, input: MascotInput, now_ms: u64) {
        if !self.mounted {
            trace!(?input, "input before mount ignored");
            return;
        }
        self.advance(now_ms);
        match input {
            MascotInput::PointerMove(position) => self.pointer = position,
            MascotInput::CharacterClick => self.on_character_click(),
            MascotInput::Minimize => self.on_minimize(),
            MascotInput::Restore => self.on_restore(),
            MascotInput::DismissBubble => self.hide_bubble(),
            MascotInput::Hover(hovered) => self.hovered = hovered,
            MascotInput::Click | MascotInput::KeyPress => {}
        }
        if input.is_activity() {
            self.on_activity();
        }
    }

    pub fn next_deadline(&mut self) -> Option<u64> {
        self.timers.next_deadline()
    }

    // ── Observers ──────────────────────────────────────

    /// `None` until mounted: the first render is deliberately empty.
    pub fn view(&self) -> Option<MascotView> {
        if !self.mounted {
            return None;
        }
        Some(MascotView {
            mood: self.mood,
            bubble: if self.bubble.visible && !self.minimized {
                Some(self.bubble.message.clone())
            } else {
                None
            },
            minimized: self.minimized,
        })
    }

    /// Animation parameters for one frame, `None` while nothing is drawn.
    pub fn pose(&self, elapsed_secs: f32) -> Option<Pose> {
        if !self.mounted || self.minimized {
            return None;
        }
        Some(compute_pose(
            self.mood,
            elapsed_secs,
            self.pointer,
            self.hovered,
        ))
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn bubble(&self) -> &BubbleState {
        &self.bubble
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn pointer(&self) -> PointerPosition {
        self.pointer
    }

    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn config(&self) -> &MascotConfig {
        &self.config
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether a mood reversion is still scheduled.
    pub fn has_pending_reversion(&self) -> bool {
        self.timers
            .pending()
            .any(|(_, kind)| matches!(kind, TimerKind::MoodReversion { .. }))
    }

    // ── Input handlers ─────────────────────────────────

    fn on_activity(&mut self) {
        self.last_activity_ms = self.now_ms;
        if self.minimized || !self.mood.is_interruptible() {
            return;
        }
        debug!(mood = %self.mood, "activity interrupts mood");
        self.force_mood(Mood::Idle, None);
        self.hide_bubble();
    }

    fn on_character_click(&mut self) {
        if self.minimized {
            return;
        }
        self.last_activity_ms = self.now_ms;
        let message = pick(&self.config.click_messages, self.random.as_mut()).cloned();
        self.force_mood(Mood::Happy, Some((self.config.click_happy_ms, false)));
        if let Some(message) = message {
            self.show_bubble(message, None);
        }
    }

    fn on_minimize(&mut self) {
        if self.minimized {
            return;
        }
        self.minimized = true;
        // Nothing scheduled before minimizing may touch the mood afterwards.
        self.invalidate_reversion();
        self.hide_bubble();
        info!("mascot minimized");
    }

    fn on_restore(&mut self) {
        if !self.minimized {
            return;
        }
        self.minimized = false;
        self.last_activity_ms = self.now_ms;
        self.force_mood(Mood::Wave, Some((self.config.restore_wave_ms, true)));
        self.show_bubble(self.config.restore_message.clone(), None);
        info!("mascot restored");
    }

    // ── Timers ─────────────────────────────────────────

    fn fire(&mut self, timer: FiredTimer) {
        trace!(?timer, "timer fired");
        match timer.kind {
            TimerKind::BootGreeting => {
                if self.minimized {
                    return;
                }
                self.force_mood(Mood::Wave, Some((self.config.boot_wave_ms, false)));
                self.show_bubble(self.config.greeting.clone(), None);
            }
            TimerKind::IdlePoll => {
                // A poll that cannot move forward would fire forever.
                match timer.deadline_ms.checked_add(self.config.poll_interval_ms) {
                    Some(next) if next > timer.deadline_ms => {
                        self.timers.schedule(next, TimerKind::IdlePoll);
                    }
                    _ => warn!(deadline_ms = timer.deadline_ms, "idle poll stopped"),
                }
                self.check_idle();
            }
            TimerKind::MoodReversion {
                epoch,
                clear_bubble,
            } => {
                if self.reversion == Some(timer.id) {
                    self.reversion = None;
                }
                if epoch != self.mood_epoch || self.minimized {
                    trace!(epoch, current = self.mood_epoch, "stale reversion skipped");
                    return;
                }
                self.force_mood(Mood::Idle, None);
                if clear_bubble {
                    self.hide_bubble();
                }
            }
            TimerKind::BubbleHide { generation } => {
                if self.bubble_hide == Some(timer.id) {
                    self.bubble_hide = None;
                }
                if generation == self.bubble_generation {
                    self.hide_bubble();
                }
            }
        }
    }

    fn check_idle(&mut self) {
        let idle_for = self.now_ms.saturating_sub(self.last_activity_ms);
        if self.minimized || self.mood != Mood::Idle || idle_for < self.config.idle_threshold_ms {
            return;
        }
        let Some(action) = pick(&self.config.idle_actions, self.random.as_mut()).cloned() else {
            return;
        };
        debug!(mood = %action.mood, idle_for, "idle action");
        self.force_mood(action.mood, Some((action.duration_ms, false)));
        if let Some(message) = action.message {
            self.show_bubble(message, Some(self.config.bubble_auto_hide_ms));
        }
    }

    // ── Transitions ────────────────────────────────────

    /// Overwrite the mood and optionally schedule `(after_ms, clear_bubble)`
    /// reversion to idle.
    fn force_mood(&mut self, mood: Mood, revert: Option<(u64, bool)>) {
        self.invalidate_reversion();
        if self.mood != mood {
            debug!(from = %self.mood, to = %mood, "mood transition");
        }
        self.mood = mood;
        if let Some((after_ms, clear_bubble)) = revert {
            let id = self.timers.schedule(
                self.now_ms.saturating_add(after_ms),
                TimerKind::MoodReversion {
                    epoch: self.mood_epoch,
                    clear_bubble,
                },
            );
            self.reversion = Some(id);
        }
    }

    fn invalidate_reversion(&mut self) {
        self.mood_epoch += 1;
        if let Some(id) = self.reversion.take() {
            self.timers.cancel(id);
        }
    }

    fn show_bubble(&mut self, message: String, auto_hide_ms: Option<u64>) {
        self.bubble_generation += 1;
        if let Some(id) = self.bubble_hide.take() {
            self.timers.cancel(id);
        }
        self.bubble = BubbleState {
            visible: true,
            message,
        };
        if let Some(after_ms) = auto_hide_ms {
            let id = self.timers.schedule(
                self.now_ms.saturating_add(after_ms),
                TimerKind::BubbleHide {
                    generation: self.bubble_generation,
                },
            );
            self.bubble_hide = Some(id);
        }
    }

    fn hide_bubble(&mut self) {
        self.bubble_generation += 1;
        if let Some(id) = self.bubble_hide.take() {
            self.timers.cancel(id);
        }
        self.bubble.visible = false;
    }
}
