use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use super::{Engine, Ticker};
use crate::domain::{Board, Pattern, Placement, SavedState, Settings};
use crate::error::LifeError;

/// Callback receiving a fresh snapshot after every change.
pub type Observer = Box<dyn FnMut(&Board, &Settings)>;

/// Handle returned by [`Playback::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Playback coordinates the engine with a running/stopped state,
/// a tick timer and the observers that render the board.
///
/// Everything runs on the caller's thread. The host loop calls
/// [`advance`](Self::advance) with frame time; while running, each elapsed
/// interval advances one generation and publishes it.
pub struct Playback {
    engine: Engine,
    /// `Some` while running
    ticker: Option<Ticker>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Playback {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            ticker: None,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Read access to the engine's accessors
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Register an observer. It is called once right away with the
    /// current snapshot.
    pub fn subscribe(&mut self, mut observer: impl FnMut(&Board, &Settings) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        observer(&self.engine.board(), &self.engine.settings());
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Unknown or already removed ids are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn publish(&mut self) {
        let board = self.engine.board();
        let settings = self.engine.settings();
        for (_, observer) in &mut self.observers {
            observer(&board, &settings);
        }
    }

    /// Begin ticking at the current speed. No-op while already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let interval = self.engine.settings().interval();
        self.ticker = Some(Ticker::new(interval));
        info!(?interval, "playback started");
        self.publish();
    }

    /// Stop ticking. No-op while already stopped. Once this returns no
    /// pending tick can fire.
    pub fn stop(&mut self) {
        if self.ticker.take().is_none() {
            return;
        }
        info!(generation = self.engine.generation(), "playback stopped");
        self.publish();
    }

    /// Feed elapsed frame time. While running, a due tick advances one
    /// generation and publishes. Returns whether a tick fired.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let Some(ticker) = self.ticker.as_mut() else {
            return false;
        };
        if !ticker.advance(elapsed) {
            return false;
        }
        self.engine.step();
        debug!(generation = self.engine.generation(), "tick");
        self.publish();
        true
    }

    /// Time until the next tick, `None` when stopped
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.ticker.as_ref().map(Ticker::remaining)
    }

    /// How long the host should wait before its next `advance`: at most
    /// `frame`, and never past a pending tick
    pub fn next_frame(&self, frame: Duration) -> Duration {
        self.until_next_tick().map_or(frame, |next| next.min(frame))
    }

    /// Advance exactly one generation without touching running state
    pub fn step(&mut self) {
        self.engine.step();
        self.publish();
    }

    /// Change the tick interval. While running the timer is re-armed so the
    /// new interval applies from the next tick.
    pub fn set_speed(&mut self, speed: u64) -> Result<(), LifeError> {
        let settings = self.engine.settings().with_speed(speed);
        self.engine.set_settings(settings)?;
        if self.is_running() {
            self.stop();
            self.start();
        }
        self.publish();
        Ok(())
    }

    /// Resize the board, which resets it to all dead. Running state is kept.
    pub fn set_size(&mut self, rows: usize, cols: usize) -> Result<(), LifeError> {
        let settings = self.engine.settings().with_size(rows, cols);
        self.engine.set_settings(settings)?;
        self.publish();
        Ok(())
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        self.engine.toggle_cell(row, col);
        self.publish();
    }

    pub fn randomize(&mut self) {
        self.engine.randomize_board();
        self.publish();
    }

    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R) {
        self.engine.randomize_board_with(rng);
        self.publish();
    }

    pub fn clear(&mut self) {
        self.engine.clear_board();
        self.publish();
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern, placement: Placement) {
        self.engine.apply_pattern(pattern, placement);
        self.publish();
    }

    /// Clear the board and center `pattern` on it. An empty pattern just
    /// clears.
    pub fn select_pattern(&mut self, pattern: &Pattern) {
        self.engine.clear_board();
        if !pattern.is_empty() {
            self.engine.apply_pattern(pattern, Placement::Centered);
        }
        self.publish();
    }

    /// Look up a catalog pattern by name and select it
    pub fn select_pattern_named(&mut self, name: &str) -> Result<(), LifeError> {
        let pattern = self
            .engine
            .find_pattern(name)
            .cloned()
            .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))?;
        self.select_pattern(&pattern);
        Ok(())
    }

    pub fn patterns(&self) -> &[Pattern] {
        self.engine.patterns()
    }

    pub fn save_state(&mut self, name: &str) {
        self.engine.save_state(name);
        self.publish();
    }

    pub fn saved_states(&self) -> Vec<SavedState> {
        self.engine.saved_states()
    }

    /// Restore a snapshot. Publishes only when one was found.
    pub fn load_state(&mut self, name: &str) -> bool {
        let loaded = self.engine.load_state(name);
        if loaded {
            self.publish();
        }
        loaded
    }

    pub fn delete_state(&mut self, name: &str) {
        self.engine.delete_state(name);
        self.publish();
    }
}
