//! Round Runtime
//!
//! The timer and event-fanout layer around the pure round core. One driver
//! task owns the [`RoundState`] and consumes a single command channel, so
//! timer callbacks and user selections are serialized: no two core
//! operations ever execute concurrently.
//!
//! Two timers exist while a round runs: a repeating spawn-interval timer and
//! a one-shot round-end timer. `pause` (including visibility loss) cancels
//! both; `resume` re-arms the spawn timer from the CURRENT configured
//! interval and the end timer from the CURRENT remaining budget. Cancelling
//! timers that are already cancelled is a no-op. The spawn cadence re-reads
//! the shared config on every tick, so settings writes take effect on the
//! next tick.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::game::config::{RoundConfig, SharedConfig};
use crate::game::events::GameEvent;
use crate::game::round;
use crate::game::state::{RoundPhase, RoundState, TokenId};

/// Commands consumed by the driver task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    StartNewGame,
    Pause,
    Resume,
    End,
    Select(TokenId),
    VisibilityChanged(bool),
}

/// What woke the driver loop.
enum Wake {
    Command(Option<Command>),
    SpawnTick,
    RoundOver,
}

/// Runtime errors.
///
/// The core itself never fails (invalid operations are no-ops); these cover
/// the driver boundary only.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    /// The driver task is gone; no further commands can be delivered.
    #[error("round runtime has shut down")]
    Closed,
}

/// Handle used by presentation collaborators to drive a round and observe
/// its events.
///
/// Cheap to clone; the driver task stops once every handle is dropped.
#[derive(Clone)]
pub struct RoundHandle {
    session_id: Uuid,
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<GameEvent>,
}

impl RoundHandle {
    /// Identifier of this runtime session.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Subscribe to game events. Only events sent after subscribing are
    /// delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Start a fresh round, discarding any round in flight.
    pub async fn start_new_game(&self) -> Result<(), RuntimeError> {
        self.send(Command::StartNewGame).await
    }

    /// Pause the running round (no-op if not running).
    pub async fn pause(&self) -> Result<(), RuntimeError> {
        self.send(Command::Pause).await
    }

    /// Resume the paused round (no-op if not paused).
    pub async fn resume(&self) -> Result<(), RuntimeError> {
        self.send(Command::Resume).await
    }

    /// End the round now instead of waiting for the round-end timer.
    pub async fn end(&self) -> Result<(), RuntimeError> {
        self.send(Command::End).await
    }

    /// Report a user pick on a token.
    pub async fn select(&self, token_id: TokenId) -> Result<(), RuntimeError> {
        self.send(Command::Select(token_id)).await
    }

    /// Report a screen visibility change. Loss of visibility pauses a
    /// running round; regained visibility resumes a non-idle one.
    pub async fn set_visible(&self, visible: bool) -> Result<(), RuntimeError> {
        self.send(Command::VisibilityChanged(visible)).await
    }

    async fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| RuntimeError::Closed)
    }
}

/// Spawn a round runtime on the current tokio runtime.
///
/// `config` is the session-shared configuration and score board; `seed`
/// seeds the round RNG so a session's spawn stream is replayable.
pub fn spawn(config: SharedConfig, seed: u64) -> RoundHandle {
    let (command_tx, command_rx) = mpsc::channel(64);
    let (event_tx, _) = broadcast::channel(256);
    let session_id = Uuid::new_v4();

    let driver = Driver {
        session_id,
        config,
        state: RoundState::new(seed),
        events: event_tx.clone(),
        commands: command_rx,
        spawn_deadline: None,
        end_deadline: None,
    };
    tokio::spawn(driver.run());

    RoundHandle {
        session_id,
        commands: command_tx,
        events: event_tx,
    }
}

/// The driver task: owns the round state and both timers.
struct Driver {
    session_id: Uuid,
    config: SharedConfig,
    state: RoundState,
    events: broadcast::Sender<GameEvent>,
    commands: mpsc::Receiver<Command>,
    /// Next spawn-tick deadline; None while no round is running
    spawn_deadline: Option<Instant>,
    /// Round-end deadline; None while no round is running
    end_deadline: Option<Instant>,
}

/// Sleep until an optional deadline; never wakes when there is none.
async fn maybe_sleep(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

impl Driver {
    async fn run(mut self) {
        info!(session = %self.session_id, "round runtime started");

        loop {
            let spawn_at = self.spawn_deadline;
            let end_at = self.end_deadline;

            let wake = tokio::select! {
                command = self.commands.recv() => Wake::Command(command),
                _ = maybe_sleep(spawn_at), if spawn_at.is_some() => Wake::SpawnTick,
                _ = maybe_sleep(end_at), if end_at.is_some() => Wake::RoundOver,
            };

            match wake {
                Wake::Command(Some(command)) => self.handle_command(command).await,
                Wake::Command(None) => break, // every handle dropped
                Wake::SpawnTick => self.on_spawn_tick().await,
                Wake::RoundOver => self.end_round().await,
            }
            self.flush_events();
        }

        info!(session = %self.session_id, "round runtime stopped");
    }

    async fn handle_command(&mut self, command: Command) {
        debug!(session = %self.session_id, ?command, "command");
        match command {
            Command::StartNewGame => {
                let config = self.round_config().await;
                round::start_new_game(&mut self.state, &config);
                self.arm_timers(&config);
            }
            Command::Pause | Command::VisibilityChanged(false) => {
                round::pause(&mut self.state);
                self.cancel_timers();
            }
            Command::Resume | Command::VisibilityChanged(true) => {
                self.resume_round().await;
            }
            Command::End => {
                self.end_round().await;
            }
            Command::Select(token_id) => {
                let config = self.round_config().await;
                round::select(&mut self.state, &config, token_id);
            }
        }
    }

    /// Resume a paused round, re-arming timers from current values.
    async fn resume_round(&mut self) {
        let was_paused = self.state.phase == RoundPhase::Paused;
        round::resume(&mut self.state);
        if was_paused && self.state.phase == RoundPhase::Running {
            let config = self.round_config().await;
            self.arm_timers(&config);
        }
    }

    /// End the round and record the result on the shared score board.
    async fn end_round(&mut self) {
        {
            let mut shared = self.config.write().await;
            round::end(&mut self.state, &mut shared.scores);
        }
        self.cancel_timers();
    }

    /// One spawn-interval tick: spawn a pair, then re-arm from the LIVE
    /// configured interval so settings changes apply to the next tick.
    async fn on_spawn_tick(&mut self) {
        let config = self.round_config().await;
        round::spawn_tick(&mut self.state, &config);

        if self.state.phase == RoundPhase::Running {
            self.spawn_deadline =
                Some(Instant::now() + Duration::from_secs_f64(config.spawn_interval()));
        } else {
            self.spawn_deadline = None;
        }
    }

    /// Arm the spawn timer from the configured interval and the end timer
    /// from the remaining budget.
    fn arm_timers(&mut self, config: &RoundConfig) {
        let now = Instant::now();
        self.spawn_deadline = Some(now + Duration::from_secs_f64(config.spawn_interval()));
        self.end_deadline = Some(now + Duration::from_secs_f64(self.state.remaining.max(0.0)));
    }

    /// Cancel both timers. Idempotent: cancelling a cancelled timer is a
    /// no-op.
    fn cancel_timers(&mut self) {
        self.spawn_deadline = None;
        self.end_deadline = None;
    }

    /// Drain core events into the broadcast channel. Lagging or absent
    /// subscribers are not an error.
    fn flush_events(&mut self) {
        for event in self.state.take_events() {
            let _ = self.events.send(event);
        }
    }

    async fn round_config(&self) -> RoundConfig {
        self.config.read().await.round.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::{self, GameConfig};
    use crate::game::events::RoundStatus;

    fn test_config(round_duration: f64, spawn_interval: f64) -> SharedConfig {
        let mut game = GameConfig::default();
        game.round.set_round_duration(round_duration);
        game.round.set_spawn_interval(spawn_interval);
        config::shared(game)
    }

    /// Receive events until one matches, returning it. Panics if the
    /// channel closes first.
    async fn recv_until<F>(rx: &mut broadcast::Receiver<GameEvent>, mut pred: F) -> GameEvent
    where
        F: FnMut(&GameEvent) -> bool,
    {
        loop {
            let event = rx.recv().await.expect("event channel closed");
            if pred(&event) {
                return event;
            }
        }
    }

    async fn recv_spawned_pair(rx: &mut broadcast::Receiver<GameEvent>) -> (TokenId, TokenId) {
        let first = recv_until(rx, |e| matches!(e, GameEvent::TokenSpawned { .. })).await;
        let second = recv_until(rx, |e| matches!(e, GameEvent::TokenSpawned { .. })).await;
        match (first, second) {
            (GameEvent::TokenSpawned { token: a }, GameEvent::TokenSpawned { token: b }) => {
                (a.id, b.id)
            }
            _ => unreachable!(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_spawns_until_end_timer() {
        // Ticks at 1s, 2s, 3s; the end timer fires at 3.5s.
        let shared = test_config(3.5, 1.0);
        let handle = spawn(shared, 42);
        let mut rx = handle.subscribe();

        handle.start_new_game().await.unwrap();

        let ended = recv_until(&mut rx, |e| matches!(e, GameEvent::RoundEnded { .. })).await;
        assert_eq!(
            ended,
            GameEvent::RoundEnded {
                pairs_matched: 0,
                scores: [0, 0, 0],
            }
        );

        // Final status: ended, budget pinned to zero, three pairs spawned
        let status = recv_until(&mut rx, |e| matches!(e, GameEvent::RoundStatusChanged(_))).await;
        let GameEvent::RoundStatusChanged(RoundStatus {
            phase,
            remaining,
            pairs_spawned,
            ..
        }) = status
        else {
            unreachable!()
        };
        assert_eq!(phase, RoundPhase::Ended);
        assert_eq!(remaining, 0.0);
        assert_eq!(pairs_spawned, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_through_handle_scores_match() {
        let shared = test_config(30.0, 1.0);
        let handle = spawn(shared.clone(), 7);
        let mut rx = handle.subscribe();

        handle.start_new_game().await.unwrap();
        let (a, b) = recv_spawned_pair(&mut rx).await;

        handle.select(a).await.unwrap();
        handle.select(b).await.unwrap();

        let removed = recv_until(&mut rx, |e| matches!(e, GameEvent::TokenRemoved { .. })).await;
        let GameEvent::TokenRemoved { fade_duration, .. } = removed else {
            unreachable!()
        };
        assert_eq!(fade_duration, config::DEFAULT_FADE_DURATION);

        handle.end().await.unwrap();
        let ended = recv_until(&mut rx, |e| matches!(e, GameEvent::RoundEnded { .. })).await;
        assert_eq!(
            ended,
            GameEvent::RoundEnded {
                pairs_matched: 1,
                scores: [1, 0, 0],
            }
        );

        // The shared board saw the result
        assert_eq!(shared.read().await.scores.as_array(), [1, 0, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_timers_and_preserves_budget() {
        let shared = test_config(30.0, 1.0);
        let handle = spawn(shared, 3);
        let mut rx = handle.subscribe();

        handle.start_new_game().await.unwrap();
        recv_spawned_pair(&mut rx).await;

        handle.pause().await.unwrap();
        let paused = recv_until(&mut rx, |e| {
            matches!(
                e,
                GameEvent::RoundStatusChanged(RoundStatus {
                    phase: RoundPhase::Paused,
                    ..
                })
            )
        })
        .await;
        let GameEvent::RoundStatusChanged(paused_status) = paused else {
            unreachable!()
        };

        // A long visibility gap: with both timers cancelled nothing fires
        tokio::time::advance(Duration::from_secs(60)).await;

        handle.resume().await.unwrap();
        let resumed = recv_until(&mut rx, |e| {
            matches!(
                e,
                GameEvent::RoundStatusChanged(RoundStatus {
                    phase: RoundPhase::Running,
                    ..
                })
            )
        })
        .await;
        let GameEvent::RoundStatusChanged(resumed_status) = resumed else {
            unreachable!()
        };

        // No spawn ticked during the gap, no budget was lost or gained
        assert_eq!(paused_status.pairs_spawned, 1);
        assert_eq!(resumed_status.pairs_spawned, 1);
        assert_eq!(resumed_status.remaining, paused_status.remaining);
    }

    #[tokio::test(start_paused = true)]
    async fn test_visibility_loss_pauses_and_gain_resumes() {
        let shared = test_config(30.0, 1.0);
        let handle = spawn(shared, 5);
        let mut rx = handle.subscribe();

        // Visibility gain while idle is a no-op
        handle.set_visible(true).await.unwrap();

        handle.start_new_game().await.unwrap();
        let started = recv_until(&mut rx, |e| matches!(e, GameEvent::RoundStatusChanged(_))).await;
        let GameEvent::RoundStatusChanged(status) = started else {
            unreachable!()
        };
        assert_eq!(status.phase, RoundPhase::Running);
        assert_eq!(status.remaining, 30.0);

        handle.set_visible(false).await.unwrap();
        recv_until(&mut rx, |e| {
            matches!(
                e,
                GameEvent::RoundStatusChanged(RoundStatus {
                    phase: RoundPhase::Paused,
                    ..
                })
            )
        })
        .await;

        handle.set_visible(true).await.unwrap();
        recv_until(&mut rx, |e| {
            matches!(
                e,
                GameEvent::RoundStatusChanged(RoundStatus {
                    phase: RoundPhase::Running,
                    ..
                })
            )
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_change_applies_to_next_tick() {
        let shared = test_config(30.0, 1.0);
        let handle = spawn(shared.clone(), 11);
        let mut rx = handle.subscribe();

        let started_at = Instant::now();
        handle.start_new_game().await.unwrap();

        // First tick at +1s (armed interval)
        recv_spawned_pair(&mut rx).await;

        // Slow the spawner down; the change is read on the NEXT tick
        shared.write().await.round.set_spawn_interval(2.0);

        // Second tick still fires on the old cadence at +2s, then re-arms
        // with the new interval; third tick lands at +4s.
        recv_spawned_pair(&mut rx).await;
        recv_spawned_pair(&mut rx).await;
        assert_eq!(Instant::now() - started_at, Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_mid_round() {
        let shared = test_config(5.0, 1.0);
        let handle = spawn(shared.clone(), 13);
        let mut rx = handle.subscribe();

        handle.start_new_game().await.unwrap();
        recv_spawned_pair(&mut rx).await;

        // Restart while running: counters reset, budget refilled
        handle.start_new_game().await.unwrap();
        let status = recv_until(&mut rx, |e| {
            matches!(
                e,
                GameEvent::RoundStatusChanged(RoundStatus {
                    pairs_spawned: 0,
                    ..
                })
            )
        })
        .await;
        let GameEvent::RoundStatusChanged(status) = status else {
            unreachable!()
        };
        assert_eq!(status.phase, RoundPhase::Running);
        assert_eq!(status.remaining, 5.0);

        // The discarded round never reached the score board
        assert_eq!(shared.read().await.scores.as_array(), [0, 0, 0]);
    }
}
