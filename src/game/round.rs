//! Round Operations
//!
//! The round lifecycle state machine, the pair spawner and the two-slot
//! match evaluator. Everything here is synchronous and pure: timers live in
//! the runtime layer and enter through [`spawn_tick`] and [`end`], user picks
//! enter through [`select`]. Operations invoked in an invalid phase are
//! silent no-ops, never errors.

use tracing::{debug, info};

use crate::core::color::Rgba;
use crate::core::geom::{Point, Rect, Size};
use crate::core::rng::DeterministicRng;
use crate::game::config::RoundConfig;
use crate::game::events::GameEvent;
use crate::game::score::ScoreBoard;
use crate::game::state::{RoundPhase, RoundState, Token, TokenId};

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Start a fresh round.
///
/// Valid from any phase: an in-flight round is discarded WITHOUT recording
/// its score (only [`end`] ranks a result). Leftover tokens are cleared with
/// instant (zero-fade) removal events, counters reset, the time budget is
/// refilled from the configured round duration, and the phase becomes
/// `Running`. The caller is responsible for (re)arming timers.
pub fn start_new_game(state: &mut RoundState, config: &RoundConfig) {
    // Clear any leftover tokens from the previous round
    let leftovers: Vec<TokenId> = state.live_tokens().map(|t| t.id).collect();
    for id in leftovers {
        state.push_event(GameEvent::token_removed(id, 0.0));
    }
    state.tokens.clear();

    state.first_pick = None;
    state.second_pick = None;
    state.pairs_spawned = 0;
    state.pairs_matched = 0;
    state.duration = config.round_duration();
    state.remaining = state.duration;
    state.phase = RoundPhase::Running;

    info!(duration = state.duration, "new game started");
    emit_status(state);
}

/// Suspend a running round, preserving the remaining time budget.
///
/// No-op unless the phase is `Running`. The caller cancels both timers.
pub fn pause(state: &mut RoundState) {
    if state.phase != RoundPhase::Running {
        debug!(phase = ?state.phase, "pause ignored");
        return;
    }

    state.phase = RoundPhase::Paused;
    info!(remaining = state.remaining, "round paused");
    emit_status(state);
}

/// Resume a paused round.
///
/// No-op unless the phase is `Paused`. The caller re-arms the spawn timer
/// from the CURRENT spawn interval and the end timer from the CURRENT
/// remaining budget, not the full round duration.
pub fn resume(state: &mut RoundState) {
    if state.phase != RoundPhase::Paused {
        debug!(phase = ?state.phase, "resume ignored");
        return;
    }

    state.phase = RoundPhase::Running;
    info!(remaining = state.remaining, "round resumed");
    emit_status(state);
}

/// End the round: rank the final match count and pin the budget to zero.
///
/// Fired by the round-end timer or called externally. Valid from `Running`
/// or `Paused`; no-op otherwise, so a late timer callback after an external
/// end is harmless. Only `start_new_game` leaves the `Ended` phase.
pub fn end(state: &mut RoundState, scores: &mut ScoreBoard) {
    match state.phase {
        RoundPhase::Running | RoundPhase::Paused => {}
        _ => {
            debug!(phase = ?state.phase, "end ignored");
            return;
        }
    }

    state.phase = RoundPhase::Ended;
    state.remaining = 0.0;
    scores.record(state.pairs_matched);

    info!(
        pairs_matched = state.pairs_matched,
        scores = ?scores.as_array(),
        "round ended"
    );
    state.push_event(GameEvent::round_ended(state.pairs_matched, scores.as_array()));
    emit_status(state);
}

// =============================================================================
// PAIR SPAWNER
// =============================================================================

/// Handle one spawn-interval tick: create one matching pair.
///
/// Skipped entirely unless the round is `Running` (a late tick after pause
/// or end creates nothing and decrements nothing). Each spawn:
/// 1. draws one random size within the configured bounds,
/// 2. draws two independent positions such that the token fits entirely
///    inside the playfield (tokens may overlap each other),
/// 3. draws one shared color, with random alpha when enabled,
/// 4. creates both tokens atomically under a fresh pair id, and
/// 5. consumes one spawn interval from the remaining time budget, on top of
///    the independently armed end-of-round timer.
pub fn spawn_tick(state: &mut RoundState, config: &RoundConfig) {
    if state.phase != RoundPhase::Running {
        debug!(phase = ?state.phase, "spawn tick skipped");
        return;
    }

    // Draw in the reference order: size, both locations, then color
    let w = state
        .rng
        .next_f32_range(config.token_size_min(), config.token_size_max());
    let h = state
        .rng
        .next_f32_range(config.token_size_min(), config.token_size_max());
    let size = Size::new(w, h);

    let first_origin = random_origin(&mut state.rng, size, config.playfield);
    let second_origin = random_origin(&mut state.rng, size, config.playfield);
    let color = Rgba::random(&mut state.rng, config.random_alpha);

    let pair_id = state.alloc_pair_id();
    for origin in [first_origin, second_origin] {
        let id = state.alloc_token_id();
        let token = Token::new(id, pair_id, Rect::new(origin, size), color);
        state.tokens.insert(id, token.clone());
        state.push_event(GameEvent::token_spawned(token));
    }

    state.pairs_spawned += 1;
    state.remaining -= config.spawn_interval();

    debug!(
        %pair_id,
        size = %size,
        remaining = state.remaining,
        "pair spawned"
    );
    emit_status(state);
}

/// Draw a random top-left origin such that `size` fits inside `bounds`.
fn random_origin(rng: &mut DeterministicRng, size: Size, bounds: Size) -> Point {
    let x = rng.next_f32_range(0.0, (bounds.w - size.w).max(0.0));
    let y = rng.next_f32_range(0.0, (bounds.h - size.h).max(0.0));
    Point::new(x, y)
}

// =============================================================================
// SELECTION & MATCH EVALUATION
// =============================================================================

/// Handle a user pick reported by the playfield collaborator.
///
/// Ignored unless the round is `Running`; unknown and already-removed tokens
/// are ignored too. The pick arms the token and fills the first free
/// selection slot. Once both slots are occupied the pair is evaluated:
/// matching pair ids remove both tokens and score one match, differing pair
/// ids deselect both. Picking the SAME token twice fills both slots with it
/// and therefore evaluates as a match of one token; its sibling stays in
/// play. That behavior is intentional and pinned by tests.
pub fn select(state: &mut RoundState, config: &RoundConfig, id: TokenId) {
    if state.phase != RoundPhase::Running {
        debug!(phase = ?state.phase, %id, "select ignored");
        return;
    }

    match state.token_mut(id) {
        None => {
            debug!(%id, "select ignored: unknown token");
            return;
        }
        Some(token) if token.removed => {
            debug!(%id, "select ignored: token already removed");
            return;
        }
        Some(token) => {
            token.armed = true;
        }
    }
    state.push_event(GameEvent::token_armed(id));

    if state.first_pick.is_none() {
        state.first_pick = Some(id);
    } else {
        state.second_pick = Some(id);
    }

    if let (Some(first), Some(second)) = (state.first_pick, state.second_pick) {
        evaluate_picks(state, config, first, second);
    }
    emit_status(state);
}

/// Resolve two occupied selection slots into a match or a mismatch.
fn evaluate_picks(state: &mut RoundState, config: &RoundConfig, first: TokenId, second: TokenId) {
    let first_pair = state.token(first).map(|t| t.pair_id);
    let second_pair = state.token(second).map(|t| t.pair_id);
    let is_match = first_pair.is_some() && first_pair == second_pair;

    if is_match {
        let fade = config.fade_duration();
        // The slots may hold the same token; remove it once
        let picks: &[TokenId] = if first == second {
            &[first]
        } else {
            &[first, second]
        };
        for &id in picks {
            if let Some(token) = state.token_mut(id) {
                token.armed = false;
                token.removed = true;
            }
            state.push_event(GameEvent::token_removed(id, fade));
        }
        state.pairs_matched += 1;
        info!(pairs_matched = state.pairs_matched, "pair matched");
    } else {
        for id in [first, second] {
            if let Some(token) = state.token_mut(id) {
                token.armed = false;
            }
            state.push_event(GameEvent::token_deselected(id));
        }
        debug!(%first, %second, "mismatch");
    }

    state.first_pick = None;
    state.second_pick = None;
}

/// Queue a status-changed event reflecting the current counters.
fn emit_status(state: &mut RoundState) {
    let status = state.status();
    state.push_event(GameEvent::RoundStatusChanged(status));
}

// =============================================================================
// TESTS
// =============================================================================
