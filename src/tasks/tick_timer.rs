//! Clock tick background task

use std::sync::Arc;
use tokio::{
    sync::broadcast::{error::RecvError, Receiver},
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{clock_state::TICK, AppState, ClockSnapshot, Player};

/// Background task that ticks the running clock every 100ms.
///
/// The interval only exists while a player's clock is running; pause,
/// reset and flag fall drop it until the next state change starts a clock.
pub async fn tick_timer_task(state: Arc<AppState>) {
    info!("Starting tick timer task");

    let mut state_rx = state.state_change_tx.subscribe();

    // A clock may already be running if a tap beat the subscription
    let mut current = match state.get_clock() {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            error!("Failed to read clock state: {}", e);
            None
        }
    };

    loop {
        if let Some(snapshot) = current.take() {
            if let Some(active) = snapshot.active_player {
                debug!("Clock running for {}, starting tick interval", active);
                if !run_interval(&state, &mut state_rx, active).await {
                    break;
                }
            } else {
                debug!("Clock stopped, tick interval idle");
            }
        }

        current = match state_rx.recv().await {
            Ok(snapshot) => Some(snapshot),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Tick timer lagged behind {} state changes, resyncing", skipped);
                resync(&state)
            }
            Err(RecvError::Closed) => break,
        };
    }

    info!("State channel closed, stopping tick timer task");
}

/// Tick the clock until it stops running. Returns `false` once the state
/// channel is closed.
async fn run_interval(
    state: &AppState,
    state_rx: &mut Receiver<ClockSnapshot>,
    mut active: Player,
) -> bool {
    let mut interval = interval_at(Instant::now() + TICK, TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.tick() {
                    Ok(snapshot) if !snapshot.is_running() => {
                        debug!("Clock no longer running (game over: {}), cancelling tick interval", snapshot.game_over);
                        return true;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Failed to tick clock: {}", e);
                        return true;
                    }
                }
            }

            result = state_rx.recv() => {
                let snapshot = match result {
                    Ok(snapshot) => Some(snapshot),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Tick timer lagged behind {} state changes, resyncing", skipped);
                        resync(state)
                    }
                    Err(RecvError::Closed) => return false,
                };

                match snapshot.and_then(|s| s.active_player) {
                    None => {
                        debug!("Clock stopped, cancelling tick interval");
                        return true;
                    }
                    Some(next) if next != active => {
                        // The new player's clock starts a full tick after the switch
                        active = next;
                        interval.reset();
                    }
                    Some(_) => {}
                }
            }
        }
    }
}

fn resync(state: &AppState) -> Option<ClockSnapshot> {
    match state.get_clock() {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            error!("Failed to read clock state: {}", e);
            None
        }
    }
}
