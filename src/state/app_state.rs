//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{ClockSnapshot, ClockState, DurationPicker, PickerField, Player};

/// Result of a control action on the clock
#[derive(Debug, Clone)]
pub struct ClockUpdate {
    /// Whether the action changed anything
    pub applied: bool,
    /// Clock after the action
    pub clock: ClockSnapshot,
}

/// Shared state of the server: the clock, the duration picker and channels
#[derive(Debug)]
pub struct AppState {
    /// The clock itself
    pub clock: Arc<Mutex<ClockState>>,
    /// Draft of the duration dialog
    pub picker: Arc<Mutex<DurationPicker>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Run-state notifications, sent for every control action and flag fall
    pub state_change_tx: broadcast::Sender<ClockSnapshot>,
    /// Latest clock face, updated on every change including ticks.
    /// Read by `GET /clock` and `GET /status`.
    pub clock_update_tx: watch::Sender<ClockSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _clock_update_rx: watch::Receiver<ClockSnapshot>,
}

impl AppState {
    /// Create a new AppState with both clocks on `duration`
    pub fn new(port: u16, host: String, duration: Duration) -> Self {
        let clock = ClockState::new(duration);
        let (state_change_tx, _) = broadcast::channel(100);
        let (clock_update_tx, clock_update_rx) = watch::channel(clock.snapshot());

        Self {
            picker: Arc::new(Mutex::new(DurationPicker::from_duration(clock.configured_duration()))),
            clock: Arc::new(Mutex::new(clock)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            state_change_tx,
            clock_update_tx,
            _clock_update_rx: clock_update_rx,
        }
    }

    /// Apply a control action to the clock and notify listeners if it changed
    pub fn update_clock<F>(&self, action: &str, updater: F) -> Result<ClockUpdate, String>
    where
        F: FnOnce(&mut ClockState) -> bool,
    {
        let mut clock = self.clock.lock()
            .map_err(|e| format!("Failed to lock clock state: {}", e))?;

        let applied = updater(&mut *clock);
        let snapshot = clock.snapshot();
        if applied {
            // Published under the lock so the watched face never goes backwards
            self.publish(&snapshot);
        }
        drop(clock);

        if !applied {
            debug!("Action '{}' ignored in current clock state", action);
            return Ok(ClockUpdate { applied, clock: snapshot });
        }

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.notify_state_change(snapshot.clone());

        Ok(ClockUpdate { applied, clock: snapshot })
    }

    /// Tap a player's clock
    pub fn tap(&self, player: Player) -> Result<ClockUpdate, String> {
        let update = self.update_clock(&format!("tap-{}", player.number()), |clock| clock.tap(player))?;
        if update.applied {
            info!("Tap on {} clock, active: {:?}", player, update.clock.active_player);
        }
        Ok(update)
    }

    /// Pause or resume the game
    pub fn toggle_pause(&self) -> Result<ClockUpdate, String> {
        let update = self.update_clock("pause", |clock| clock.toggle_pause())?;
        if update.applied {
            info!("Clock {}", if update.clock.paused { "paused" } else { "resumed" });
        }
        Ok(update)
    }

    /// Reset both clocks, optionally to a new duration
    pub fn reset(&self, duration: Option<Duration>) -> Result<ClockUpdate, String> {
        let update = self.update_clock("reset", |clock| {
            clock.reset(duration);
            true
        })?;
        info!("Clocks reset to {}s", update.clock.configured_seconds);
        self.reseed_picker(&update.clock);
        Ok(update)
    }

    /// Configure a new starting time; refused while a clock is running
    pub fn set_duration(&self, minutes: u64, seconds: u64) -> Result<ClockUpdate, String> {
        let update = self.update_clock("duration", |clock| clock.set_duration(minutes, seconds))?;
        if update.applied {
            info!("Duration set to {}s", update.clock.configured_seconds);
            self.reseed_picker(&update.clock);
        }
        Ok(update)
    }

    /// Advance the running clock by one tick.
    ///
    /// Ticks only refresh the clock face; a flag fall is also sent as a
    /// state change so the tick task stops.
    pub fn tick(&self) -> Result<ClockSnapshot, String> {
        let mut clock = self.clock.lock()
            .map_err(|e| format!("Failed to lock clock state: {}", e))?;

        let was_running = clock.is_running();
        let ticked = clock.tick();
        let snapshot = clock.snapshot();
        if ticked {
            self.publish(&snapshot);
        }
        drop(clock);

        if ticked {
            if was_running && snapshot.game_over {
                if let Some(player) = snapshot.flagged {
                    info!("Flag fell for {}", player);
                }
                self.notify_state_change(snapshot.clone());
            }
        }

        Ok(snapshot)
    }

    /// Get current clock snapshot
    pub fn get_clock(&self) -> Result<ClockSnapshot, String> {
        self.clock.lock()
            .map(|clock| clock.snapshot())
            .map_err(|e| format!("Failed to lock clock state: {}", e))
    }

    /// Get current picker draft
    pub fn get_picker(&self) -> Result<DurationPicker, String> {
        self.picker.lock()
            .map(|picker| *picker)
            .map_err(|e| format!("Failed to lock duration picker: {}", e))
    }

    /// Step a picker column up or down
    pub fn adjust_picker(&self, field: PickerField, delta: i64) -> Result<DurationPicker, String> {
        let mut picker = self.picker.lock()
            .map_err(|e| format!("Failed to lock duration picker: {}", e))?;

        picker.adjust(field, delta);
        debug!("Picker adjusted: {}m {}s", picker.minutes, picker.seconds);
        Ok(*picker)
    }

    /// Apply the picker draft to the clock
    pub fn confirm_picker(&self) -> Result<ClockUpdate, String> {
        let picker = self.get_picker()?;
        self.set_duration(picker.minutes, picker.seconds)
    }

    /// Latest published clock face, read without taking the clock lock
    pub fn latest_clock(&self) -> ClockSnapshot {
        self.clock_update_tx.borrow().clone()
    }

    /// Subscribe to clock face updates, for front ends that redraw on change
    pub fn subscribe_clock(&self) -> watch::Receiver<ClockSnapshot> {
        self.clock_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn publish(&self, snapshot: &ClockSnapshot) {
        // send_replace never fails, the receiver above keeps the channel open
        self.clock_update_tx.send_replace(snapshot.clone());
    }

    fn notify_state_change(&self, snapshot: ClockSnapshot) {
        // No receivers just means the tick task has not subscribed yet
        if let Err(e) = self.state_change_tx.send(snapshot) {
            debug!("No listeners for state change: {}", e);
        }
    }

    fn reseed_picker(&self, clock: &ClockSnapshot) {
        match self.picker.lock() {
            Ok(mut picker) => {
                *picker = DurationPicker::from_duration(Duration::from_secs(clock.configured_seconds));
            }
            Err(e) => warn!("Failed to lock duration picker: {}", e),
        }
    }
}
