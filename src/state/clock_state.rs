//! Clock state machine: two countdowns, turn switching, pause and reset

use std::{fmt, time::Duration};
use serde::{Deserialize, Serialize};

use crate::utils::format_clock;

/// Amount of time removed from the running clock on every tick
pub const TICK: Duration = Duration::from_millis(100);

/// Starting time for each player when nothing else is configured
pub const DEFAULT_DURATION: Duration = Duration::from_secs(300);

/// Shortest starting time a clock can be configured with
pub const MIN_DURATION: Duration = Duration::from_secs(1);

pub const MAX_MINUTES: u64 = 60;
pub const MAX_SECONDS: u64 = 59;

/// One of the two players
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Returns the other player
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Index into per-player arrays
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// Player from its 1-based number as shown on the clock face
    pub fn from_number(n: u8) -> Option<Player> {
        match n {
            1 => Some(Player::First),
            2 => Some(Player::Second),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// Builds a duration from picker values, clamping each field to its range
/// and the total to at least `MIN_DURATION`.
pub fn clamped_duration(minutes: u64, seconds: u64) -> Duration {
    let secs = minutes.min(MAX_MINUTES) * 60 + seconds.min(MAX_SECONDS);
    Duration::from_secs(secs).max(MIN_DURATION)
}

/// Complete state of the chess clock.
///
/// All operations are total: input that does not apply in the current
/// state is ignored and reported by returning `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockState {
    time_remaining: [Duration; 2],
    active_player: Option<Player>,
    first_move_made: bool,
    paused: bool,
    resume_target: Option<Player>,
    game_over: bool,
    flagged: Option<Player>,
    configured_duration: Duration,
}

impl ClockState {
    /// Create a fresh clock with both players on `duration`.
    ///
    /// A zero duration is raised to `MIN_DURATION`.
    pub fn new(duration: Duration) -> Self {
        let duration = if duration.is_zero() { MIN_DURATION } else { duration };
        Self {
            time_remaining: [duration; 2],
            active_player: None,
            first_move_made: false,
            paused: false,
            resume_target: None,
            game_over: false,
            flagged: None,
            configured_duration: duration,
        }
    }

    /// Handle a tap on `player`'s clock
    pub fn tap(&mut self, player: Player) -> bool {
        if self.paused || self.game_over {
            return false;
        }

        if !self.first_move_made {
            // Tapping your own clock hands the move to the opponent
            self.active_player = Some(player.opponent());
            self.first_move_made = true;
            return true;
        }

        match self.active_player {
            Some(active) if active == player => {
                self.active_player = Some(active.opponent());
                true
            }
            _ => false,
        }
    }

    /// Advance the running clock by one tick
    pub fn tick(&mut self) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        let Some(active) = self.active_player else {
            return false;
        };

        let remaining = &mut self.time_remaining[active.index()];
        *remaining = remaining.saturating_sub(TICK);

        if remaining.is_zero() {
            self.game_over = true;
            self.flagged = Some(active);
            self.active_player = None;
        }
        true
    }

    /// Pause a running game or resume a paused one
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        if self.paused {
            self.active_player = self.resume_target.take();
            self.paused = false;
            true
        } else if let Some(active) = self.active_player.take() {
            self.resume_target = Some(active);
            self.paused = true;
            true
        } else {
            false
        }
    }

    /// Put both clocks back to `duration`, or to the configured duration.
    ///
    /// A given duration replaces the configured one.
    pub fn reset(&mut self, duration: Option<Duration>) {
        if let Some(duration) = duration {
            *self = Self::new(duration);
        } else {
            *self = Self::new(self.configured_duration);
        }
    }

    /// Configure a new starting time and reset to it.
    ///
    /// Ignored while a player's clock is running.
    pub fn set_duration(&mut self, minutes: u64, seconds: u64) -> bool {
        if self.active_player.is_some() {
            return false;
        }
        self.reset(Some(clamped_duration(minutes, seconds)));
        true
    }

    pub fn time_remaining(&self, player: Player) -> Duration {
        self.time_remaining[player.index()]
    }

    pub fn active_player(&self) -> Option<Player> {
        self.active_player
    }

    pub fn first_move_made(&self) -> bool {
        self.first_move_made
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The player whose time ran out, if any
    pub fn flagged(&self) -> Option<Player> {
        self.flagged
    }

    pub fn configured_duration(&self) -> Duration {
        self.configured_duration
    }

    /// Whether a player's clock is currently counting down
    pub fn is_running(&self) -> bool {
        self.active_player.is_some()
    }

    /// Serialisable view of the clock
    pub fn snapshot(&self) -> ClockSnapshot {
        let side = |player: Player| PlayerClock {
            remaining_seconds: self.time_remaining(player).as_secs_f64(),
            display: format_clock(self.time_remaining(player)),
            active: self.active_player == Some(player),
        };

        ClockSnapshot {
            player_one: side(Player::First),
            player_two: side(Player::Second),
            active_player: self.active_player,
            first_move_made: self.first_move_made,
            paused: self.paused,
            game_over: self.game_over,
            flagged: self.flagged,
            configured_seconds: self.configured_duration.as_secs(),
        }
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

/// One player's clock face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerClock {
    pub remaining_seconds: f64,
    pub display: String,
    pub active: bool,
}

/// Point-in-time view of the clock, sent to clients and watchers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub player_one: PlayerClock,
    pub player_two: PlayerClock,
    pub active_player: Option<Player>,
    pub first_move_made: bool,
    pub paused: bool,
    pub game_over: bool,
    pub flagged: Option<Player>,
    pub configured_seconds: u64,
}

impl ClockSnapshot {
    pub fn is_running(&self) -> bool {
        self.active_player.is_some()
    }
}
