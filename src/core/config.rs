//! Game configuration.
//!
//! The board geometry itself is fixed: 52 main-track cells, two tokens per
//! color, a six-step home stretch. What `GameConfig` exposes is the step
//! arithmetic around the home entry, the table economics, and the pacing
//! delays the host loop uses between a roll and its resolution.
//!
//! All fields have defaults, so a partial JSON document is enough:
//!
//! ```
//! use ludo_bet::core::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "starting_balance": 500 }"#).unwrap();
//! assert_eq!(config.starting_balance, 500);
//! assert_eq!(config.payout_multiplier, 4);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of cells on the shared main track.
pub const TRACK_LEN: u8 = 52;

/// Tokens owned by each color.
pub const TOKENS_PER_COLOR: usize = 2;

/// Number of cells in each color's private home stretch.
pub const HOME_STRETCH_LEN: u8 = 6;

/// Die value that releases a token from base and grants a bonus turn.
pub const ENTRY_ROLL: u8 = 6;

/// Engine and table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Steps a token may take on the main track before it turns into the
    /// home stretch.
    pub home_entry_boundary: u8,

    /// Home step (1-based, counted past the boundary) at which a token is
    /// finished.
    pub finish_home_step: u8,

    /// Largest legal `steps_taken + roll`. Anything above is an overshoot.
    pub overshoot_limit: u8,

    /// Maximum number of turn log entries retained.
    pub turn_log_capacity: usize,

    /// Multiplier applied to a winning wager.
    pub payout_multiplier: u64,

    /// Wallet balance at table creation.
    pub starting_balance: u64,

    /// Pause between a roll and its resolution, in milliseconds.
    pub roll_delay_ms: u64,

    /// Pause before the turn passes when a roll has no legal move, in
    /// milliseconds.
    pub auto_pass_delay_ms: u64,

    /// RNG seed. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            home_entry_boundary: 50,
            finish_home_step: HOME_STRETCH_LEN,
            overshoot_limit: 57,
            turn_log_capacity: 5,
            payout_multiplier: 4,
            starting_balance: 1000,
            roll_delay_ms: 1500,
            auto_pass_delay_ms: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set both pacing delays at once.
    #[must_use]
    pub fn with_delays(mut self, roll: Duration, auto_pass: Duration) -> Self {
        self.roll_delay_ms = u64::try_from(roll.as_millis()).unwrap_or(u64::MAX);
        self.auto_pass_delay_ms = u64::try_from(auto_pass.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the starting wallet balance.
    #[must_use]
    pub fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Set the turn log capacity.
    #[must_use]
    pub fn with_turn_log_capacity(mut self, capacity: usize) -> Self {
        self.turn_log_capacity = capacity;
        self
    }

    /// Step count at which a token is finished.
    #[must_use]
    pub fn finish_steps(&self) -> u8 {
        self.home_entry_boundary + self.finish_home_step
    }

    #[must_use]
    pub fn roll_delay(&self) -> Duration {
        Duration::from_millis(self.roll_delay_ms)
    }

    #[must_use]
    pub fn auto_pass_delay(&self) -> Duration {
        Duration::from_millis(self.auto_pass_delay_ms)
    }

    /// Check that the step arithmetic describes a reachable board.
    ///
    /// The main-track leg must fit on the track, the finish step must lie
    /// within the home stretch, and the overshoot limit must allow reaching
    /// the finish.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.home_entry_boundary == 0 || self.home_entry_boundary >= TRACK_LEN {
            return Err(ConfigError::HomeEntryOutOfRange(self.home_entry_boundary));
        }
        if self.finish_home_step == 0 || self.finish_home_step > HOME_STRETCH_LEN {
            return Err(ConfigError::FinishStepOutOfRange(self.finish_home_step));
        }
        if self.overshoot_limit < self.finish_steps() {
            return Err(ConfigError::OvershootBelowFinish {
                limit: self.overshoot_limit,
                finish: self.finish_steps(),
            });
        }
        if self.turn_log_capacity == 0 {
            return Err(ConfigError::EmptyTurnLog);
        }
        if self.payout_multiplier == 0 {
            return Err(ConfigError::ZeroPayout);
        }
        Ok(())
    }
}
