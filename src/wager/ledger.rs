//! Wallet and the single side wager.
//!
//! The stake is debited when the wager is placed. Settlement either credits
//! `amount × payout_multiplier` or forfeits the stake, and in both cases
//! clears the wager so the next game can take a new one.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Color, GameConfig};
use crate::error::Rejection;
use crate::events::{GameEvent, GameObserver};

/// A stake on one color to win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wager {
    pub backed: Color,
    pub amount: u64,
}

/// Balance plus the outstanding wager, if any.
///
/// The stake of `active_wager` has already been taken out of `balance`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub balance: u64,
    pub active_wager: Option<Wager>,
}

/// Result of settling a wager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    /// The backed color won. `payout` was credited.
    Win { backed: Color, payout: u64 },
    /// Another color won. The stake stays forfeited.
    Loss {
        backed: Color,
        winner: Color,
        forfeited: u64,
    },
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Settlement::Win { payout, .. } => write!(f, "YOU WON! Payout: {payout}"),
            Settlement::Loss { backed, .. } => write!(f, "You lost your bet on {backed}."),
        }
    }
}

/// Owns the wallet. Mutated only through `place_wager` and `settle`.
#[derive(Clone, Debug)]
pub struct WagerLedger {
    wallet: WalletState,
    payout_multiplier: u64,
    last_settlement: Option<Settlement>,
}

impl WagerLedger {
    /// Create a ledger with the given balance and payout multiplier.
    #[must_use]
    pub fn new(balance: u64, payout_multiplier: u64) -> Self {
        Self {
            wallet: WalletState {
                balance,
                active_wager: None,
            },
            payout_multiplier,
            last_settlement: None,
        }
    }

    /// Create a ledger from the table settings in `config`.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.starting_balance, config.payout_multiplier)
    }

    #[must_use]
    pub fn wallet(&self) -> &WalletState {
        &self.wallet
    }

    #[must_use]
    pub fn balance(&self) -> u64 {
        self.wallet.balance
    }

    #[must_use]
    pub fn active_wager(&self) -> Option<Wager> {
        self.wallet.active_wager
    }

    /// Outcome of the most recent settlement.
    #[must_use]
    pub fn last_settlement(&self) -> Option<Settlement> {
        self.last_settlement
    }

    /// Stake `amount` on `color`.
    ///
    /// Rejected with no state change if the amount is zero or above the
    /// balance, or if a wager is already active.
    pub fn place_wager(&mut self, color: Color, amount: u64) -> Result<Wager, Rejection> {
        if let Some(active) = self.wallet.active_wager {
            return Err(Rejection::RejectedDuplicateWager {
                backed: active.backed,
            });
        }
        if amount == 0 || amount > self.wallet.balance {
            return Err(Rejection::RejectedInsufficientFunds {
                amount,
                balance: self.wallet.balance,
            });
        }

        let wager = Wager {
            backed: color,
            amount,
        };
        self.wallet.balance -= amount;
        self.wallet.active_wager = Some(wager);
        debug!(backed = %color, amount, balance = self.wallet.balance, "wager placed");
        Ok(wager)
    }

    /// Settle the active wager against the winning color.
    ///
    /// Returns `NoOpAlreadySettled` if there is nothing to settle, which
    /// makes repeated calls harmless.
    pub fn settle(&mut self, winner: Color) -> Result<Settlement, Rejection> {
        let wager = self
            .wallet
            .active_wager
            .take()
            .ok_or(Rejection::NoOpAlreadySettled)?;

        let settlement = if wager.backed == winner {
            let payout = wager.amount.saturating_mul(self.payout_multiplier);
            self.wallet.balance = self.wallet.balance.saturating_add(payout);
            Settlement::Win {
                backed: wager.backed,
                payout,
            }
        } else {
            Settlement::Loss {
                backed: wager.backed,
                winner,
                forfeited: wager.amount,
            }
        };

        info!(%settlement, balance = self.wallet.balance, "wager settled");
        self.last_settlement = Some(settlement);
        Ok(settlement)
    }
}

impl GameObserver for WagerLedger {
    fn on_event(&mut self, event: &GameEvent) {
        if let Some(winner) = event.winner() {
            if let Err(rejection) = self.settle(winner) {
                debug!(%rejection, winner = %winner, "nothing to settle");
            }
        }
    }
}
