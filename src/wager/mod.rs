//! Side wager on which color wins.
//!
//! The ledger is an event observer: feed it the engine's events and it
//! settles the active wager when it sees the win.

mod ledger;

pub use ledger::{Settlement, WagerLedger, Wager, WalletState};
