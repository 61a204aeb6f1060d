//! Simulated staking desk
//!
//! Purely in-memory: the balance and its history live for the session
//! only and touch nothing outside this module. Amounts are validated
//! before an entry is created, so the ledger can never go negative.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Monthly interest applied to the staked balance. Policy constant,
/// not user-configurable.
pub const MONTHLY_RATE: f64 = 0.05;

/// Tokens the staking desk accepts.
pub const STAKABLE_TOKENS: [&str; 3] = ["Token A", "Token B", "Token C"];

// ============================================
// LEDGER TYPES
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("please enter a valid amount")]
    InvalidAmount,

    #[error("you cannot unstake more than your staked balance")]
    InsufficientBalance,

    #[error("that token is not available for staking")]
    UnknownToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakeAction {
    Staked,
    Unstaked,
}

impl std::fmt::Display for StakeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StakeAction::Staked => write!(f, "Staked"),
            StakeAction::Unstaked => write!(f, "Unstaked"),
        }
    }
}

/// One immutable history row.
#[derive(Debug, Clone, PartialEq)]
pub struct StakeEntry {
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    pub action: StakeAction,
    pub token: String,
}

// ============================================
// LEDGER
// ============================================

/// Running balance plus an append-only history, newest first.
#[derive(Debug, Default)]
pub struct StakingLedger {
    balance: f64,
    history: Vec<StakeEntry>,
}

impl StakingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// History rows, newest first.
    pub fn history(&self) -> &[StakeEntry] {
        &self.history
    }

    /// Projected earnings for one month at the fixed rate.
    pub fn monthly_earnings(&self) -> f64 {
        self.balance * MONTHLY_RATE
    }

    /// Add `amount` to the staked balance.
    pub fn stake(&mut self, amount: f64, token: &str) -> Result<(), LedgerError> {
        check_amount(amount)?;
        self.push_entry(amount, StakeAction::Staked, token);
        self.balance += amount;
        Ok(())
    }

    /// Remove `amount` from the staked balance. Rejected outright if it
    /// exceeds the balance; the ledger is left untouched on failure.
    pub fn unstake(&mut self, amount: f64, token: &str) -> Result<(), LedgerError> {
        check_amount(amount)?;
        if amount > self.balance {
            return Err(LedgerError::InsufficientBalance);
        }
        self.push_entry(amount, StakeAction::Unstaked, token);
        self.balance -= amount;
        Ok(())
    }

    fn push_entry(&mut self, amount: f64, action: StakeAction, token: &str) {
        self.history.insert(
            0,
            StakeEntry {
                timestamp: Utc::now(),
                amount,
                action,
                token: token.to_string(),
            },
        );
    }
}

fn check_amount(amount: f64) -> Result<(), LedgerError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stake_then_unstake_restores_balance_and_keeps_two_entries() {
        let mut ledger = StakingLedger::new();
        ledger.stake(250.0, "Token A").unwrap();
        ledger.unstake(250.0, "Token A").unwrap();

        assert_eq!(ledger.balance(), 0.0);
        assert_eq!(ledger.history().len(), 2);
        assert_eq!(ledger.history()[0].action, StakeAction::Unstaked);
        assert_eq!(ledger.history()[1].action, StakeAction::Staked);
    }

    #[test]
    fn overdrawn_unstake_leaves_state_unchanged() {
        let mut ledger = StakingLedger::new();
        ledger.stake(100.0, "Token A").unwrap();

        let error = ledger.unstake(150.0, "Token A").unwrap_err();
        assert_eq!(error, LedgerError::InsufficientBalance);
        assert_eq!(ledger.balance(), 100.0);
        assert_eq!(ledger.history().len(), 1);
    }

    #[test]
    fn worked_example_from_the_dashboard() {
        let mut ledger = StakingLedger::new();

        ledger.stake(100.0, "Token A").unwrap();
        assert_eq!(ledger.balance(), 100.0);

        assert!(ledger.unstake(150.0, "Token A").is_err());
        assert_eq!(ledger.balance(), 100.0);

        ledger.unstake(40.0, "Token A").unwrap();
        assert_eq!(ledger.balance(), 60.0);

        // Newest first.
        let history = ledger.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].amount, 40.0);
        assert_eq!(history[0].action, StakeAction::Unstaked);
        assert_eq!(history[1].amount, 100.0);
        assert_eq!(history[1].action, StakeAction::Staked);
    }

    #[test]
    fn bad_amounts_are_rejected() {
        let mut ledger = StakingLedger::new();
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                ledger.stake(amount, "Token B").unwrap_err(),
                LedgerError::InvalidAmount
            );
            assert_eq!(
                ledger.unstake(amount, "Token B").unwrap_err(),
                LedgerError::InvalidAmount
            );
        }
        assert!(ledger.history().is_empty());
    }

    #[test]
    fn monthly_earnings_follow_the_fixed_rate() {
        let mut ledger = StakingLedger::new();
        ledger.stake(1000.0, "Token C").unwrap();
        assert!((ledger.monthly_earnings() - 50.0).abs() < 1e-9);
    }
}
