//! Staking panel
//!
//! The one panel with no fetch at all: it wraps the in-memory ledger
//! and a token selector. Operations are synchronous and total.

use crate::staking::{LedgerError, StakeEntry, StakingLedger, STAKABLE_TOKENS};

pub struct StakingPanel {
    ledger: StakingLedger,
    token: String,
}

impl StakingPanel {
    pub fn new() -> Self {
        Self {
            ledger: StakingLedger::new(),
            token: STAKABLE_TOKENS[0].to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Select the token the next operations apply to.
    pub fn select_token(&mut self, token: &str) -> Result<(), LedgerError> {
        let token = token.trim();
        match STAKABLE_TOKENS
            .iter()
            .find(|known| known.eq_ignore_ascii_case(token))
        {
            Some(known) => {
                self.token = known.to_string();
                Ok(())
            }
            None => Err(LedgerError::UnknownToken),
        }
    }

    pub fn stake(&mut self, amount: f64) -> Result<(), LedgerError> {
        self.ledger.stake(amount, &self.token)
    }

    pub fn unstake(&mut self, amount: f64) -> Result<(), LedgerError> {
        self.ledger.unstake(amount, &self.token)
    }

    pub fn balance(&self) -> f64 {
        self.ledger.balance()
    }

    pub fn monthly_earnings(&self) -> f64 {
        self.ledger.monthly_earnings()
    }

    pub fn history(&self) -> &[StakeEntry] {
        self.ledger.history()
    }
}

impl Default for StakingPanel {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staking::StakeAction;

    #[test]
    fn defaults_to_the_first_stakable_token() {
        let panel = StakingPanel::new();
        assert_eq!(panel.token(), "Token A");
        assert_eq!(panel.balance(), 0.0);
    }

    #[test]
    fn entries_carry_the_selected_token() {
        let mut panel = StakingPanel::new();
        panel.select_token("token b").unwrap();
        panel.stake(25.0).unwrap();

        let entry = &panel.history()[0];
        assert_eq!(entry.token, "Token B");
        assert_eq!(entry.action, StakeAction::Staked);
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        let mut panel = StakingPanel::new();
        assert_eq!(
            panel.select_token("Token Z").unwrap_err(),
            LedgerError::UnknownToken
        );
        assert_eq!(panel.token(), "Token A");
    }
}
