// Approval register: an "original" value, a proposed "change" value and a
// counter of approvals gated by a single voting switch.
//
// Has no dependency on the runtime environment, so it can be embedded and
// tested on its own. Callers must serialize mutating calls.

use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use std::fmt;

pub const DEFAULT_ORIGINAL_VALUE: &str = "test original";
pub const DEFAULT_CHANGE_VALUE: &str = "test change";
pub const REQUIRED_VOTES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    VoteOverflow,
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterError::VoteOverflow => write!(f, "Vote counter overflow"),
        }
    }
}

impl std::error::Error for RegisterError {}

/// Result of a single `vote_to_approve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ballot {
    /// Vote was counted; carries the new total.
    Counted(u32),
    /// Voting is disabled; nothing changed.
    Ignored,
}

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
pub struct VotingRegister {
    original_value: String,
    change_value: String,
    votes: u32,
    voting_enabled: bool,
    required_votes: u32,
    // Bumped by every initialize_new_vote
    round: u64,
}

impl Default for VotingRegister {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGINAL_VALUE, DEFAULT_CHANGE_VALUE, REQUIRED_VOTES)
    }
}

impl VotingRegister {
    pub fn new(original_value: impl Into<String>, change_value: impl Into<String>, required_votes: u32) -> Self {
        Self {
            original_value: original_value.into(),
            change_value: change_value.into(),
            votes: 0,
            voting_enabled: false,
            required_votes,
            round: 0,
        }
    }

    pub fn original_value(&self) -> &str {
        &self.original_value
    }

    pub fn set_original_value(&mut self, new_value: String) -> &str {
        self.original_value = new_value;
        &self.original_value
    }

    pub fn change_value(&self) -> &str {
        &self.change_value
    }

    pub fn set_change_value(&mut self, new_value: String) -> &str {
        self.change_value = new_value;
        &self.change_value
    }

    pub fn votes(&self) -> u32 {
        self.votes
    }

    pub fn required_votes(&self) -> u32 {
        self.required_votes
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn voting_enabled(&self) -> bool {
        self.voting_enabled
    }

    /// `required_votes - votes`, negative once the threshold is overshot.
    pub fn remaining_votes(&self) -> i64 {
        i64::from(self.required_votes) - i64::from(self.votes)
    }

    pub fn allow_voting(&mut self) {
        self.voting_enabled = true;
    }

    pub fn disallow_voting(&mut self) {
        self.voting_enabled = false;
    }

    pub fn vote_to_approve(&mut self) -> Result<Ballot, RegisterError> {
        if !self.voting_enabled {
            return Ok(Ballot::Ignored);
        }
        self.votes = self.votes.checked_add(1).ok_or(RegisterError::VoteOverflow)?;
        Ok(Ballot::Counted(self.votes))
    }

    /// True once votes reach the threshold. Independent of the voting switch.
    pub fn is_resolved(&self) -> bool {
        self.votes >= self.required_votes
    }

    /// Starts a new round. The voting switch keeps its current position.
    pub fn initialize_new_vote(&mut self, new_change_value: String, new_original_value: String) -> u64 {
        self.change_value = new_change_value;
        self.original_value = new_original_value;
        self.votes = 0;
        self.round = self.round.saturating_add(1);
        self.round
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_register() -> VotingRegister {
        let mut register = VotingRegister::default();
        register.allow_voting();
        register
    }

    #[test]
    fn test_defaults() {
        let register = VotingRegister::default();
        assert_eq!(register.original_value(), "test original");
        assert_eq!(register.change_value(), "test change");
        assert_eq!(register.votes(), 0);
        assert_eq!(register.remaining_votes(), 3);
        assert!(!register.voting_enabled());
        assert!(!register.is_resolved());
        assert_eq!(register.round(), 0);
    }

    #[test]
    fn test_setters_return_new_value() {
        let mut register = VotingRegister::default();
        assert_eq!(register.set_change_value("changestring".to_string()), "changestring");
        assert_eq!(register.change_value(), "changestring");
        assert_eq!(register.set_original_value("original string".to_string()), "original string");
        assert_eq!(register.original_value(), "original string");
    }

    #[test]
    fn test_empty_strings_accepted() {
        let mut register = VotingRegister::default();
        assert_eq!(register.set_change_value(String::new()), "");
        assert_eq!(register.set_original_value(String::new()), "");
    }

    #[test]
    fn test_vote_ignored_while_disabled() {
        let mut register = VotingRegister::default();
        for _ in 0..5 {
            assert_eq!(register.vote_to_approve(), Ok(Ballot::Ignored));
        }
        assert_eq!(register.votes(), 0);
        assert_eq!(register.remaining_votes(), 3);
    }

    #[test]
    fn test_vote_counted_while_enabled() {
        let mut register = enabled_register();
        assert_eq!(register.vote_to_approve(), Ok(Ballot::Counted(1)));
        assert_eq!(register.votes(), 1);
        assert_eq!(register.remaining_votes(), 2);
    }

    #[test]
    fn test_toggles_are_idempotent() {
        let mut register = VotingRegister::default();
        register.allow_voting();
        register.allow_voting();
        assert!(register.voting_enabled());
        register.disallow_voting();
        register.disallow_voting();
        assert!(!register.voting_enabled());
    }

    #[test]
    fn test_threshold_is_inclusive_and_sticky() {
        let mut register = enabled_register();
        register.vote_to_approve().unwrap();
        register.vote_to_approve().unwrap();
        assert!(!register.is_resolved());
        register.vote_to_approve().unwrap();
        assert!(register.is_resolved());
        assert_eq!(register.remaining_votes(), 0);

        register.vote_to_approve().unwrap();
        assert!(register.is_resolved());
        assert_eq!(register.votes(), 4);
        assert_eq!(register.remaining_votes(), -1);
    }

    #[test]
    fn test_resolution_ignores_voting_switch() {
        let mut register = enabled_register();
        for _ in 0..3 {
            register.vote_to_approve().unwrap();
        }
        register.disallow_voting();
        assert!(register.is_resolved());
        assert_eq!(register.votes(), 3);
    }

    #[test]
    fn test_initialize_new_vote_resets_round_state() {
        let mut register = enabled_register();
        register.vote_to_approve().unwrap();
        register.vote_to_approve().unwrap();

        let round = register.initialize_new_vote("New Test Change".to_string(), "New Test Original".to_string());

        assert_eq!(round, 1);
        assert_eq!(register.change_value(), "New Test Change");
        assert_eq!(register.original_value(), "New Test Original");
        assert_eq!(register.votes(), 0);
        assert_eq!(register.remaining_votes(), 3);
        assert!(register.voting_enabled(), "voting switch survives a new round");
        assert_eq!(register.required_votes(), REQUIRED_VOTES);
    }

    #[test]
    fn test_vote_overflow_is_reported() {
        let mut register = VotingRegister::new("a", "b", REQUIRED_VOTES);
        register.votes = u32::MAX;
        register.allow_voting();
        assert_eq!(register.vote_to_approve(), Err(RegisterError::VoteOverflow));
        assert_eq!(register.votes(), u32::MAX);
        assert_eq!(RegisterError::VoteOverflow.to_string(), "Vote counter overflow");
    }
}
