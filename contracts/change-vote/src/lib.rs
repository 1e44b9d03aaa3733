// Change vote: approval voting on replacing an "original" value with a "change" value.
// Anyone can vote once voting is allowed. Votes while disallowed are dropped silently.
// The vote resolves once approvals reach the fixed threshold, and stays resolved
// until a new vote is initialized.

use near_sdk::borsh::BorshDeserialize;
use near_sdk::{env, near, PanicOnDefault};

pub mod register;
pub mod views;

use register::{Ballot, VotingRegister};
use views::RegisterView;

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct ChangeVoteContract {
    register: VotingRegister,
}

#[near]
impl ChangeVoteContract {
    #[init]
    pub fn new() -> Self {
        let register = VotingRegister::default();
        env::log_str(&format!(
            "CONTRACT_INIT: required_votes={}, original=\"{}\", change=\"{}\"",
            register.required_votes(),
            register.original_value(),
            register.change_value()
        ));
        Self { register }
    }

    /// Migration method to handle contract upgrades
    #[init(ignore_state)]
    pub fn migrate() -> Self {
        if let Some(old_state_bytes) = env::storage_read(b"STATE") {
            env::log_str("CONTRACT_MIGRATION: Found existing state, attempting migration");

            if let Ok(current) = Self::try_from_slice(&old_state_bytes) {
                env::log_str(&format!(
                    "CONTRACT_MIGRATION: Current format detected, preserving state (round {}, {} votes)",
                    current.register.round(),
                    current.register.votes()
                ));
                return current;
            }

            env::log_str("CONTRACT_MIGRATION: Could not parse existing state, creating new contract");
        } else {
            env::log_str("CONTRACT_MIGRATION: No existing state found, creating new contract");
        }

        Self { register: VotingRegister::default() }
    }

    // ========================================
    // Values
    // ========================================

    pub fn get_original_value(&self) -> String {
        self.register.original_value().to_string()
    }

    pub fn set_original_value(&mut self, new_value: String) -> String {
        let value = self.register.set_original_value(new_value).to_string();
        env::log_str(&format!(
            "ORIGINAL_VALUE_SET: Account {} set original value to \"{}\"",
            env::predecessor_account_id(),
            value
        ));
        value
    }

    pub fn get_change_value(&self) -> String {
        self.register.change_value().to_string()
    }

    pub fn set_change_value(&mut self, new_value: String) -> String {
        let value = self.register.set_change_value(new_value).to_string();
        env::log_str(&format!(
            "CHANGE_VALUE_SET: Account {} set change value to \"{}\"",
            env::predecessor_account_id(),
            value
        ));
        value
    }

    // ========================================
    // Voting
    // ========================================

    pub fn get_votes(&self) -> u32 {
        self.register.votes()
    }

    pub fn get_remaining_votes(&self) -> i64 {
        self.register.remaining_votes()
    }

    pub fn get_required_votes(&self) -> u32 {
        self.register.required_votes()
    }

    pub fn is_voting_enabled(&self) -> bool {
        self.register.voting_enabled()
    }

    pub fn get_round(&self) -> u64 {
        self.register.round()
    }

    pub fn allow_voting(&mut self) {
        self.register.allow_voting();
        env::log_str(&format!("VOTING_ALLOWED: by {}", env::predecessor_account_id()));
    }

    pub fn disallow_voting(&mut self) {
        self.register.disallow_voting();
        env::log_str(&format!("VOTING_DISALLOWED: by {}", env::predecessor_account_id()));
    }

    pub fn get_vote_status(&self) -> bool {
        self.register.is_resolved()
    }

    pub fn vote_to_approve(&mut self) {
        let voter = env::predecessor_account_id();
        match self.register.vote_to_approve() {
            Ok(Ballot::Counted(votes)) => env::log_str(&format!(
                "VOTE_APPROVED: Account {} approved ({} of {} votes)",
                voter,
                votes,
                self.register.required_votes()
            )),
            Ok(Ballot::Ignored) => env::log_str(&format!(
                "VOTE_IGNORED: Voting is disabled, vote from {} dropped",
                voter
            )),
            Err(err) => env::panic_str(&err.to_string()),
        }
    }

    /// Same answer as `get_vote_status`; never resets the count.
    pub fn resolve_voting(&self) -> bool {
        self.register.is_resolved()
    }

    pub fn initialize_new_vote(&mut self, new_change_value: String, new_original_value: String) {
        let round = self.register.initialize_new_vote(new_change_value, new_original_value);
        env::log_str(&format!(
            "NEW_VOTE_INITIALIZED: Round {} started by {} (voting {})",
            round,
            env::predecessor_account_id(),
            if self.register.voting_enabled() { "allowed" } else { "disallowed" }
        ));
    }

    pub fn get_register(&self) -> RegisterView {
        RegisterView::from(&self.register)
    }
}
