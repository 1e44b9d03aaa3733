use near_sdk::serde::{Deserialize, Serialize};
use schemars::JsonSchema;

use crate::register::VotingRegister;

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub struct RegisterView {
    pub original_value: String,
    pub change_value: String,
    pub votes: u32,
    pub remaining_votes: i64,
    pub required_votes: u32,
    pub voting_enabled: bool,
    pub vote_status: bool,
    pub round: u64,
}

impl From<&VotingRegister> for RegisterView {
    fn from(register: &VotingRegister) -> Self {
        Self {
            original_value: register.original_value().to_string(),
            change_value: register.change_value().to_string(),
            votes: register.votes(),
            remaining_votes: register.remaining_votes(),
            required_votes: register.required_votes(),
            voting_enabled: register.voting_enabled(),
            vote_status: register.is_resolved(),
            round: register.round(),
        }
    }
}
