pub mod client;
pub mod config;
pub mod logging;
pub mod service;

pub use election_service_definition::{
    ELECTION_CONFIRMATION, ElectionReply, ElectionRequest, PartyVotes, PreferenceVotes,
};
