pub mod error;
pub mod prebuffered;
pub mod schema;

pub use error::SchemaError;
pub use schema::{ElectionReply, ElectionRequest, PartyVotes, PreferenceVotes};

/// The reply text for every accepted submission.
pub const ELECTION_CONFIRMATION: &str = "Election data received successfully";
