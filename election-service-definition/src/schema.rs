//! Message shapes of `ElectionService`.
//!
//! Encoded as protocol buffers. Tags follow the field order of the service
//! definition below, so payloads stay compatible with any protobuf
//! implementation of it, and fields added later are skipped by older
//! decoders.
//!
//! ```text
//! service ElectionService {
//!   rpc SubmitElectionData(ElectionRequest) returns (ElectionReply);
//! }
//! message PartyVotes       { string name = 1; int32 votes = 2; }
//! message PreferenceVotes  { string name = 1; int32 votes = 2; }
//! message ElectionRequest  {
//!   int32 regionID = 1; string regionName = 2; string regionAddress = 3;
//!   string regionPostalCodes = 4; string federalState = 5; string timeStamp = 6;
//!   repeated PartyVotes electionData = 7;
//!   repeated PreferenceVotes preferenceData = 8;
//! }
//! message ElectionReply { string confirmation = 1; }
//! ```

use crate::error::SchemaError;
use prost::Message;

/// Aggregate votes for one party in a region.
#[derive(Clone, PartialEq, Message)]
pub struct PartyVotes {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(int32, tag = "2")]
    pub votes: i32,
}

/// Aggregate votes for one candidate on a region's ballot.
#[derive(Clone, PartialEq, Message)]
pub struct PreferenceVotes {
    /// Candidate name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Named `votes` on the wire to match `PartyVotes`; holds the candidate's
    /// vote count. See `candidate_votes`.
    #[prost(int32, tag = "2")]
    pub votes: i32,
}

impl PreferenceVotes {
    pub fn candidate_votes(&self) -> i32 {
        self.votes
    }
}

/// One region's election data submission.
///
/// Nothing is validated: negative counts, duplicate region IDs and empty
/// sequences are all accepted.
#[derive(Clone, PartialEq, Message)]
pub struct ElectionRequest {
    /// `regionID`
    #[prost(int32, tag = "1")]
    pub region_id: i32,
    /// `regionName`
    #[prost(string, tag = "2")]
    pub region_name: String,
    /// `regionAddress`
    #[prost(string, tag = "3")]
    pub region_address: String,
    /// `regionPostalCodes`
    #[prost(string, tag = "4")]
    pub region_postal_codes: String,
    /// `federalState`
    #[prost(string, tag = "5")]
    pub federal_state: String,
    /// `timeStamp`, free-form text.
    #[prost(string, tag = "6")]
    pub time_stamp: String,
    /// `electionData`, in submission order.
    #[prost(message, repeated, tag = "7")]
    pub election_data: Vec<PartyVotes>,
    /// `preferenceData`, in submission order.
    #[prost(message, repeated, tag = "8")]
    pub preference_data: Vec<PreferenceVotes>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ElectionReply {
    #[prost(string, tag = "1")]
    pub confirmation: String,
}

/// Encodes a message. Cannot fail: the output buffer grows as needed.
pub fn encode<M: Message>(message: &M) -> Vec<u8> {
    message.encode_to_vec()
}

/// Decodes a message, failing with `MalformedPayload` when the bytes do not
/// match the shape of `M`.
pub fn decode<M: Message + Default>(bytes: &[u8]) -> Result<M, SchemaError> {
    M::decode(bytes).map_err(|source| SchemaError::MalformedPayload {
        message: short_type_name::<M>(),
        source,
    })
}

fn short_type_name<M>() -> &'static str {
    let full = std::any::type_name::<M>();
    full.rsplit("::").next().unwrap_or(full)
}
