//! Client side of `ElectionService`.

use election_service_definition::{
    ElectionReply, ElectionRequest, PartyVotes, PreferenceVotes, prebuffered::SubmitElectionData,
};
use election_tokio_rpc_client::{RpcCallPrebuffered, RpcCallerError, RpcClient};

/// The submission the client binary sends.
pub fn sample_election_request() -> ElectionRequest {
    let party = |name: &str| PartyVotes {
        name: name.to_string(),
        votes: 900,
    };
    let candidate = |name: &str, votes| PreferenceVotes {
        name: name.to_string(),
        votes,
    };

    ElectionRequest {
        region_id: 101,
        region_name: "20., Brigittenau".to_string(),
        region_address: "Wexstraße 3".to_string(),
        region_postal_codes: "1200".to_string(),
        federal_state: "Vienna".to_string(),
        time_stamp: "2024-10-08 12:00:00".to_string(),
        election_data: vec![party("FPÖ"), party("ÖVP"), party("SPÖ")],
        preference_data: vec![
            candidate("Andrea Müller", 400),
            candidate("Hermann Mayer", 300),
        ],
    }
}

/// Connects to `websocket_url`, submits one request and closes the
/// connection. Fails without retrying.
pub async fn submit_election_data(
    websocket_url: &str,
    request: ElectionRequest,
) -> Result<ElectionReply, RpcCallerError> {
    let client = RpcClient::new(websocket_url).await?;
    SubmitElectionData::call(&client, request).await
}
