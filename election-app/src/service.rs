//! Server side of `ElectionService`.

use election_rpc_service::RpcMethodPrebuffered;
use election_service_definition::{
    ELECTION_CONFIRMATION, ElectionReply, ElectionRequest, prebuffered::SubmitElectionData,
};
use election_tokio_rpc_server::{RpcServer, RpcServiceEndpoint, RpcServiceEndpointError};
use std::sync::Arc;

/// Logs a submission and acknowledges it.
///
/// Every request is accepted; the reply is always `ELECTION_CONFIRMATION`.
pub fn submit_election_data(request: &ElectionRequest) -> ElectionReply {
    // Lines of concurrent submissions interleave in the log; the span keeps
    // each one attributable to its region.
    let span = tracing::info_span!("submit_election_data", region_id = request.region_id);
    let _enter = span.enter();

    for line in election_trace(request) {
        tracing::info!("{}", line);
    }

    ElectionReply {
        confirmation: ELECTION_CONFIRMATION.to_string(),
    }
}

/// The human-readable trace of a submission: every scalar field, then each
/// party and each candidate in submission order.
pub fn election_trace(request: &ElectionRequest) -> Vec<String> {
    let mut lines = vec![
        format!("Received Election Data from Region ID: {}", request.region_id),
        format!("Region Name: {}", request.region_name),
        format!("Address: {}", request.region_address),
        format!("Postal Codes: {}", request.region_postal_codes),
        format!("Federal State: {}", request.federal_state),
        format!("Timestamp: {}", request.time_stamp),
        "Election Data (Parties and Votes):".to_string(),
    ];

    lines.extend(
        request
            .election_data
            .iter()
            .map(|party| format!("Party: {}, Votes: {}", party.name, party.votes)),
    );

    lines.push("Preference Data (Candidates and Votes):".to_string());
    lines.extend(request.preference_data.iter().map(|preference| {
        format!(
            "Candidate: {}, Votes: {}",
            preference.name,
            preference.candidate_votes()
        )
    }));

    lines
}

/// Registers `SubmitElectionData` on an endpoint.
pub async fn register_election_service<C>(
    endpoint: &RpcServiceEndpoint<C>,
) -> Result<(), RpcServiceEndpointError>
where
    C: Send + Sync + Clone + 'static,
{
    endpoint
        .register_prebuffered(SubmitElectionData::METHOD_ID, |_, bytes: Vec<u8>| async move {
            let request = SubmitElectionData::decode_request(&bytes)?;
            let reply = submit_election_data(&request);
            Ok(SubmitElectionData::encode_response(reply)?)
        })
        .await
}

/// A server with `ElectionService` registered, ready to serve.
pub async fn election_server() -> Result<Arc<RpcServer>, RpcServiceEndpointError> {
    let server = Arc::new(RpcServer::new());
    register_election_service(&server.endpoint()).await?;
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::sample_election_request;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// `(region_id, message)` of every event logged inside a submission span.
    fn traced_lines(logs: &CapturedLogs) -> Vec<(i32, String)> {
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        output
            .lines()
            .filter_map(|line| {
                let rest = line.split_once("submit_election_data{region_id=")?.1;
                let (region_id, message) = rest.split_once("}: ")?;
                Some((region_id.parse().ok()?, message.to_string()))
            })
            .collect()
    }

    #[test]
    fn test_submission_logs_trace_in_order() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let logs = logs.clone();
                move || logs.clone()
            })
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish();

        let mut request = sample_election_request();
        request.preference_data.reverse();
        tracing::subscriber::with_default(subscriber, || submit_election_data(&request));

        let expected: Vec<(i32, String)> = election_trace(&request)
            .into_iter()
            .map(|line| (101, line))
            .collect();
        assert_eq!(traced_lines(&logs), expected);
        assert_eq!(expected[11].1, "Candidate: Hermann Mayer, Votes: 300");
    }

    #[test]
    fn test_sample_request_trace() {
        assert_eq!(
            election_trace(&sample_election_request()),
            vec![
                "Received Election Data from Region ID: 101",
                "Region Name: 20., Brigittenau",
                "Address: Wexstraße 3",
                "Postal Codes: 1200",
                "Federal State: Vienna",
                "Timestamp: 2024-10-08 12:00:00",
                "Election Data (Parties and Votes):",
                "Party: FPÖ, Votes: 900",
                "Party: ÖVP, Votes: 900",
                "Party: SPÖ, Votes: 900",
                "Preference Data (Candidates and Votes):",
                "Candidate: Andrea Müller, Votes: 400",
                "Candidate: Hermann Mayer, Votes: 300",
            ]
        );
    }

    #[test]
    fn test_trace_keeps_submission_order() {
        let mut request = sample_election_request();
        request.election_data.reverse();
        request.preference_data.reverse();

        let trace = election_trace(&request);

        assert_eq!(trace[7], "Party: SPÖ, Votes: 900");
        assert_eq!(trace[9], "Party: FPÖ, Votes: 900");
        assert_eq!(trace[11], "Candidate: Hermann Mayer, Votes: 300");
        assert_eq!(trace[12], "Candidate: Andrea Müller, Votes: 400");
    }

    #[test]
    fn test_empty_sequences_still_trace_headers() {
        let trace = election_trace(&ElectionRequest::default());

        assert_eq!(trace.len(), 8);
        assert_eq!(trace[6], "Election Data (Parties and Votes):");
        assert_eq!(trace[7], "Preference Data (Candidates and Votes):");
    }

    #[test]
    fn test_reply_is_fixed() {
        let mut odd = sample_election_request();
        odd.region_id = -1;
        odd.election_data[0].votes = -900;
        odd.election_data.push(odd.election_data[0].clone());

        for request in [sample_election_request(), ElectionRequest::default(), odd] {
            assert_eq!(
                submit_election_data(&request).confirmation,
                "Election data received successfully"
            );
        }
    }

    #[tokio::test]
    async fn test_register_twice_is_rejected() {
        let endpoint = RpcServiceEndpoint::<()>::new();

        register_election_service(&endpoint).await.unwrap();
        assert!(endpoint.is_registered(SubmitElectionData::METHOD_ID).await);

        assert!(matches!(
            register_election_service(&endpoint).await,
            Err(RpcServiceEndpointError::AlreadyRegistered(id)) if id == SubmitElectionData::METHOD_ID
        ));
    }
}
