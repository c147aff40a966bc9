use crate::schema::{self, ElectionReply, ElectionRequest};
use election_rpc_service::{RpcMethodPrebuffered, rpc_method_id};
use std::io;

/// `ElectionService.SubmitElectionData`
pub struct SubmitElectionData;

impl RpcMethodPrebuffered for SubmitElectionData {
    const METHOD_ID: u64 = rpc_method_id!("ElectionService.SubmitElectionData");

    type Input = ElectionRequest;
    type Output = ElectionReply;

    fn encode_request(input: Self::Input) -> Result<Vec<u8>, io::Error> {
        Ok(schema::encode(&input))
    }

    fn decode_request(bytes: &[u8]) -> Result<Self::Input, io::Error> {
        Ok(schema::decode(bytes)?)
    }

    fn encode_response(output: Self::Output) -> Result<Vec<u8>, io::Error> {
        Ok(schema::encode(&output))
    }

    fn decode_response(bytes: &[u8]) -> Result<Self::Output, io::Error> {
        Ok(schema::decode(bytes)?)
    }
}
