mod submit_election_data;

pub use submit_election_data::SubmitElectionData;
