use xxhash_rust::const_xxh3::xxh3_64 as const_xxh3_64;

pub const fn method_id_hash(name: &str) -> u64 {
    const_xxh3_64(name.as_bytes())
}

/// Compile-time RPC method ID generator using xxHash3.
///
/// The ID is a deterministic `u64` derived from the method name, so client
/// and server builds agree on it without a shared registry.
///
/// ## Example
///
/// ```rust
/// use election_rpc_service::rpc_method_id;
/// let submit = rpc_method_id!("ElectionService.SubmitElectionData");
/// let other = rpc_method_id!("ElectionService.Other");
/// assert_ne!(submit, other);
/// ```
#[macro_export]
macro_rules! rpc_method_id {
    ($name:literal) => {{
        const ID: u64 = $crate::method_id_hash($name);
        ID
    }};
}
