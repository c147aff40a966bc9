use std::io;

// A prebuffered method has its whole request or reply in memory before it is
// sent. This trait couples the method ID with the encoding of both directions
// so client and server share one definition.

pub trait RpcMethodPrebuffered {
    /// A unique identifier for the RPC method, usually from `rpc_method_id!`.
    const METHOD_ID: u64;

    /// The high-level request type.
    type Input;

    /// The high-level reply type.
    type Output;

    /// Encodes the request into a byte array.
    fn encode_request(input: Self::Input) -> Result<Vec<u8>, io::Error>;

    /// Decodes raw request bytes into a typed request.
    ///
    /// Malformed bytes yield an error of kind `InvalidData`.
    fn decode_request(bytes: &[u8]) -> Result<Self::Input, io::Error>;

    /// Encodes the reply into a byte array.
    fn encode_response(output: Self::Output) -> Result<Vec<u8>, io::Error>;

    /// Decodes raw reply bytes into a typed reply.
    fn decode_response(bytes: &[u8]) -> Result<Self::Output, io::Error>;
}
