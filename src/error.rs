use thiserror::Error;

/// Everything that can go wrong while driving a handshake or a transport
/// cipher state. The three variants mirror the three failure kinds this
/// core recognizes: a peer that fails authentication, a peer that sends a
/// malformed transcript, and a caller that misuses the API.
///
/// None of these is ever recovered locally: retrying an authentication
/// failure risks admitting unauthenticated data, and retrying a protocol
/// violation or configuration error can't make the peer's bytes correct.
#[derive(Debug, Error)]
pub enum NoiseError {
    /// An AEAD tag failed to verify during `decrypt_and_hash` or a raw
    /// transport `decrypt_with_ad`. Signals peer impersonation, bit
    /// corruption in transit, or disagreement about key material, but
    /// deliberately does not say which.
    #[error("AEAD authentication failed")]
    AuthenticationFailure,

    /// The peer's bytes don't fit the pattern being executed: a buffer was
    /// too short for the token being read, or `write`/`read` was called
    /// after the handshake's message list was already exhausted.
    #[error("protocol violation: {0}")]
    ProtocolViolation(&'static str),

    /// The caller misconfigured the handshake: an illegal pre-message
    /// pattern, or an attempt to initialize a cipher key with a length
    /// other than 0 or 32 bytes.
    #[error("handshake configuration error: {0}")]
    ConfigurationError(&'static str),
}

pub type Result<T> = std::result::Result<T, NoiseError>;
