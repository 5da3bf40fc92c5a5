//! A generic Noise Protocol Framework core, instantiated for Lightning as
//! `Noise_XK_secp256k1_ChaChaPoly_SHA256` (BOLT #8). Executes the `XK`
//! handshake pattern (and, for testing, `NN`) to authenticate a peer and
//! derive a pair of transport cipher states; does not touch a socket.
#![forbid(unsafe_code)]

pub mod cipher_state;
pub mod error;
pub mod handshake;
pub mod lightning;
pub mod pattern;
pub mod primitives;
pub mod rng;
pub mod symmetric_state;

#[cfg(test)]
mod test_vectors;

pub use cipher_state::CipherState;
pub use error::{NoiseError, Result};
pub use handshake::{Handshake, HandshakeConfig, HandshakeReader, HandshakeWriter, Transport};
pub use pattern::{HandshakePattern, Token, NN, XK};
pub use rng::RandomSource;
pub use symmetric_state::SymmetricState;
