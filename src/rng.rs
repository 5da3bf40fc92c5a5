//! The randomness seam. `HandshakeCore` never reaches for a global RNG
//! directly; every ephemeral keypair is drawn through a `RandomSource`, so
//! production code can plug in a CSPRNG and tests can plug in a fixed
//! sequence and get a reproducible transcript.

use rand::rngs::OsRng;
use rand_core::RngCore;
#[cfg(any(test, feature = "testing"))]
use zeroize::Zeroize;

pub trait RandomSource {
    /// Returns exactly `n` fresh bytes.
    fn next_bytes(&mut self, n: usize) -> Vec<u8>;
}

/// Production randomness, backed by the operating system's CSPRNG.
#[derive(Debug, Default)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
    fn next_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        OsRng.fill_bytes(&mut buf);
        buf
    }
}

/// A deterministic byte source for tests: repeats the given private-key
/// bytes for a fixed number of draws, then panics. BOLT #8 test vectors fix
/// the ephemeral private key used for each act, so this is sized for
/// exactly that: construct one per act with the vector's ephemeral key.
#[cfg(any(test, feature = "testing"))]
pub struct FixedRandomSource {
    bytes: Vec<u8>,
    drawn: bool,
}

#[cfg(any(test, feature = "testing"))]
impl FixedRandomSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        FixedRandomSource { bytes: bytes.into(), drawn: false }
    }
}

#[cfg(any(test, feature = "testing"))]
impl RandomSource for FixedRandomSource {
    fn next_bytes(&mut self, n: usize) -> Vec<u8> {
        assert!(!self.drawn, "FixedRandomSource only supports a single draw");
        assert_eq!(n, self.bytes.len(), "FixedRandomSource length mismatch");
        self.drawn = true;
        self.bytes.clone()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Drop for FixedRandomSource {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// A deterministic, unbounded byte source: each draw returns `n` copies of
/// an incrementing counter byte. Useful for exercising patterns with more
/// than one ephemeral draw (e.g. repeated `NN` runs) without hand-rolling a
/// fixture per act.
#[cfg(any(test, feature = "testing"))]
pub struct CounterRandomSource {
    counter: u8,
}

#[cfg(any(test, feature = "testing"))]
impl CounterRandomSource {
    pub fn new(start: u8) -> Self {
        CounterRandomSource { counter: start }
    }
}

#[cfg(any(test, feature = "testing"))]
impl RandomSource for CounterRandomSource {
    fn next_bytes(&mut self, n: usize) -> Vec<u8> {
        let bytes = vec![self.counter; n];
        self.counter = self.counter.wrapping_add(1);
        bytes
    }
}
