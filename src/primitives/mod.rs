//! The three primitive capability families a Noise instantiation is built
//! from: Diffie-Hellman, AEAD cipher, and hash. Each is a narrow trait with
//! one concrete implementation in this crate — per the design note that the
//! set of primitives is closed to one tuple per protocol version, these are
//! plain monomorphised generic parameters, not a dynamic-dispatch registry.

pub mod cipher;
pub mod dh;
pub mod hash;

pub use cipher::{ChaChaPolyCipher, Cipher, TAG_LEN};
pub use dh::{Dh, KeyPair, Secp256k1Dh, DH_LEN, PUB_KEY_LEN};
pub use hash::{Hash, Sha256Hash, BLOCK_LEN, HASH_LEN};
