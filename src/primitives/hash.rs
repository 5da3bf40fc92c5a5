use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

/// Output length in bytes of the hash function. The `hashLen = 64` branch
/// some Noise instantiations carry for SHA-512-class hashes has no
/// configured primitive in this crate; rather than a runtime check, that is
/// enforced here by shipping exactly one `Hash` implementation whose output
/// is fixed at 32 bytes.
pub const HASH_LEN: usize = 32;
/// Block length in bytes of the hash function's compression function.
pub const BLOCK_LEN: usize = 64;

/// The hash function family: plain hashing, HMAC, and the two-output HKDF
/// Noise uses to ratchet the chaining key forward.
pub trait Hash {
    const NAME: &'static str;

    fn hash(data: &[u8]) -> [u8; HASH_LEN];

    fn hmac_hash(key: &[u8], data: &[u8]) -> [u8; HASH_LEN];

    /// `temp_key = HMAC-HASH(ck, ikm)`, `out1 = HMAC-HASH(temp_key, 0x01)`,
    /// `out2 = HMAC-HASH(temp_key, out1 || 0x02)`. `ikm` must be 0, 32, or
    /// `dhLen` bytes.
    fn hkdf(chaining_key: &[u8; HASH_LEN], ikm: &[u8]) -> ([u8; HASH_LEN], [u8; HASH_LEN]);
}

/// SHA-256, the `SHA256` token of `Noise_XK_secp256k1_ChaChaPoly_SHA256`.
pub struct Sha256Hash;

impl Hash for Sha256Hash {
    const NAME: &'static str = "SHA256";

    fn hash(data: &[u8]) -> [u8; HASH_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    fn hmac_hash(key: &[u8], data: &[u8]) -> [u8; HASH_LEN] {
        let mut mac =
            Hmac::<Sha256>::new_from_slice(key).expect("HMAC-SHA256 accepts keys of any length");
        mac.update(data);
        mac.finalize().into_bytes().into()
    }

    fn hkdf(chaining_key: &[u8; HASH_LEN], ikm: &[u8]) -> ([u8; HASH_LEN], [u8; HASH_LEN]) {
        let hk = Hkdf::<Sha256>::new(Some(chaining_key), ikm);
        let mut okm = [0u8; 64];
        hk.expand(&[], &mut okm)
            .expect("64 is well within SHA-256's 255 * hash-length HKDF limit");

        let mut out1 = [0u8; HASH_LEN];
        let mut out2 = [0u8; HASH_LEN];
        out1.copy_from_slice(&okm[..32]);
        out2.copy_from_slice(&okm[32..]);
        (out1, out2)
    }
}
