use crate::error::{NoiseError, Result};
use secp256k1::ecdh::SharedSecret;
use secp256k1::{All, PublicKey, Secp256k1, SecretKey};
use std::fmt;
use std::sync::OnceLock;
use zeroize::ZeroizeOnDrop;

/// Length in bytes of a secp256k1 scalar (private key) or DH output.
pub const DH_LEN: usize = 32;
/// Length in bytes of a compressed secp256k1 public key.
pub const PUB_KEY_LEN: usize = 33;

fn secp() -> &'static Secp256k1<All> {
    static CTX: OnceLock<Secp256k1<All>> = OnceLock::new();
    CTX.get_or_init(Secp256k1::new)
}

/// A local keypair: a 32-byte private scalar and its 33-byte compressed
/// public key. The private half is zeroized when the keypair is dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct KeyPair {
    #[zeroize(skip)]
    pub public_key: [u8; PUB_KEY_LEN],
    private_key: [u8; DH_LEN],
}

impl KeyPair {
    pub(crate) fn private_key_bytes(&self) -> &[u8; DH_LEN] {
        &self.private_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key))
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// The Diffie-Hellman function family: key generation plus a `dh` operation
/// that mixes a local private scalar with a remote public point.
pub trait Dh {
    const NAME: &'static str;

    /// Builds a keypair from a 32-byte private key.
    fn generate_keypair(private_key: &[u8]) -> Result<KeyPair>;

    /// `dh(local, remote) = SHA256(compressed(remote * local.priv))` — the
    /// same value `secp256k1_ecdh` returns, not the raw x-coordinate.
    fn dh(local: &KeyPair, remote_public: &[u8; PUB_KEY_LEN]) -> Result<[u8; DH_LEN]>;
}

/// secp256k1 Diffie-Hellman, the `secp256k1` token of
/// `Noise_XK_secp256k1_ChaChaPoly_SHA256`.
pub struct Secp256k1Dh;

impl Dh for Secp256k1Dh {
    const NAME: &'static str = "secp256k1";

    fn generate_keypair(private_key: &[u8]) -> Result<KeyPair> {
        let secret = SecretKey::from_slice(private_key)
            .map_err(|_| NoiseError::ConfigurationError("invalid secp256k1 private key"))?;
        let public = PublicKey::from_secret_key(secp(), &secret);
        Ok(KeyPair {
            public_key: public.serialize(),
            private_key: secret.secret_bytes(),
        })
    }

    fn dh(local: &KeyPair, remote_public: &[u8; PUB_KEY_LEN]) -> Result<[u8; DH_LEN]> {
        let secret = SecretKey::from_slice(local.private_key_bytes())
            .map_err(|_| NoiseError::ConfigurationError("invalid secp256k1 private key"))?;
        let public = PublicKey::from_slice(remote_public)
            .map_err(|_| NoiseError::ProtocolViolation("invalid remote public key"))?;
        let shared = SharedSecret::new(&public, &secret);
        let mut out = [0u8; DH_LEN];
        out.copy_from_slice(shared.as_ref());
        Ok(out)
    }
}
