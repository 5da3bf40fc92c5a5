//! `CipherState`: a keyed or unkeyed AEAD wrapper with a monotonically
//! increasing nonce. Grounded in the teacher's
//! `machine::cipher_state::CipherState`, generalized over the `Cipher` trait
//! instead of being hardcoded to ChaCha20-Poly1305.

use crate::error::{NoiseError, Result};
use crate::primitives::Cipher;
use std::marker::PhantomData;
use zeroize::Zeroize;

/// Wraps an AEAD cipher with a key and nonce. `Uninitialized` has no key and
/// rejects `encrypt_with_ad`/`decrypt_with_ad`; `mix_key` in `SymmetricState`
/// is the only thing that transitions this to `Initialized`.
pub struct CipherState<C: Cipher> {
    key: Option<[u8; 32]>,
    n: u64,
    _cipher: PhantomData<C>,
}

impl<C: Cipher> CipherState<C> {
    pub fn new() -> Self {
        CipherState { key: None, n: 0, _cipher: PhantomData }
    }

    pub fn initialize_key(&mut self, key: [u8; 32]) {
        self.key = Some(key);
        self.n = 0;
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Encrypts `plaintext` under the current key and nonce, then advances
    /// the nonce. If no key is set, `EncryptAndHash` falls back to returning
    /// the plaintext unchanged per the Noise specification, so this returns
    /// the plaintext verbatim rather than an error.
    pub fn encrypt_with_ad(&mut self, ad: &[u8], plaintext: &[u8]) -> Vec<u8> {
        match self.key {
            None => plaintext.to_vec(),
            Some(key) => {
                let ciphertext = C::encrypt(&key, self.n, ad, plaintext);
                self.n += 1;
                ciphertext
            }
        }
    }

    /// Decrypts `ciphertext` under the current key and nonce, then advances
    /// the nonce. Mirrors `encrypt_with_ad`'s no-key passthrough.
    pub fn decrypt_with_ad(&mut self, ad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        match self.key {
            None => Ok(ciphertext.to_vec()),
            Some(key) => {
                let plaintext = C::decrypt(&key, self.n, ad, ciphertext)?;
                self.n += 1;
                Ok(plaintext)
            }
        }
    }

    /// Rolls the cipher key forward via `HKDF(salt, key)`, replacing `salt`
    /// with the first 32-byte output and the cipher key with the second, and
    /// resetting the nonce to zero. Not called by this crate's handshake or
    /// transport code; exposed so a caller implementing BOLT #8's
    /// rotate-after-1000-messages policy has a tested ratchet to call
    /// instead of reimplementing one.
    pub fn rotate<H: crate::primitives::Hash>(&mut self, salt: &mut [u8; 32]) -> Result<()> {
        let key = self
            .key
            .ok_or(NoiseError::ConfigurationError("cannot rotate an unkeyed CipherState"))?;
        let (new_salt, new_key) = H::hkdf(salt, &key);
        *salt = new_salt;
        self.key = Some(new_key);
        self.n = 0;
        Ok(())
    }

    #[cfg(any(test, feature = "testing"))]
    pub fn key_bytes(&self) -> Option<[u8; 32]> {
        self.key
    }
}

impl<C: Cipher> Default for CipherState<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cipher> Drop for CipherState<C> {
    fn drop(&mut self) {
        if let Some(ref mut key) = self.key {
            key.zeroize();
        }
    }
}
