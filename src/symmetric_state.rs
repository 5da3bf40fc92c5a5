//! `SymmetricState`: the chaining key and running handshake hash, plus the
//! `CipherState` they key. Grounded in the teacher's
//! `machine::SymmetricState`, generalized over `Cipher`/`Hash`.

use crate::cipher_state::CipherState;
use crate::error::Result;
use crate::primitives::{Cipher, Hash};
use std::marker::PhantomData;
use zeroize::Zeroize;

pub struct SymmetricState<C: Cipher, H: Hash> {
    chaining_key: [u8; 32],
    handshake_hash: [u8; 32],
    cipher_state: CipherState<C>,
    _hash: PhantomData<H>,
}

impl<C: Cipher, H: Hash> SymmetricState<C, H> {
    /// `InitializeSymmetric`: `h = HASH(protocol_name)` (padded/truncated to
    /// `HASH_LEN` per Noise's rule), `ck = h`, cipher state unkeyed.
    pub fn initialize_symmetric(protocol_name: &[u8]) -> Self {
        let h = if protocol_name.len() <= 32 {
            let mut padded = [0u8; 32];
            padded[..protocol_name.len()].copy_from_slice(protocol_name);
            padded
        } else {
            H::hash(protocol_name)
        };

        SymmetricState {
            chaining_key: h,
            handshake_hash: h,
            cipher_state: CipherState::new(),
            _hash: PhantomData,
        }
    }

    pub fn handshake_hash(&self) -> [u8; 32] {
        self.handshake_hash
    }

    /// Whether a key has been mixed in yet, which determines whether an `S`
    /// token's public key is transmitted in the clear or AEAD-encrypted.
    pub fn has_key(&self) -> bool {
        self.cipher_state.has_key()
    }

    /// `MixKey(input_key_material)`: ratchets `ck` via HKDF and rekeys the
    /// cipher state with the second HKDF output, truncated to the cipher's
    /// key length (32 bytes here, so no truncation is actually needed).
    pub fn mix_key(&mut self, input_key_material: &[u8]) {
        let (ck, temp_k) = H::hkdf(&self.chaining_key, input_key_material);
        self.chaining_key = ck;
        self.cipher_state.initialize_key(temp_k);
    }

    /// `MixHash(data)`: `h = HASH(h || data)`.
    pub fn mix_hash(&mut self, data: &[u8]) {
        let mut buf = Vec::with_capacity(32 + data.len());
        buf.extend_from_slice(&self.handshake_hash);
        buf.extend_from_slice(data);
        self.handshake_hash = H::hash(&buf);
    }

    /// `EncryptAndHash(plaintext)`: encrypt under the current cipher state
    /// (or pass through unkeyed), then mix the *ciphertext* into `h`.
    pub fn encrypt_and_hash(&mut self, plaintext: &[u8]) -> Vec<u8> {
        let ciphertext = self.cipher_state.encrypt_with_ad(&self.handshake_hash, plaintext);
        self.mix_hash(&ciphertext);
        ciphertext
    }

    /// `DecryptAndHash(ciphertext)`: mix the ciphertext into `h` before
    /// decrypting, exactly mirroring the encrypt side so both parties mix
    /// the same bytes into the transcript hash regardless of which one was
    /// holding the key at this step.
    pub fn decrypt_and_hash(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let plaintext = self.cipher_state.decrypt_with_ad(&self.handshake_hash, ciphertext)?;
        self.mix_hash(ciphertext);
        Ok(plaintext)
    }

    /// `Split`: derives the two transport cipher states from the final
    /// chaining key, and returns that chaining key itself (not the
    /// handshake hash) as the third value. Takes `&self` rather than
    /// consuming it: the handshake state machine calls this once its
    /// message list is exhausted but still returns a (now-inert)
    /// flipped-role object to the caller per the write/read contract, so
    /// the symmetric state has to survive the call; it is discarded, and
    /// its chaining key zeroized, when the enclosing handshake state is
    /// eventually dropped.
    pub fn split(&self) -> (CipherState<C>, CipherState<C>, [u8; 32]) {
        let (k1, k2) = H::hkdf(&self.chaining_key, &[]);
        let mut c1 = CipherState::<C>::new();
        let mut c2 = CipherState::<C>::new();
        c1.initialize_key(k1);
        c2.initialize_key(k2);
        (c1, c2, self.chaining_key)
    }
}

impl<C: Cipher, H: Hash> Drop for SymmetricState<C, H> {
    fn drop(&mut self) {
        self.chaining_key.zeroize();
    }
}
