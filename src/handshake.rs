//! The handshake state machine: a `Writer`/`Reader` typestate pair that
//! drives a `HandshakePattern` to completion. Grounded in the teacher's
//! `machine::HandshakeState`/`Machine` act methods, generalized from a
//! hardcoded XK-only sequence to any `HandshakePattern`.

use crate::cipher_state::CipherState;
use crate::error::{NoiseError, Result};
use crate::pattern::{HandshakePattern, Token};
use crate::primitives::dh::{DH_LEN, PUB_KEY_LEN};
use crate::primitives::{Cipher, Dh, Hash, KeyPair};
use crate::rng::RandomSource;
use crate::symmetric_state::SymmetricState;
use std::marker::PhantomData;

/// The two transport cipher states and final chaining key `split` yields,
/// from this party's point of view: `sending` encrypts this party's
/// outbound messages, `receiving` decrypts the peer's.
pub struct Transport<C: Cipher> {
    pub sending: CipherState<C>,
    pub receiving: CipherState<C>,
    pub chaining_key: [u8; 32],
}

struct HandshakeCore<D: Dh, C: Cipher, H: Hash, R: RandomSource> {
    symmetric: SymmetricState<C, H>,
    pattern: HandshakePattern,
    message_index: usize,
    initiator: bool,
    local_static: Option<KeyPair>,
    local_ephemeral: Option<KeyPair>,
    remote_static: Option<[u8; PUB_KEY_LEN]>,
    remote_ephemeral: Option<[u8; PUB_KEY_LEN]>,
    rng: R,
    _dh: PhantomData<D>,
}

impl<D: Dh, C: Cipher, H: Hash, R: RandomSource> HandshakeCore<D, C, H, R> {
    /// `ES`/`SE` depend only on the fixed initiator/responder identity, not
    /// on which role is currently writing: both parties run the same
    /// branch for a given token, computing the matching half of the DH from
    /// whichever two keys they locally hold.
    fn apply_dh_token(&self, token: Token) -> Result<[u8; DH_LEN]> {
        let missing = || NoiseError::ProtocolViolation("required key not yet available for DH");
        match token {
            Token::Ee => {
                let e = self.local_ephemeral.as_ref().ok_or_else(missing)?;
                let re = self.remote_ephemeral.as_ref().ok_or_else(missing)?;
                D::dh(e, re)
            }
            Token::Ss => {
                let s = self.local_static.as_ref().ok_or_else(missing)?;
                let rs = self.remote_static.as_ref().ok_or_else(missing)?;
                D::dh(s, rs)
            }
            Token::Es => {
                if self.initiator {
                    let e = self.local_ephemeral.as_ref().ok_or_else(missing)?;
                    let rs = self.remote_static.as_ref().ok_or_else(missing)?;
                    D::dh(e, rs)
                } else {
                    let s = self.local_static.as_ref().ok_or_else(missing)?;
                    let re = self.remote_ephemeral.as_ref().ok_or_else(missing)?;
                    D::dh(s, re)
                }
            }
            Token::Se => {
                if self.initiator {
                    let s = self.local_static.as_ref().ok_or_else(missing)?;
                    let re = self.remote_ephemeral.as_ref().ok_or_else(missing)?;
                    D::dh(s, re)
                } else {
                    let e = self.local_ephemeral.as_ref().ok_or_else(missing)?;
                    let rs = self.remote_static.as_ref().ok_or_else(missing)?;
                    D::dh(e, rs)
                }
            }
            Token::E | Token::S => unreachable!("not a DH token"),
        }
    }

    fn take_tokens(&mut self) -> Result<&'static [Token]> {
        self.pattern
            .messages
            .get(self.message_index)
            .copied()
            .ok_or(NoiseError::ProtocolViolation("handshake message list already exhausted"))
    }

    fn finish_if_done(&self) -> Option<Transport<C>> {
        if self.message_index >= self.pattern.messages.len() {
            let (c1, c2, chaining_key) = self.symmetric.split();
            let (sending, receiving) = if self.initiator { (c1, c2) } else { (c2, c1) };
            Some(Transport { sending, receiving, chaining_key })
        } else {
            None
        }
    }
}

/// Either role a freshly-initialized handshake can start as: the initiator
/// always starts as a `Writer`, the responder always as a `Reader`.
pub enum Handshake<D: Dh, C: Cipher, H: Hash, R: RandomSource> {
    Writer(HandshakeWriter<D, C, H, R>),
    Reader(HandshakeReader<D, C, H, R>),
}

pub struct HandshakeWriter<D: Dh, C: Cipher, H: Hash, R: RandomSource> {
    core: HandshakeCore<D, C, H, R>,
}

pub struct HandshakeReader<D: Dh, C: Cipher, H: Hash, R: RandomSource> {
    core: HandshakeCore<D, C, H, R>,
}

/// Parameters needed to initialize a handshake. `remote_static` must be
/// `Some` when the initiator is the caller and the pattern's pre-message
/// requires it (e.g. `XK`); `local_static` must be `Some` whenever the
/// caller's role will later transmit an `S` token.
pub struct HandshakeConfig<'a, D: Dh> {
    pub pattern: HandshakePattern,
    pub initiator: bool,
    pub prologue: &'a [u8],
    pub local_static: Option<KeyPair>,
    pub remote_static: Option<[u8; PUB_KEY_LEN]>,
    pub _dh: PhantomData<D>,
}

/// `HandshakeState` construction: builds the protocol name, seeds the
/// symmetric state with the prologue, applies the pattern's pre-message
/// mixing, and returns the role the caller starts as.
pub fn initialize<D: Dh, C: Cipher, H: Hash, R: RandomSource>(
    config: HandshakeConfig<'_, D>,
    rng: R,
) -> Result<Handshake<D, C, H, R>> {
    let protocol_name =
        format!("Noise_{}_{}_{}_{}", config.pattern.name, D::NAME, C::NAME, H::NAME);
    let mut symmetric = SymmetricState::<C, H>::initialize_symmetric(protocol_name.as_bytes());
    symmetric.mix_hash(config.prologue);

    if config.pattern.pre_message.initiator_knows_responder_static {
        let responder_static = if config.initiator {
            config.remote_static.ok_or(NoiseError::ConfigurationError(
                "this pattern requires the responder's static key to be known in advance",
            ))?
        } else {
            config
                .local_static
                .as_ref()
                .ok_or(NoiseError::ConfigurationError(
                    "the responder needs a static key to run this pattern",
                ))?
                .public_key
        };
        symmetric.mix_hash(&responder_static);
    }

    let core = HandshakeCore {
        symmetric,
        pattern: config.pattern,
        message_index: 0,
        initiator: config.initiator,
        local_static: config.local_static,
        local_ephemeral: None,
        remote_static: config.remote_static,
        remote_ephemeral: None,
        rng,
        _dh: PhantomData,
    };

    if config.initiator {
        Ok(Handshake::Writer(HandshakeWriter { core }))
    } else {
        Ok(Handshake::Reader(HandshakeReader { core }))
    }
}

impl<D: Dh, C: Cipher, H: Hash, R: RandomSource> HandshakeWriter<D, C, H, R> {
    /// Executes the head message's tokens, appends `encryptAndHash(payload)`,
    /// and returns the flipped-role reader, the wire bytes, and — once the
    /// message list is exhausted — the transport cipher states.
    pub fn write(
        mut self,
        payload: &[u8],
    ) -> Result<(HandshakeReader<D, C, H, R>, Vec<u8>, Option<Transport<C>>)> {
        let tokens = self.core.take_tokens()?;
        let mut buffer = Vec::new();

        for &token in tokens {
            match token {
                Token::E => {
                    let priv_bytes = self.core.rng.next_bytes(DH_LEN);
                    let keypair = D::generate_keypair(&priv_bytes)?;
                    self.core.symmetric.mix_hash(&keypair.public_key);
                    buffer.extend_from_slice(&keypair.public_key);
                    self.core.local_ephemeral = Some(keypair);
                }
                Token::S => {
                    let static_key = self
                        .core
                        .local_static
                        .as_ref()
                        .ok_or(NoiseError::ConfigurationError(
                            "pattern requires a local static key this party does not have",
                        ))?
                        .public_key;
                    let ciphertext = self.core.symmetric.encrypt_and_hash(&static_key);
                    buffer.extend_from_slice(&ciphertext);
                }
                _ => {
                    let dh_output = self.core.apply_dh_token(token)?;
                    self.core.symmetric.mix_key(&dh_output);
                }
            }
        }

        buffer.extend_from_slice(&self.core.symmetric.encrypt_and_hash(payload));
        self.core.message_index += 1;
        let transport = self.core.finish_if_done();

        Ok((HandshakeReader { core: self.core }, buffer, transport))
    }
}

impl<D: Dh, C: Cipher, H: Hash, R: RandomSource> HandshakeReader<D, C, H, R> {
    /// Mirrors `HandshakeWriter::write`: consumes the head message's tokens
    /// off the front of `bytes`, returning the flipped-role writer, the
    /// recovered payload, and the transport cipher states once complete.
    pub fn read(
        mut self,
        bytes: &[u8],
    ) -> Result<(HandshakeWriter<D, C, H, R>, Vec<u8>, Option<Transport<C>>)> {
        let tokens = self.core.take_tokens()?;
        let mut cursor = 0usize;

        fn take<'a>(bytes: &'a [u8], cursor: &mut usize, n: usize) -> Result<&'a [u8]> {
            let end = *cursor + n;
            let slice = bytes
                .get(*cursor..end)
                .ok_or(NoiseError::ProtocolViolation("message buffer shorter than the pattern expects"))?;
            *cursor = end;
            Ok(slice)
        }

        for &token in tokens {
            match token {
                Token::E => {
                    let slice = take(bytes, &mut cursor, PUB_KEY_LEN)?;
                    let mut re = [0u8; PUB_KEY_LEN];
                    re.copy_from_slice(slice);
                    self.core.symmetric.mix_hash(&re);
                    self.core.remote_ephemeral = Some(re);
                }
                Token::S => {
                    let length =
                        if self.core.symmetric.has_key() { PUB_KEY_LEN + crate::primitives::TAG_LEN } else { PUB_KEY_LEN };
                    let slice = take(bytes, &mut cursor, length)?;
                    let decrypted = self.core.symmetric.decrypt_and_hash(slice)?;
                    let mut rs = [0u8; PUB_KEY_LEN];
                    rs.copy_from_slice(&decrypted);
                    self.core.remote_static = Some(rs);
                }
                _ => {
                    let dh_output = self.core.apply_dh_token(token)?;
                    self.core.symmetric.mix_key(&dh_output);
                }
            }
        }

        let remainder = bytes
            .get(cursor..)
            .ok_or(NoiseError::ProtocolViolation("message buffer shorter than the pattern expects"))?;
        let payload = self.core.symmetric.decrypt_and_hash(remainder)?;
        self.core.message_index += 1;
        let transport = self.core.finish_if_done();

        Ok((HandshakeWriter { core: self.core }, payload, transport))
    }
}
