//! The one concrete instantiation every caller of this crate actually
//! wants: `Noise_XK_secp256k1_ChaChaPoly_SHA256` with the Lightning
//! prologue. Contains no protocol logic of its own — it is type aliases
//! over the generic core plus two constructors, `initiator` and
//! `responder`, mirroring the teacher's `Machine::new`.

use crate::error::Result;
use crate::handshake::{self, Handshake, HandshakeConfig, HandshakeReader, HandshakeWriter, Transport as GenericTransport};
use crate::pattern::XK;
use crate::primitives::dh::PUB_KEY_LEN;
use crate::primitives::{ChaChaPolyCipher, KeyPair, Secp256k1Dh, Sha256Hash};
use crate::rng::RandomSource;
use std::marker::PhantomData;

/// BOLT #8's prologue: the ASCII bytes `"lightning"`, mixed into the
/// handshake hash before the first message.
pub const PROLOGUE: &[u8] = b"lightning";

pub type Writer<R> = HandshakeWriter<Secp256k1Dh, ChaChaPolyCipher, Sha256Hash, R>;
pub type Reader<R> = HandshakeReader<Secp256k1Dh, ChaChaPolyCipher, Sha256Hash, R>;
pub type Transport = GenericTransport<ChaChaPolyCipher>;

/// Starts a Lightning handshake as the initiator: the node that transmits
/// its static key over the wire (encrypted), having learned the
/// responder's static key out of band beforehand.
pub fn initiator<R: RandomSource>(
    local_static: KeyPair,
    remote_static: [u8; PUB_KEY_LEN],
    rng: R,
) -> Result<Writer<R>> {
    let handshake = handshake::initialize::<Secp256k1Dh, ChaChaPolyCipher, Sha256Hash, R>(
        HandshakeConfig {
            pattern: XK,
            initiator: true,
            prologue: PROLOGUE,
            local_static: Some(local_static),
            remote_static: Some(remote_static),
            _dh: PhantomData,
        },
        rng,
    )?;
    match handshake {
        Handshake::Writer(writer) => Ok(writer),
        Handshake::Reader(_) => unreachable!("initiator always starts as a writer"),
    }
}

/// Starts a Lightning handshake as the responder: the node whose static
/// key is known to the initiator in advance.
pub fn responder<R: RandomSource>(local_static: KeyPair, rng: R) -> Result<Reader<R>> {
    let handshake = handshake::initialize::<Secp256k1Dh, ChaChaPolyCipher, Sha256Hash, R>(
        HandshakeConfig {
            pattern: XK,
            initiator: false,
            prologue: PROLOGUE,
            local_static: Some(local_static),
            remote_static: None,
            _dh: PhantomData,
        },
        rng,
    )?;
    match handshake {
        Handshake::Reader(reader) => Ok(reader),
        Handshake::Writer(_) => unreachable!("responder always starts as a reader"),
    }
}
