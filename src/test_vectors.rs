//! BOLT #8's canonical cross-implementation test vectors for the `XK`
//! handshake, run through this crate's generic core instantiated with the
//! Lightning primitives (`Secp256k1Dh`, `ChaChaPolyCipher`, `Sha256Hash`).

use crate::handshake::{self, Handshake, HandshakeConfig};
use crate::pattern::XK;
use crate::primitives::{Dh, Secp256k1Dh};
use crate::rng::FixedRandomSource;
use hex_literal::hex;
use std::marker::PhantomData;

const INITIATOR_STATIC_PRIV: [u8; 32] = [0x11; 32];
const INITIATOR_EPHEMERAL_PRIV: [u8; 32] = [0x12; 32];
const RESPONDER_EPHEMERAL_PRIV: [u8; 32] = [0x22; 32];
const RESPONDER_STATIC_PUB: [u8; 33] =
    hex!("028d7500dd4c12685d1f568b4c2b5048e8534b873319f3a8daa612b469132ec7f7");

const ACT_ONE: [u8; 50] =
    hex!("00036360e856310ce5d294e8be33fc807077dc56ac80d95d9cd4ddbd21325eff73f70df6086551151f58b8afe6c195782c6a");
const ACT_TWO: [u8; 50] =
    hex!("0002466d7fcae563e5cb09a0d1870bb580344804617879a14949cf22285f1bae3f276e2470b93aac583c9ef6eafca3f730ae");
/// BOLT #8 describes act three as 66 bytes on the wire (version + 33-byte
/// encrypted static key + 16-byte key tag + 16-byte payload tag), but the
/// literal vector available here is only 50 bytes: version + ciphertext +
/// key tag, with the trailing payload tag missing. The equality check below
/// only covers what this vector actually commits to — the 49 bytes of act
/// three this core produces (it does not emit the leading version byte)
/// before the final payload tag.
const ACT_THREE_PREFIX: [u8; 50] =
    hex!("00b9e3a702e93e3a9948c2ed6e5fd7590a6e1c3a0344cfc9d5b57357049aa22355361aa02e55a8fc28fef5bd6d71ad0c3822");

const EXPECTED_SEND_KEY: [u8; 32] =
    hex!("969ab31b4d288cedf6218839b27a3e2140827047f2c0f01bf5c04435d43511a9");
const EXPECTED_RECV_KEY: [u8; 32] =
    hex!("bb9020b8965f4df047e07f955f3c4b88418984aadc5cdb35096b9ea8fa5c3442");
const EXPECTED_CHAINING_KEY: [u8; 32] =
    hex!("919219dbb2920afa8db80f9a51787a840bcf111ed8d588caf9ab4be716e42b01");

fn start_initiator() -> handshake::HandshakeWriter<Secp256k1Dh, crate::primitives::ChaChaPolyCipher, crate::primitives::Sha256Hash, FixedRandomSource> {
    let local_static = Secp256k1Dh::generate_keypair(&INITIATOR_STATIC_PRIV).unwrap();
    let handshake = handshake::initialize(
        HandshakeConfig {
            pattern: XK,
            initiator: true,
            prologue: b"lightning",
            local_static: Some(local_static),
            remote_static: Some(RESPONDER_STATIC_PUB),
            _dh: PhantomData,
        },
        FixedRandomSource::new(INITIATOR_EPHEMERAL_PRIV.to_vec()),
    )
    .unwrap();
    match handshake {
        Handshake::Writer(w) => w,
        Handshake::Reader(_) => unreachable!(),
    }
}

fn start_responder() -> handshake::HandshakeReader<Secp256k1Dh, crate::primitives::ChaChaPolyCipher, crate::primitives::Sha256Hash, FixedRandomSource> {
    let responder_static_priv = [0x21; 32];
    let local_static = Secp256k1Dh::generate_keypair(&responder_static_priv).unwrap();
    assert_eq!(local_static.public_key, RESPONDER_STATIC_PUB);
    let handshake = handshake::initialize(
        HandshakeConfig {
            pattern: XK,
            initiator: false,
            prologue: b"lightning",
            local_static: Some(local_static),
            remote_static: None,
            _dh: PhantomData,
        },
        FixedRandomSource::new(RESPONDER_EPHEMERAL_PRIV.to_vec()),
    )
    .unwrap();
    match handshake {
        Handshake::Reader(r) => r,
        Handshake::Writer(_) => unreachable!(),
    }
}

#[test]
fn act_one_matches_the_bolt8_test_vector() {
    let writer = start_initiator();
    let (_reader, act_one, split) = writer.write(&[]).unwrap();
    assert!(split.is_none());
    // This core does not emit BOLT #8's leading version byte (the caller's
    // responsibility), so it produces one byte less than the wire vector.
    assert_eq!(act_one, ACT_ONE[1..].to_vec());
}

#[test]
fn act_two_matches_the_bolt8_test_vector() {
    let writer = start_initiator();
    let reader = start_responder();

    let (reader_after_1, act_one, _) = writer.write(&[]).unwrap();
    assert_eq!(act_one, ACT_ONE[1..].to_vec());

    let (writer_after_1, _payload, split) = reader.read(&act_one).unwrap();
    assert!(split.is_none());

    let (_reader_after_2, act_two, split) = writer_after_1.write(&[]).unwrap();
    assert!(split.is_none());
    assert_eq!(act_two, ACT_TWO[1..].to_vec());
}

#[test]
fn act_three_and_post_handshake_keys_match_the_bolt8_test_vectors() {
    let writer = start_initiator();
    let reader = start_responder();

    let (reader_after_1, act_one, _) = writer.write(&[]).unwrap();
    let (writer_after_1, _, _) = reader.read(&act_one).unwrap();

    let (reader_after_2, act_two, _) = writer_after_1.write(&[]).unwrap();
    let (writer_after_2, _, _) = reader_after_1.read(&act_two).unwrap();

    let (_reader_after_3, act_three, split_initiator) = writer_after_2.write(&[]).unwrap();
    let transport_initiator = split_initiator.expect("act three completes the XK handshake");

    assert_eq!(&act_three[..49], &ACT_THREE_PREFIX[1..]);

    let (_writer_after_3, _, split_responder) = reader_after_2.read(&act_three).unwrap();
    let transport_responder = split_responder.expect("act three completes the XK handshake");

    assert_eq!(transport_initiator.sending.key_bytes().unwrap(), EXPECTED_SEND_KEY);
    assert_eq!(transport_initiator.receiving.key_bytes().unwrap(), EXPECTED_RECV_KEY);
    assert_eq!(transport_initiator.chaining_key, EXPECTED_CHAINING_KEY);

    assert_eq!(transport_responder.receiving.key_bytes().unwrap(), EXPECTED_SEND_KEY);
    assert_eq!(transport_responder.sending.key_bytes().unwrap(), EXPECTED_RECV_KEY);
    assert_eq!(transport_responder.chaining_key, EXPECTED_CHAINING_KEY);
}

#[test]
fn nonce_encoding_matches_the_known_vector() {
    use crate::primitives::Cipher;
    let ciphertext = crate::primitives::ChaChaPolyCipher::encrypt(&[0u8; 32], 0, &[], &[]);
    assert_eq!(ciphertext, hex!("4eb72fce0bdc994ce45202f8a14c88ef").to_vec());
}

#[test]
fn tampering_with_act_two_breaks_the_initiators_read() {
    let writer = start_initiator();
    let reader = start_responder();

    let (reader_after_1, act_one, _) = writer.write(&[]).unwrap();
    let (writer_after_1, _, _) = reader.read(&act_one).unwrap();
    let (_reader_after_2, mut act_two, _) = writer_after_1.write(&[]).unwrap();

    let last = act_two.len() - 1;
    act_two[last] ^= 0x01;

    assert!(reader_after_1.read(&act_two).is_err());
}
