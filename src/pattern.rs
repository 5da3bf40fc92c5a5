//! Handshake patterns as data. The teacher hardcodes the XK message
//! sequence directly into `machine::Machine`'s act methods; here the
//! sequence is lifted into a `HandshakePattern` value so the same state
//! machine drives both `XK` and `NN`.

/// A single step of DH mixing or payload transfer within a handshake
/// message. `S`/`E` are "write my own key into the message"; the rest mix a
/// DH output into the chaining key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Write the sender's static public key into the message.
    S,
    /// Write the sender's ephemeral public key into the message.
    E,
    /// Mix `dh(local_ephemeral, remote_ephemeral)` into the chaining key.
    Ee,
    /// Mix `dh(initiator_ephemeral, responder_static)` into the chaining key.
    Es,
    /// Mix `dh(initiator_static, responder_ephemeral)` into the chaining key.
    Se,
    /// Mix `dh(local_static, remote_static)` into the chaining key.
    Ss,
}

/// Which keys each party is assumed to already know before the first
/// message, per Noise's pre-message pattern notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreMessage {
    pub initiator_knows_responder_static: bool,
}

/// A named sequence of handshake messages, each a list of tokens processed
/// in order by alternating writer/reader roles.
#[derive(Debug, Clone, Copy)]
pub struct HandshakePattern {
    pub name: &'static str,
    pub pre_message: PreMessage,
    pub messages: &'static [&'static [Token]],
}

/// `NN`: no static keys known in advance, two messages, used for tests and
/// any transport that doesn't need mutual authentication.
pub const NN: HandshakePattern = HandshakePattern {
    name: "NN",
    pre_message: PreMessage { initiator_knows_responder_static: false },
    messages: &[&[Token::E], &[Token::E, Token::Ee]],
};

/// `XK`: the responder's static key is known to the initiator in advance
/// (out of band); the initiator's static key is transmitted, encrypted,
/// during the handshake. This is the Lightning BOLT #8 pattern.
pub const XK: HandshakePattern = HandshakePattern {
    name: "XK",
    pre_message: PreMessage { initiator_knows_responder_static: true },
    messages: &[
        &[Token::E, Token::Es],
        &[Token::E, Token::Ee],
        &[Token::S, Token::Se],
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xk_has_three_messages() {
        assert_eq!(XK.messages.len(), 3);
    }

    #[test]
    fn nn_has_two_messages() {
        assert_eq!(NN.messages.len(), 2);
    }

    #[test]
    fn xk_requires_a_known_responder_static_key() {
        assert!(XK.pre_message.initiator_knows_responder_static);
        assert!(!NN.pre_message.initiator_knows_responder_static);
    }
}
