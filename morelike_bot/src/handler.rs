// Request dispatch: inbound bus message in, optional reply out.
//
// The handler owns the engine and the random source. It is driven from a
// single thread (the server's event loop or the stdio loop), so it needs no
// locking and picks stay reproducible under a fixed seed.

use morelike_engine::Engine;
use morelike_prng::{PunRng, RandomSource};
use morelike_protocol::{InboundMessage, OutboundMessage};

/// The one command this module answers.
pub const COMMAND: &str = "morelike";

pub struct MorelikeHandler<R = PunRng> {
    engine: Engine,
    rng: R,
}

impl<R: RandomSource> MorelikeHandler<R> {
    pub fn new(engine: Engine, rng: R) -> Self {
        Self { engine, rng }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Answer `request` if it is addressed to this module.
    pub fn handle(&mut self, request: &InboundMessage) -> Option<OutboundMessage> {
        if request.command != COMMAND {
            tracing::trace!(command = %request.command, "ignoring command for another module");
            return None;
        }
        let msg = self.engine.morelike(&request.args, &mut self.rng);
        tracing::debug!(nick = %request.nick, dest = %request.dest, %msg, "replying");
        Some(OutboundMessage::reply_to(request, msg))
    }

    /// Decode a raw payload, handle it, and encode the reply.
    ///
    /// Blank and malformed payloads are dropped; malformed ones are logged.
    pub fn handle_bytes(&mut self, payload: &[u8]) -> Option<Vec<u8>> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        let request: InboundMessage = match serde_json::from_slice(payload) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed message");
                return None;
            }
        };
        let reply = self.handle(&request)?;
        match serde_json::to_vec(&reply) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode reply");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use morelike_prng::ScriptedSource;
    use morelike_protocol::MODULE_NAME;

    use super::*;

    fn handler(subs: &[&str], ignored: &[&str]) -> MorelikeHandler<ScriptedSource> {
        MorelikeHandler::new(
            Engine::with_defaults(subs, ignored),
            ScriptedSource::default(),
        )
    }

    fn request(command: &str, args: &str) -> InboundMessage {
        InboundMessage {
            command: command.into(),
            args: args.into(),
            nick: "alice".into(),
            dest: "#puns".into(),
        }
    }

    #[test]
    fn answers_morelike_command() {
        let mut h = handler(&["bat"], &[]);
        let reply = h.handle(&request("morelike", "cat")).unwrap();
        assert_eq!(reply.module, MODULE_NAME);
        assert_eq!(reply.msg, "cat? More like bat");
        assert_eq!(reply.nick, "alice");
        assert_eq!(reply.dest, "#puns");
        assert_eq!(reply.command, "morelike");
        assert_eq!(reply.args, "cat");
    }

    #[test]
    fn ignores_other_commands() {
        let mut h = handler(&["bat"], &[]);
        assert!(h.handle(&request("weather", "cat")).is_none());
        assert!(h.handle(&request("MoreLike", "cat")).is_none());
    }

    #[test]
    fn empty_args_still_reply() {
        let mut h = handler(&["bat"], &[]);
        let reply = h.handle(&request("morelike", "")).unwrap();
        assert_eq!(reply.msg, "? More like ");
    }

    #[test]
    fn handle_bytes_round_trips_json() {
        let mut h = handler(&[], &["hello"]);
        let out = h
            .handle_bytes(br#"{"command":"morelike","args":"hello world","nick":"n","dest":"d"}"#)
            .unwrap();
        let reply: OutboundMessage = serde_json::from_slice(&out).unwrap();
        assert_eq!(reply.msg, "hello world? More like hello world");
    }

    #[test]
    fn handle_bytes_drops_garbage() {
        let mut h = handler(&["bat"], &[]);
        assert!(h.handle_bytes(b"not json").is_none());
        assert!(h.handle_bytes(b"   ").is_none());
        assert!(h.handle_bytes(br#"{"args":"cat"}"#).is_none());
    }
}
