// morelike_protocol — wire format between the chat bus and the morelike bot.
//
// Module overview:
// - `message.rs`: `InboundMessage` (command requests) and `OutboundMessage`
//   (module replies), plus `MODULE_NAME`.
// - `framing.rs`: newline-delimited framing over any `BufRead`/`Write`
//   stream, one JSON object per line.
//
// Design decisions:
// - **JSON serialization.** The bus already speaks JSON objects with
//   `command`/`args`/`nick`/`dest` fields.
// - **Line framing.** Messages are short text; newline-delimited JSON is
//   readable with `nc` and needs no length prefix.
// - **No async runtime.** Blocking `std::io` streams only.

pub mod framing;
pub mod message;

pub use framing::{MAX_MESSAGE_SIZE, read_message, write_message};
pub use message::{InboundMessage, MODULE_NAME, OutboundMessage};

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn framed_request_then_reply() {
        let req = InboundMessage {
            command: "morelike".into(),
            args: "hello world".into(),
            nick: "bob".into(),
            dest: "#chan".into(),
        };
        let mut wire = Vec::new();
        write_message(&mut wire, &serde_json::to_vec(&req).unwrap()).unwrap();

        let mut cursor = Cursor::new(&wire);
        let bytes = read_message(&mut cursor).unwrap();
        let recovered: InboundMessage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(recovered, req);

        let reply = OutboundMessage::reply_to(&recovered, "hello world? More like hello world");
        let mut wire = Vec::new();
        write_message(&mut wire, &serde_json::to_vec(&reply).unwrap()).unwrap();
        assert_eq!(wire.iter().filter(|&&b| b == b'\n').count(), 1);
    }
}
