// Line-oriented stdin/stdout mode.
//
// Reads one JSON request per line and writes one JSON reply per answered
// request. Handy for piping test fixtures through the bot or fronting it
// with another process instead of a socket.

use std::io::{self, BufRead, Write};

use morelike_prng::RandomSource;
use morelike_protocol::{read_message, write_message};

use crate::handler::MorelikeHandler;

/// Serve requests from `input` until end of stream.
///
/// Over-long lines are logged and skipped; the tail of such a line is then
/// dropped as malformed. Other I/O errors end the loop.
pub fn run_stdio<I, O, R>(
    input: &mut I,
    output: &mut O,
    handler: &mut MorelikeHandler<R>,
) -> io::Result<()>
where
    I: BufRead,
    O: Write,
    R: RandomSource,
{
    loop {
        match read_message(input) {
            Ok(payload) => {
                if let Some(reply) = handler.handle_bytes(&payload) {
                    write_message(output, &reply)?;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(error = %e, "skipping over-long input line");
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use morelike_engine::Engine;
    use morelike_prng::ScriptedSource;
    use morelike_protocol::{MAX_MESSAGE_SIZE, OutboundMessage};

    use super::*;

    fn run(input: &[u8]) -> Vec<OutboundMessage> {
        let mut handler =
            MorelikeHandler::new(Engine::with_defaults(["bat"], ["hello"]), ScriptedSource::default());
        let mut output = Vec::new();
        run_stdio(&mut Cursor::new(input.to_vec()), &mut output, &mut handler).unwrap();
        output
            .split(|&b| b == b'\n')
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_slice(line).unwrap())
            .collect()
    }

    #[test]
    fn replies_only_to_morelike_requests() {
        let input = concat!(
            r#"{"command":"morelike","args":"cat","nick":"a","dest":"b"}"#,
            "\n",
            r#"{"command":"ping","args":""}"#,
            "\n",
            "garbage\n",
            "\n",
            r#"{"command":"morelike","args":"hello cat"}"#,
            "\n",
        );
        let replies = run(input.as_bytes());
        let msgs: Vec<&str> = replies.iter().map(|r| r.msg.as_str()).collect();
        assert_eq!(
            msgs,
            ["cat? More like bat", "hello cat? More like hello bat"]
        );
    }

    #[test]
    fn survives_over_long_line() {
        let mut input = vec![b'x'; MAX_MESSAGE_SIZE * 2];
        input.push(b'\n');
        input.extend_from_slice(br#"{"command":"morelike","args":"cat"}"#);
        input.push(b'\n');
        let replies = run(&input);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].msg, "cat? More like bat");
    }

    #[test]
    fn empty_input_is_clean_exit() {
        assert!(run(b"").is_empty());
    }
}
