// Newline-delimited message framing.
//
// Each message is one line: the payload bytes followed by `\n`. A trailing
// `\r` is tolerated on read so hand-typed input from a terminal or `nc`
// works. Like the rest of this crate the functions move raw bytes; JSON
// encoding happens at the call site.
//
// `MAX_MESSAGE_SIZE` bounds how much a reader buffers before giving up on a
// line that never ends.

use std::io::{self, BufRead, Read, Write};

/// Maximum payload size (64 KiB), excluding the newline.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Write `msg` followed by a newline.
///
/// Returns `InvalidInput` if the payload contains a newline or exceeds
/// `MAX_MESSAGE_SIZE`.
pub fn write_message<W: Write>(writer: &mut W, msg: &[u8]) -> io::Result<()> {
    let len = msg.len();
    if len > MAX_MESSAGE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("message too large: {len} bytes (max {MAX_MESSAGE_SIZE})"),
        ));
    }
    if msg.contains(&b'\n') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "message contains a newline",
        ));
    }
    writer.write_all(msg)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read one line, without its `\n` or `\r\n` terminator.
///
/// Returns `UnexpectedEof` when the stream is already at end. A final line
/// without a trailing newline is still returned. Returns `InvalidData` if
/// the line exceeds `MAX_MESSAGE_SIZE`.
pub fn read_message<R: BufRead>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let limit = (MAX_MESSAGE_SIZE + 2) as u64;
    let n = reader.by_ref().take(limit).read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream closed",
        ));
    }
    let terminated = buf.last() == Some(&b'\n');
    if terminated {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    if buf.len() > MAX_MESSAGE_SIZE || (!terminated && n as u64 == limit) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("message exceeds {MAX_MESSAGE_SIZE} bytes"),
        ));
    }
    Ok(buf)
}
