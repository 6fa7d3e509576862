// Integration smoke test for the TCP server.
//
// Starts the bot on an OS-assigned localhost port and talks to it through
// plain sockets using the protocol crate's framing, the same way a chat-bus
// bridge would.

use std::io::{BufReader, BufWriter, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use morelike_bot::{BotConfig, MorelikeHandler, start_bot};
use morelike_engine::Engine;
use morelike_prng::PunRng;
use morelike_protocol::framing::{read_message, write_message};
use morelike_protocol::{InboundMessage, MODULE_NAME, OutboundMessage};

fn connect(addr: SocketAddr) -> (BufReader<TcpStream>, BufWriter<TcpStream>) {
    let stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    let reader = BufReader::new(stream.try_clone().unwrap());
    (reader, BufWriter::new(stream))
}

fn send(writer: &mut BufWriter<TcpStream>, msg: &InboundMessage) {
    write_message(writer, &serde_json::to_vec(msg).unwrap()).unwrap();
}

fn recv(reader: &mut BufReader<TcpStream>) -> OutboundMessage {
    let bytes = read_message(reader).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(command: &str, args: &str, nick: &str) -> InboundMessage {
    InboundMessage {
        command: command.into(),
        args: args.into(),
        nick: nick.into(),
        dest: "#puns".into(),
    }
}

fn start() -> (morelike_bot::BotHandle, SocketAddr) {
    let config = BotConfig {
        broker_host: "127.0.0.1".into(),
        broker_port: 0,
        ..BotConfig::default()
    };
    let engine = Engine::with_defaults(["bat", "nut"], ["hello"]);
    start_bot(&config, MorelikeHandler::new(engine, PunRng::new(1))).unwrap()
}

#[test]
fn answers_and_ignores_over_tcp() {
    let (handle, addr) = start();
    let (mut reader, mut writer) = connect(addr);

    send(&mut writer, &request("morelike", "cat", "alice"));
    let reply = recv(&mut reader);
    assert_eq!(reply.module, MODULE_NAME);
    assert_eq!(reply.msg, "cat? More like bat");
    assert_eq!(reply.nick, "alice");
    assert_eq!(reply.dest, "#puns");
    assert_eq!(reply.command, "morelike");
    assert_eq!(reply.args, "cat");

    // Neither of these produces a reply, so the next line read must be the
    // answer to the request after them.
    send(&mut writer, &request("weather", "london", "alice"));
    writer.write_all(b"this is not json\n").unwrap();
    writer.flush().unwrap();
    send(&mut writer, &request("morelike", "hello butter", "bob"));

    let reply = recv(&mut reader);
    assert_eq!(reply.msg, "hello butter? More like hello nutter");
    assert_eq!(reply.nick, "bob");

    handle.stop();
}

#[test]
fn replies_go_to_the_requesting_connection() {
    let (handle, addr) = start();
    let (mut reader_a, mut writer_a) = connect(addr);
    let (mut reader_b, mut writer_b) = connect(addr);

    send(&mut writer_b, &request("morelike", "butter", "b"));
    send(&mut writer_a, &request("morelike", "cat", "a"));

    assert_eq!(recv(&mut reader_a).msg, "cat? More like bat");
    assert_eq!(recv(&mut reader_b).msg, "butter? More like nutter");

    handle.stop();
}

#[test]
fn stop_closes_open_connections() {
    let (handle, addr) = start();
    let (mut reader, mut writer) = connect(addr);
    send(&mut writer, &request("morelike", "cat", "a"));
    assert_eq!(recv(&mut reader).msg, "cat? More like bat");

    handle.stop();

    let err = read_message(&mut reader).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}
