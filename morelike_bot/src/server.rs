// TCP server and main event loop for the morelike bot.
//
// Architecture: thread-per-reader with a central `mpsc` channel.
//
// - **Listener thread** (`TcpListener::accept()` loop): accepts new TCP
//   connections and sends `InternalEvent::NewConnection` to the main thread.
// - **Reader threads** (one per connection): call `framing::read_message()`
//   in a loop and forward each raw line as `InternalEvent::MessageFrom`. On
//   EOF or a fatal read error they send `InternalEvent::Disconnected`.
// - **Main thread**: owns the `MorelikeHandler` (engine plus random source)
//   and the write half of every connection. Replies go back only to the
//   connection the request arrived on.
//
// Reader threads never write and the main thread never reads, so each
// `TcpStream` is used from one direction per thread.
//
// Shutdown: `BotHandle::stop` clears `keep_running`; the main loop notices
// within one `recv_timeout` tick, shuts down every open stream so blocked
// readers return, and exits.

use std::collections::HashMap;
use std::io::{self, BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use morelike_prng::RandomSource;
use morelike_protocol::framing::{read_message, write_message};

use crate::config::BotConfig;
use crate::handler::MorelikeHandler;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ConnectionId(u64);

/// Events sent from listener/reader threads to the main thread.
enum InternalEvent {
    NewConnection { stream: TcpStream, peer: SocketAddr },
    MessageFrom { conn: ConnectionId, payload: Vec<u8> },
    Disconnected { conn: ConnectionId },
}

/// Handle returned by `start_bot` to control the running server.
pub struct BotHandle {
    keep_running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl BotHandle {
    /// Signal the bot to stop and wait for it to shut down.
    pub fn stop(mut self) {
        self.keep_running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Start the bot on a background thread, bound to
/// `config.broker_host:config.broker_port`. Returns a handle for stopping
/// it and the actual bound address (port 0 lets the OS pick).
pub fn start_bot<R>(
    config: &BotConfig,
    handler: MorelikeHandler<R>,
) -> io::Result<(BotHandle, SocketAddr)>
where
    R: RandomSource + Send + 'static,
{
    let listener = TcpListener::bind((config.broker_host.as_str(), config.broker_port))?;
    let addr = listener.local_addr()?;
    let keep_running = Arc::new(AtomicBool::new(true));
    let keep_running_clone = keep_running.clone();

    let thread = thread::spawn(move || {
        run_bot(listener, handler, keep_running_clone);
    });

    Ok((
        BotHandle {
            keep_running,
            thread: Some(thread),
        },
        addr,
    ))
}

/// Per-connection state held by the main thread.
struct Connection {
    peer: SocketAddr,
    writer: BufWriter<TcpStream>,
}

/// Main loop. Runs until `keep_running` is set to false.
fn run_bot<R: RandomSource>(
    listener: TcpListener,
    mut handler: MorelikeHandler<R>,
    keep_running: Arc<AtomicBool>,
) {
    let (tx, rx): (Sender<InternalEvent>, Receiver<InternalEvent>) = mpsc::channel();
    let mut connections: HashMap<ConnectionId, Connection> = HashMap::new();
    let mut next_id = 0u64;

    // Non-blocking so the accept thread can check keep_running periodically.
    if let Err(e) = listener.set_nonblocking(true) {
        tracing::error!(error = %e, "failed to configure listener");
        return;
    }

    let keep_running_listener = keep_running.clone();
    let tx_listener = tx.clone();
    thread::spawn(move || {
        while keep_running_listener.load(Ordering::SeqCst) {
            match listener.accept() {
                Ok((stream, peer)) => {
                    stream.set_nonblocking(false).ok();
                    if tx_listener
                        .send(InternalEvent::NewConnection { stream, peer })
                        .is_err()
                    {
                        break;
                    }
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_BACKOFF);
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed, listener stopping");
                    break;
                }
            }
        }
    });

    while keep_running.load(Ordering::SeqCst) {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(event) => {
                handle_event(&mut handler, &mut connections, &mut next_id, event, &tx);
                while let Ok(event) = rx.try_recv() {
                    handle_event(&mut handler, &mut connections, &mut next_id, event, &tx);
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    for conn in connections.into_values() {
        conn.writer.get_ref().shutdown(Shutdown::Both).ok();
    }
    tracing::info!("morelike bot stopped");
}

fn handle_event<R: RandomSource>(
    handler: &mut MorelikeHandler<R>,
    connections: &mut HashMap<ConnectionId, Connection>,
    next_id: &mut u64,
    event: InternalEvent,
    tx: &Sender<InternalEvent>,
) {
    match event {
        InternalEvent::NewConnection { stream, peer } => {
            let read_half = match stream.try_clone() {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(%peer, error = %e, "failed to clone stream, dropping connection");
                    return;
                }
            };
            let conn = ConnectionId(*next_id);
            *next_id += 1;
            connections.insert(
                conn,
                Connection {
                    peer,
                    writer: BufWriter::new(stream),
                },
            );
            tracing::info!(%peer, id = conn.0, "connection opened");

            let tx_reader = tx.clone();
            thread::spawn(move || reader_loop(BufReader::new(read_half), conn, tx_reader));
        }
        InternalEvent::MessageFrom { conn, payload } => {
            let Some(reply) = handler.handle_bytes(&payload) else {
                return;
            };
            let Some(connection) = connections.get_mut(&conn) else {
                return;
            };
            if let Err(e) = write_message(&mut connection.writer, &reply) {
                tracing::warn!(peer = %connection.peer, error = %e, "write failed, closing");
                close(connections, conn);
            }
        }
        InternalEvent::Disconnected { conn } => close(connections, conn),
    }
}

fn close(connections: &mut HashMap<ConnectionId, Connection>, conn: ConnectionId) {
    if let Some(connection) = connections.remove(&conn) {
        connection.writer.get_ref().shutdown(Shutdown::Both).ok();
        tracing::info!(peer = %connection.peer, id = conn.0, "connection closed");
    }
}

/// Reader loop for a single connection. Runs in its own thread.
fn reader_loop(mut reader: BufReader<TcpStream>, conn: ConnectionId, tx: Sender<InternalEvent>) {
    loop {
        let event = match read_message(&mut reader) {
            Ok(payload) => InternalEvent::MessageFrom { conn, payload },
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(id = conn.0, error = %e, "skipping over-long line");
                continue;
            }
            Err(e) => {
                if e.kind() != io::ErrorKind::UnexpectedEof {
                    tracing::debug!(id = conn.0, error = %e, "read failed");
                }
                let _ = tx.send(InternalEvent::Disconnected { conn });
                break;
            }
        };
        if tx.send(event).is_err() {
            break;
        }
    }
}
