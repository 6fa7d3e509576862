// morelike_bot — chat-bus module that answers "morelike" commands.
//
// Module overview:
// - `config.rs`:  clap CLI, JSON config file, and their resolution into a
//                 `BotConfig`; loading phonetic data into an `Engine`.
// - `handler.rs`: `MorelikeHandler`, turning one inbound message into at
//                 most one reply. Owns the engine and the random source.
// - `server.rs`:  TCP listener, reader threads (one per connection), and the
//                 main event loop that drives the handler.
// - `stdio.rs`:   the same request/reply loop over stdin and stdout.
//
// The bot can run as a standalone binary (`main.rs`) or be embedded via the
// library API (`start_bot`, `run_stdio`).

pub mod config;
pub mod handler;
pub mod server;
pub mod stdio;

pub use config::{BotConfig, Cli, ConfigError};
pub use handler::MorelikeHandler;
pub use server::{BotHandle, start_bot};
pub use stdio::run_stdio;
