// Chat-bus messages exchanged with the bot.
//
// - `InboundMessage`: a command addressed to some module, as published by
//   the chat front end. `args` carries the raw text after the command word.
// - `OutboundMessage`: the module's reply, echoing the routing fields of the
//   request so the front end knows where to post `msg`.
//
// Unknown fields in inbound JSON are ignored, and missing routing fields
// default to empty strings; only `command` is required.

use serde::{Deserialize, Serialize};

/// Module name stamped on every reply.
pub const MODULE_NAME: &str = "morelike";

/// A command published on the bus.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub command: String,
    #[serde(default)]
    pub args: String,
    #[serde(default)]
    pub nick: String,
    #[serde(default)]
    pub dest: String,
}

/// A module's reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub module: String,
    pub msg: String,
    pub nick: String,
    pub dest: String,
    pub command: String,
    pub args: String,
}

impl OutboundMessage {
    /// Reply to `request` with `msg`, copying its routing fields.
    pub fn reply_to(request: &InboundMessage, msg: impl Into<String>) -> Self {
        Self {
            module: MODULE_NAME.to_string(),
            msg: msg.into(),
            nick: request.nick.clone(),
            dest: request.dest.clone(),
            command: request.command.clone(),
            args: request.args.clone(),
        }
    }
}
