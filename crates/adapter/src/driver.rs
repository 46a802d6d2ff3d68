//! Line driver - feeds protocol messages from a reader into a controller
//!
//! Protocol and validation problems are answered with `error` messages and
//! the driver keeps going; only I/O failures end the run.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::debug;

use crate::engine::{Game, GameController};
use crate::protocol::{
    create_error, create_frame, parse_message, ErrorCode, OutboundMessage, ParsedMessage,
};

/// Handle one inbound line and return the replies in order
///
/// Blank lines produce no reply. A batch produces one frame message per
/// action and stops at the first rejected action.
pub fn handle_line<G: Game>(controller: &mut GameController<G>, line: &str) -> Vec<OutboundMessage> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    let message = match parse_message(line) {
        Ok(message) => message,
        Err(e) => {
            return vec![OutboundMessage::Error(create_error(
                0,
                ErrorCode::InvalidMessage,
                &e.to_string(),
            ))]
        }
    };

    match message {
        ParsedMessage::Action(msg) => {
            let reply = match controller.perform_action(msg.to_input()) {
                Ok(data) => OutboundMessage::Frame(create_frame(msg.seq, data)),
                Err(e) => OutboundMessage::Error(create_error(msg.seq, (&e).into(), &e.to_string())),
            };
            vec![reply]
        }
        ParsedMessage::Batch(msg) => {
            let mut replies = Vec::with_capacity(msg.actions.0.len());
            for entry in msg.actions.0.iter() {
                match controller.perform_action(entry.to_input()) {
                    Ok(data) => replies.push(OutboundMessage::Frame(create_frame(msg.seq, data))),
                    Err(e) => {
                        replies.push(OutboundMessage::Error(create_error(
                            msg.seq,
                            (&e).into(),
                            &e.to_string(),
                        )));
                        break;
                    }
                }
            }
            replies
        }
        ParsedMessage::Unknown(msg) => {
            debug!("ignoring message of unknown type {:?}", msg.msg_type);
            vec![OutboundMessage::Error(create_error(
                msg.seq,
                ErrorCode::UnknownType,
                &format!("unknown message type: {}", msg.msg_type),
            ))]
        }
    }
}

/// Drive `controller` from line-delimited JSON until `reader` is exhausted
///
/// Each reply is written as one JSON line and flushed immediately.
pub fn run_lines<G, R, W>(controller: &mut GameController<G>, reader: R, mut writer: W) -> Result<()>
where
    G: Game,
    R: BufRead,
    W: Write,
{
    for (n, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read input line {}", n + 1))?;
        for reply in handle_line(controller, &line) {
            serde_json::to_writer(&mut writer, &reply).context("failed to encode reply")?;
            writer.write_all(b"\n").context("failed to write reply")?;
        }
        writer.flush().context("failed to flush output")?;
    }
    Ok(())
}
