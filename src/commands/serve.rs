//! `storinfo serve` - host the storage channel over line-delimited JSON
//!
//! Each stdin line is one method call envelope; each stdout line is the
//! matching response. Requests are answered in order.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::io::{self, BufRead, Write};

use statkit::channel::Channel;

use crate::Context;

/// Error code for a line that is not a valid method call envelope
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

/// Transport-level reply to an undecodable request line
#[derive(Serialize)]
struct InvalidRequest<'a> {
    status: &'static str,
    code: &'static str,
    message: &'a str,
}

pub fn run(_ctx: &Context) -> Result<()> {
    let channel = super::call::channel()?;
    log::info!(
        "Serving storage channel (default root: {})",
        channel.default_root().display()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let served = serve(&channel, stdin.lock(), stdout.lock())?;

    log::info!("Input closed after {} request(s)", served);
    Ok(())
}

/// Answer every request line from `input` on `output`, returning the count.
///
/// Lines that are not UTF-8 or not a call envelope get an `INVALID_REQUEST`
/// reply; only I/O failures end the loop early.
pub fn serve(channel: &Channel, mut input: impl BufRead, mut output: impl Write) -> Result<usize> {
    let mut served = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read request")?;
        if read == 0 {
            break;
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let request = line.trim();
                if request.is_empty() {
                    continue;
                }
                log::debug!("Request: {}", request);
                match channel.handle_json(request) {
                    Ok(reply) => reply,
                    Err(e) => {
                        log::warn!("Malformed request: {}", e);
                        invalid_request(&e.to_string())?
                    }
                }
            }
            Err(e) => {
                log::warn!("Request is not UTF-8: {}", e);
                invalid_request(&format!("request is not valid UTF-8: {e}"))?
            }
        };

        writeln!(output, "{}", reply).context("Failed to write response")?;
        output.flush().context("Failed to flush response")?;
        served += 1;
    }

    Ok(served)
}

fn invalid_request(message: &str) -> serde_json::Result<String> {
    serde_json::to_string(&InvalidRequest {
        status: "error",
        code: INVALID_REQUEST,
        message,
    })
}
