// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-oriented request loop shared by the stdio servers.
//!
//! ```text
//! greeting? --> writer
//! loop {
//!   select! { read_until('\n'), shutdown }
//!   not UTF-8 --> malformed() --> writer
//!   blank --> skip
//!   respond(line) --> writer + '\n' + flush
//! }
//! EOF / shutdown --> Ok(())
//! ```
//!
//! Requests are handled one at a time; the next line is not read until the
//! previous response has been written.

use anyhow::Context;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::error::Result;

/// A request/response protocol spoken one line at a time.
pub(crate) trait LineService {
    /// Line written before the first request, if any.
    fn greeting(&self) -> Option<String> {
        None
    }

    /// Answer one non-blank request line.
    async fn respond(&self, line: &str) -> String;

    /// Reply to a line that is not valid UTF-8.
    fn malformed(&self) -> String;
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub(crate) async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        debug!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<()> {
    writer
        .write_all(line.as_bytes())
        .await
        .context("failed to write response")?;
    writer.write_all(b"\n").await.context("failed to write response")?;
    writer.flush().await.context("failed to flush response")?;
    Ok(())
}

/// Serve `service` until EOF on `reader` or until `shutdown` resolves.
///
/// A line that is not valid UTF-8 gets the service's `malformed` reply and
/// the loop continues.
///
/// # Errors
///
/// Returns an error if reading a request or writing a response fails.
pub(crate) async fn serve_lines<S, R, W, F>(
    service: &S,
    mut reader: R,
    mut writer: W,
    shutdown: F,
) -> Result<()>
where
    S: LineService,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    F: Future<Output = ()>,
{
    if let Some(greeting) = service.greeting() {
        write_line(&mut writer, &greeting).await?;
    }

    tokio::pin!(shutdown);
    let mut buf = Vec::new();
    let mut handled = 0_usize;

    loop {
        buf.clear();
        let read = tokio::select! {
            read = reader.read_until(b'\n', &mut buf) => read.context("failed to read request")?,
            () = &mut shutdown => {
                info!("interrupted, shutting down");
                break;
            }
        };
        if read == 0 {
            debug!(handled, "end of input");
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                service.respond(line).await
            }
            Err(e) => {
                debug!(error = %e, "request is not valid UTF-8");
                service.malformed()
            }
        };
        write_line(&mut writer, &response).await?;
        handled += 1;
    }

    Ok(())
}
