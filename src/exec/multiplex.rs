// src/exec/multiplex.rs

//! Concurrent drain of a child's stdout and stderr.
//!
//! Reading one pipe to EOF and then the other deadlocks as soon as the child
//! fills the pipe we are *not* reading: it blocks on write, and we block on a
//! read that will never complete. Instead both endpoints stay in a wait set
//! and whichever becomes readable first is serviced, one bounded chunk at a
//! time, until both report EOF.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::errors::{Result, RuncapError};
use crate::types::StreamTag;

/// Upper bound on a single read from either pipe.
pub const CHUNK_SIZE: usize = 1024;

/// Everything the child wrote, split by stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Captured {
    fn buffer_mut(&mut self, tag: StreamTag) -> &mut Vec<u8> {
        match tag {
            StreamTag::Stdout => &mut self.stdout,
            StreamTag::Stderr => &mut self.stderr,
        }
    }
}

/// Drain both readers until each has reported end-of-stream.
///
/// Bytes are appended verbatim to the matching buffer in the order they were
/// read. A reader is dropped (closing the underlying handle) as soon as it
/// returns EOF. There is no timeout: a child that keeps a pipe open forever
/// keeps this future pending forever.
///
/// Interrupted reads are retried. Any other read error aborts the drain and
/// is returned as [`RuncapError::StreamRead`]; both readers are dropped on the
/// way out.
pub async fn drain<O, E>(stdout: O, stderr: E) -> Result<Captured>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut out = Some(stdout);
    let mut err = Some(stderr);
    let mut out_chunk = [0u8; CHUNK_SIZE];
    let mut err_chunk = [0u8; CHUNK_SIZE];
    let mut captured = Captured::default();

    while out.is_some() || err.is_some() {
        // `read` is cancel safe: when one branch wins, the other read is
        // dropped without having consumed any bytes.
        let (tag, res) = tokio::select! {
            res = read_chunk(out.as_mut(), &mut out_chunk), if out.is_some() => (StreamTag::Stdout, res),
            res = read_chunk(err.as_mut(), &mut err_chunk), if err.is_some() => (StreamTag::Stderr, res),
        };

        match res {
            Ok(0) => {
                debug!(
                    stream = %tag,
                    bytes = captured.buffer_mut(tag).len(),
                    "stream reached end-of-stream"
                );
                match tag {
                    StreamTag::Stdout => out = None,
                    StreamTag::Stderr => err = None,
                }
            }
            Ok(n) => {
                trace!(stream = %tag, bytes = n, "read chunk");
                let chunk = match tag {
                    StreamTag::Stdout => &out_chunk[..n],
                    StreamTag::Stderr => &err_chunk[..n],
                };
                captured.buffer_mut(tag).extend_from_slice(chunk);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(RuncapError::StreamRead {
                    stream: tag,
                    source,
                });
            }
        }
    }

    Ok(captured)
}

async fn read_chunk<R>(reader: Option<&mut R>, chunk: &mut [u8]) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    match reader {
        Some(reader) => reader.read(chunk).await,
        // Disabled branch: `select!` still evaluates the expression but never
        // polls the future.
        None => std::future::pending().await,
    }
}
