#![allow(dead_code)]

pub use runcap_test_utils::{RecordingReporter, init_tracing, sh, sh_expecting, with_timeout};

use std::error::Error;

pub type TestResult = Result<(), Box<dyn Error>>;

/// `printf` a numbered 2000-byte chunk: a 5-digit index followed by 1995
/// spaces. Matches [`numbered_chunk`].
pub const CHUNK_PRINTF: &str = "printf '%05d%1995s' \"$i\" ''";

/// The bytes [`CHUNK_PRINTF`] writes for index `i`.
pub fn numbered_chunk(i: usize) -> Vec<u8> {
    let mut chunk = format!("{i:05}").into_bytes();
    chunk.resize(2000, b' ');
    chunk
}

/// Shell script that alternates `count` numbered chunks between stdout and
/// stderr, stdout first.
pub fn alternating_chunks_script(count: usize) -> String {
    format!(
        "i=0; while [ $i -lt {count} ]; do {CHUNK_PRINTF}; {CHUNK_PRINTF} >&2; i=$((i+1)); done"
    )
}

/// Expected contents of either stream for [`alternating_chunks_script`].
pub fn expected_chunks(count: usize) -> Vec<u8> {
    (0..count).flat_map(numbered_chunk).collect()
}
