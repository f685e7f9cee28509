//! Framing protocol for daemon input
//!
//! Each request is a 5-byte header followed by the payload:
//!
//! ```text
//! +----------------+------+-------------------+
//! | length (u32 BE)| type | payload (length)  |
//! +----------------+------+-------------------+
//! ```
//!
//! Type `0x01` means "execute". A length above [`MAX_PAYLOAD`] is rejected
//! before any payload byte is read.

use crate::config::MAX_PAYLOAD;
use std::io::{self, Read};
use thiserror::Error;
use tracing::{debug, warn};

pub const HEADER_LEN: usize = 5;

/// Frame type tag for an evaluation request
pub const TYPE_EXECUTE: u8 = 0x01;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Stream closed")]
    Closed,
    #[error("Frame length {len} exceeds maximum of {max} bytes")]
    FrameTooLarge { len: usize, max: usize },
    #[error("Stream closed mid-frame: got {got} of {expected} bytes")]
    FrameTruncated { expected: usize, got: usize },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One decoded request frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tag: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn is_execute(&self) -> bool {
        self.tag == TYPE_EXECUTE
    }
}

/// Read until `buf` is full or the stream ends; returns the byte count
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Read exactly one frame
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Frame, FrameError> {
    let mut header = [0u8; HEADER_LEN];
    let got = read_full(reader, &mut header)?;
    if got == 0 {
        return Err(FrameError::Closed);
    }
    if got < HEADER_LEN {
        return Err(FrameError::FrameTruncated {
            expected: HEADER_LEN,
            got,
        });
    }

    let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let tag = header[4];
    if len > MAX_PAYLOAD {
        warn!(header = %hex::encode(header), len, "rejecting oversized frame");
        return Err(FrameError::FrameTooLarge {
            len,
            max: MAX_PAYLOAD,
        });
    }

    let mut payload = vec![0u8; len];
    let got = read_full(reader, &mut payload)?;
    if got < len {
        return Err(FrameError::FrameTruncated { expected: len, got });
    }

    debug!(len, tag, "frame received");
    Ok(Frame { tag, payload })
}

/// Build a request frame around `payload`
pub fn encode_request(payload: &[u8], tag: u8) -> Result<Vec<u8>, FrameError> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::FrameTooLarge {
            len: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.push(tag);
    out.extend_from_slice(payload);
    Ok(out)
}
