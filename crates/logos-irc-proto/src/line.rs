//! Line-based codec for tokio.
//!
//! Decodes an append-only byte stream into complete command lines and
//! encodes outbound lines with the `\r\n` terminator.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error;

/// Line-based codec that handles `\r\n` or bare `\n` terminated messages.
///
/// Whichever terminator appears first ends the current line. Trailing
/// whitespace (including the `\r`) is trimmed, and lines that are empty
/// after trimming are skipped without being yielded. Invalid UTF-8 is
/// replaced rather than rejected. No line-length cap is applied.
#[derive(Debug, Default)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
}

impl LineCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                // No complete line yet - remember where we stopped
                self.next_index = src.len();
                return Ok(None);
            };

            let raw = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end();
            if !line.is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None => {
                // An unterminated tail at disconnect is never dispatched.
                src.clear();
                self.next_index = 0;
                Ok(None)
            }
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        dst.reserve(msg.len() + 2);
        dst.put_slice(msg.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
