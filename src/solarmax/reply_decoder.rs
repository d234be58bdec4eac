use crate::prelude::*;

use bytes::BytesMut;
use tokio_util::codec::Decoder;

pub const FRAME_START: u8 = b'{';
pub const FRAME_END: u8 = b'}';

/// Largest reply accepted before the exchange is abandoned.
pub const MAX_FRAME_SIZE: usize = 8192;

/// Splits a byte stream into brace delimited SolarMax frames.
///
/// Bytes ahead of the opening brace are discarded.
#[derive(Debug, Default)]
pub struct ReplyDecoder;

impl ReplyDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for ReplyDecoder {
    type Item = String;
    type Error = anyhow::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        let Some(start) = src.iter().position(|b| *b == FRAME_START) else {
            if !src.is_empty() {
                trace!("discarding {} bytes of noise", src.len());
                src.clear();
            }
            return Ok(None);
        };

        if start > 0 {
            trace!("discarding {} bytes ahead of frame start", start);
            let _ = src.split_to(start);
        }

        match src.iter().position(|b| *b == FRAME_END) {
            Some(end) => {
                let frame = src.split_to(end + 1);
                Ok(Some(String::from_utf8_lossy(&frame).into_owned()))
            }
            None => {
                if src.len() > MAX_FRAME_SIZE {
                    bail!("reply exceeds {} bytes without a closing brace", MAX_FRAME_SIZE);
                }
                Ok(None)
            }
        }
    }

    // a truncated frame is still handed on, the reply parser decides
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }

        if src.is_empty() {
            return Ok(None);
        }

        let rest = src.split();
        warn!("connection closed inside a frame, {} bytes received", rest.len());
        Ok(Some(String::from_utf8_lossy(&rest).into_owned()))
    }
}
