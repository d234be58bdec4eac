use thiserror::Error;

use crate::solarmax::catalog::StatusCode;

/// Reasons a reply frame could not be decoded.
///
/// Any of these aborts the query; there is no partial result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed reply header: {0}")]
    MalformedHeader(String),

    #[error("malformed reply body: {0}")]
    MalformedBody(String),

    #[error("malformed value for {key}: {value:?}")]
    MalformedValue { key: String, value: String },
}

/// A failed TCP exchange with the inverter.
///
/// Never returned to callers of `Transport::exchange`; each variant is
/// swapped for a synthetic reply carrying its own status code.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connect to {addr} failed: {reason}")]
    Connect { addr: String, reason: String },

    #[error("send failed: {0}")]
    Send(String),

    #[error("read failed: {0}")]
    Read(String),
}

impl TransportError {
    pub fn status(&self) -> StatusCode {
        match self {
            TransportError::Connect { .. } => StatusCode::NOT_REACHABLE,
            TransportError::Send(_) => StatusCode::SEND_ERROR,
            TransportError::Read(_) => StatusCode::READ_ERROR,
        }
    }

    /// The well-formed reply standing in for the missing inverter answer.
    pub fn synthetic_reply(&self) -> &'static str {
        match self {
            TransportError::Connect { .. } => "{01;FB;00|64:SYS=752F|0000}",
            TransportError::Send(_) => "{01;FB;00|64:SYS=752E|0000}",
            TransportError::Read(_) => "{01;FB;00|64:SYS=752D|0000}",
        }
    }
}
