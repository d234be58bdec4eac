use crate::prelude::*;
use crate::solarmax::reply_decoder::{ReplyDecoder, MAX_FRAME_SIZE};

use {
    async_trait::async_trait,
    bytes::BytesMut,
    std::time::Duration,
    tokio::io::{AsyncReadExt, AsyncWriteExt},
    tokio::net::TcpStream,
    tokio::time::{timeout, timeout_at, Instant},
    tokio_util::codec::Decoder,
};

/// One request/reply round trip with an inverter.
///
/// Implementations never fail: when the device cannot be reached the reply
/// is a synthetic frame whose `SYS` value names the failure.
#[async_trait]
pub trait Transport {
    async fn exchange(&self, request: &str) -> String;
}

#[derive(Clone, Debug)]
pub struct TcpTransport {
    host: String,
    port: u16,
    timeout: Duration,
    read_mode: ReadMode,
}

impl TcpTransport {
    pub fn new(host: &str, port: u16, timeout: Duration, read_mode: ReadMode) -> Self {
        Self {
            host: host.to_string(),
            port,
            timeout,
            read_mode,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.host(), config.port(), config.timeout(), config.read_mode())
    }

    pub fn addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Connect, send `request`, read the reply and close.
    ///
    /// The connect attempt gets the full timeout; write and read then share
    /// a single deadline of the same length.
    pub async fn try_exchange(&self, request: &str) -> Result<String, TransportError> {
        debug!("send: {}", request);

        let mut stream = match timeout(
            self.timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(TransportError::Connect {
                    addr: self.addr(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(TransportError::Connect {
                    addr: self.addr(),
                    reason: format!("timeout after {}s", self.timeout.as_secs_f64()),
                })
            }
        };

        if let Err(e) = stream.set_nodelay(true) {
            warn!("Failed to set TCP_NODELAY: {}", e);
        }

        let deadline = Instant::now() + self.timeout;

        match timeout_at(deadline, async {
            stream.write_all(request.as_bytes()).await?;
            stream.flush().await
        })
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(TransportError::Send(e.to_string())),
            Err(_) => return Err(TransportError::Send("write deadline exceeded".to_string())),
        }

        let reply = match self.read_mode {
            ReadMode::Single => Self::read_once(&mut stream, deadline).await?,
            ReadMode::Framed => Self::read_frame(&mut stream, deadline).await?,
        };
        debug!("recv: {}", reply);

        Ok(reply)
    }

    async fn read_once(stream: &mut TcpStream, deadline: Instant) -> Result<String, TransportError> {
        let mut buf = BytesMut::with_capacity(MAX_FRAME_SIZE);

        let len = Self::read_some(stream, &mut buf, deadline).await?;
        if len == 0 {
            return Err(TransportError::Read("connection closed before reply".to_string()));
        }

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    async fn read_frame(stream: &mut TcpStream, deadline: Instant) -> Result<String, TransportError> {
        let mut buf = BytesMut::with_capacity(MAX_FRAME_SIZE);
        let mut decoder = ReplyDecoder::new();

        loop {
            let len = Self::read_some(stream, &mut buf, deadline).await?;

            if len == 0 {
                return match decoder.decode_eof(&mut buf) {
                    Ok(Some(frame)) => Ok(frame),
                    Ok(None) => Err(TransportError::Read(
                        "connection closed before reply".to_string(),
                    )),
                    Err(e) => Err(TransportError::Read(e.to_string())),
                };
            }

            match decoder.decode(&mut buf) {
                Ok(Some(frame)) => return Ok(frame),
                Ok(None) => trace!("partial reply, {} bytes buffered", buf.len()),
                Err(e) => return Err(TransportError::Read(e.to_string())),
            }
        }
    }

    async fn read_some(
        stream: &mut TcpStream,
        buf: &mut BytesMut,
        deadline: Instant,
    ) -> Result<usize, TransportError> {
        match timeout_at(deadline, stream.read_buf(buf)).await {
            Ok(Ok(len)) => Ok(len),
            Ok(Err(e)) => Err(TransportError::Read(e.to_string())),
            Err(_) => Err(TransportError::Read("read deadline exceeded".to_string())),
        }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn exchange(&self, request: &str) -> String {
        match self.try_exchange(request).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(
                    "inverter {}: {} (reporting status {})",
                    self.addr(),
                    err,
                    err.status().0
                );
                err.synthetic_reply().to_string()
            }
        }
    }
}
