#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use async_trait::async_trait;
use solarmax_metrics::prelude::*;

pub struct Factory;
impl Factory {
    /// Reply to `PAC,SYS`: 50 W, running, padded with a second `SYS`.
    pub fn pac_sys_reply() -> &'static str {
        "{01;FB;1E|64:PAC=64;SYS=4E21;SYS=4E21|XXXX}"
    }

    /// Reply to the default metric list as a SolarMax 3000S answers it.
    pub fn default_reply() -> &'static str {
        "{01;FB;78|64:KDY=2E;KMT=62;KYR=699;KT0=B256;TNF=1388;TKK=20;TYP=4E34;PAC=10A;PRL=2;IL1=3A;IDC=31;UL1=908;UDC=D12;SYS=4E28,0;SYS=4E28,0;SYS=4E28,0|1C86}"
    }

    pub fn transport(addr: SocketAddr, read_mode: ReadMode) -> TcpTransport {
        TcpTransport::new(
            &addr.ip().to_string(),
            addr.port(),
            Duration::from_millis(500),
            read_mode,
        )
    }
}

/// Transport answering every request with a fixed string.
pub struct CannedTransport {
    pub reply: String,
}

#[async_trait]
impl Transport for CannedTransport {
    async fn exchange(&self, _request: &str) -> String {
        self.reply.clone()
    }
}

/// A loopback stand-in for an inverter serving exactly one connection.
pub struct MockInverter {
    pub addr: SocketAddr,
    handle: JoinHandle<String>,
}

impl MockInverter {
    /// Reads one request, answers with `chunks` (flushed separately) and
    /// closes the connection.
    pub async fn start(chunks: Vec<&'static str>) -> Self {
        Self::spawn(chunks, Duration::ZERO).await
    }

    /// Reads one request and then holds the connection open without
    /// answering for `hold`.
    pub async fn silent(hold: Duration) -> Self {
        Self::spawn(Vec::new(), hold).await
    }

    async fn spawn(chunks: Vec<&'static str>, hold: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"}") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            for chunk in chunks {
                socket.write_all(chunk.as_bytes()).await.unwrap();
                socket.flush().await.unwrap();
                tokio::time::sleep(Duration::from_millis(20)).await;
            }

            tokio::time::sleep(hold).await;
            String::from_utf8(request).unwrap()
        });

        Self { addr, handle }
    }

    /// The request frame the client sent.
    pub async fn request(self) -> String {
        self.handle.await.unwrap()
    }
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
