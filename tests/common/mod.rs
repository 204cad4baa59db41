//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock backend that returns a fixed 200 response.
///
/// Binds an ephemeral port and returns the address.
pub async fn start_mock_backend(response: &'static str) -> SocketAddr {
    let (addr, _) = start_recording_backend(response).await;
    addr
}

/// Start a mock backend that records the head of every request it receives
/// (request line plus headers, up to the blank line) before responding.
pub async fn start_recording_backend(
    response: &'static str,
) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = recorded.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let sink = sink.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }
                        let head = String::from_utf8_lossy(&buf);
                        let head = head.split("\r\n\r\n").next().unwrap_or_default();
                        sink.lock().unwrap().push(head.to_string());

                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.len(),
                            response
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

/// True when any recorded request head contains `needle` on its own line
/// (case-insensitive, for header lines).
pub fn recorded_contains(recorded: &Arc<Mutex<Vec<String>>>, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    recorded
        .lock()
        .unwrap()
        .iter()
        .any(|head| head.lines().any(|line| line.to_lowercase() == needle))
}
