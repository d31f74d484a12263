//! Shared helpers for talking to an in-process fake game server.
#![allow(dead_code)]

use std::time::Duration;

use gamequery::QueryConfig;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

pub struct FakeServer {
    pub port: u16,
    /// Resolves to every request the server received, in order.
    pub requests: JoinHandle<Vec<Vec<u8>>>,
}

/// Spawn a server that answers the n-th request with the n-th list of
/// datagrams, then stops.
pub async fn spawn(script: Vec<Vec<Vec<u8>>>) -> FakeServer {
    let sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = sock.local_addr().unwrap().port();

    let requests = tokio::spawn(async move {
        let mut received = Vec::new();
        let mut buf = [0u8; 2048];
        for replies in script {
            let (len, peer) = sock.recv_from(&mut buf).await.unwrap();
            received.push(buf[..len].to_vec());
            for reply in replies {
                sock.send_to(&reply, peer).await.unwrap();
            }
        }
        received
    });

    FakeServer { port, requests }
}

pub fn config() -> QueryConfig {
    QueryConfig::default().with_timeout(Duration::from_millis(500))
}

/// Prefix `payload` with an A2S split header.
pub fn a2s_datagram(split: i32, payload: &[u8]) -> Vec<u8> {
    let mut datagram = split.to_le_bytes().to_vec();
    datagram.extend_from_slice(payload);
    datagram
}

pub fn challenge(value: i32) -> Vec<u8> {
    let mut payload = vec![b'A'];
    payload.extend_from_slice(&value.to_le_bytes());
    a2s_datagram(-1, &payload)
}

/// Prefix `body` with a query-protocol response header.
pub fn stats_datagram(packet_type: u8, spread_session_id: u32, body: &[u8]) -> Vec<u8> {
    let mut datagram = vec![packet_type];
    datagram.extend_from_slice(&spread_session_id.to_be_bytes());
    datagram.extend_from_slice(body);
    datagram
}
