use std::net::SocketAddr;
use std::time::Duration;

use log::{debug, trace};
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::timeout;

use crate::config::QueryConfig;
use crate::error::QueryError;

/// A UDP socket connected to one server.
///
/// Datagrams are handed back exactly as received: no retransmission,
/// no reordering.
#[derive(Debug)]
pub struct Transport {
    sock: UdpSocket,
    peer: SocketAddr,
    timeout_dur: Duration,
    buffer_size: usize,
}

impl Transport {
    /// Resolve `host`, bind an ephemeral local port and connect it to the server.
    pub async fn connect(host: &str, port: u16, config: &QueryConfig) -> Result<Self, QueryError> {
        let peer: SocketAddr = timeout(config.timeout, lookup_host((host, port)))
            .await?
            .map_err(|source| QueryError::UnresolvedHost {
                host: host.to_owned(),
                source: Some(source),
            })?
            .next()
            .ok_or_else(|| QueryError::UnresolvedHost {
                host: host.to_owned(),
                source: None,
            })?;

        // just arbitrarily bind any port of the same family
        let local: &str = if peer.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let sock: UdpSocket = UdpSocket::bind(local)
            .await
            .map_err(QueryError::FailedPortBind)?;

        sock.connect(peer)
            .await
            .map_err(QueryError::UnreachableHost)?;

        debug!("connected to {peer}");
        Ok(Transport {
            sock,
            peer,
            timeout_dur: config.timeout,
            buffer_size: config.buffer_size,
        })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub async fn send(&self, packet: &[u8]) -> Result<(), QueryError> {
        trace!("sending {} bytes to {}", packet.len(), self.peer);
        timeout(self.timeout_dur, self.sock.send(packet))
            .await?
            .map_err(QueryError::SendError)?;
        Ok(())
    }

    /// Wait for the next datagram, failing with [QueryError::Timeout]
    /// if none arrives in time.
    pub async fn receive(&self) -> Result<Vec<u8>, QueryError> {
        let mut resp_buf: Vec<u8> = vec![0u8; self.buffer_size];
        let len: usize = timeout(self.timeout_dur, self.sock.recv(&mut resp_buf))
            .await?
            .map_err(QueryError::ReceiveError)?;
        resp_buf.truncate(len);
        trace!("received {} bytes from {}", len, self.peer);
        Ok(resp_buf)
    }
}
