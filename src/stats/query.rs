use log::debug;

use crate::config::QueryConfig;
use crate::error::QueryError;
use crate::stats::basic::BasicStats;
use crate::stats::full::FullStats;
use crate::stats::packet::{parse_challenge_token, StatsRequest};
use crate::transport::Transport;

/// A query-protocol session bound to one server.
///
/// Every stats request runs a fresh handshake under a new session id.
#[derive(Debug)]
pub struct StatsQuery {
    transport: Transport,
    session_id: u16,
    challenge_token: i32,
}

impl StatsQuery {
    /// Connect to `host:port` with the default [QueryConfig].
    pub async fn connect(host: &str, port: u16) -> Result<Self, QueryError> {
        Self::connect_with(host, port, &QueryConfig::default()).await
    }

    pub async fn connect_with(host: &str, port: u16, config: &QueryConfig) -> Result<Self, QueryError> {
        let transport: Transport = Transport::connect(host, port, config).await?;
        Ok(StatsQuery {
            transport,
            session_id: 0,
            challenge_token: 0,
        })
    }

    /// Id of the most recent handshake, 0 before the first one.
    pub fn session_id(&self) -> u16 {
        self.session_id
    }

    /// Token issued by the most recent handshake.
    pub fn challenge_token(&self) -> i32 {
        self.challenge_token
    }

    async fn send_recv(&mut self, request: &StatsRequest) -> Result<Vec<u8>, QueryError> {
        self.transport.send(&request.pack()).await?;
        let response: Vec<u8> = self.transport.receive().await?;
        Ok(request.check_response(&response)?.to_vec())
    }

    /// Request a new challenge token under the next session id.
    pub async fn handshake(&mut self) -> Result<i32, QueryError> {
        self.session_id = self.session_id.wrapping_add(1);
        let request: StatsRequest = StatsRequest::Handshake {
            session_id: self.session_id,
        };
        let body: Vec<u8> = self.send_recv(&request).await?;
        self.challenge_token = parse_challenge_token(&body)?;
        debug!(
            "handshake with {} as session {}: token {}",
            self.transport.peer(),
            self.session_id,
            self.challenge_token
        );
        Ok(self.challenge_token)
    }

    pub async fn basic_stats(&mut self) -> Result<BasicStats, QueryError> {
        let challenge_token: i32 = self.handshake().await?;
        let request: StatsRequest = StatsRequest::Basic {
            session_id: self.session_id,
            challenge_token,
        };
        let body: Vec<u8> = self.send_recv(&request).await?;
        Ok(BasicStats::parse(&body)?)
    }

    pub async fn full_stats(&mut self) -> Result<FullStats, QueryError> {
        let challenge_token: i32 = self.handshake().await?;
        let request: StatsRequest = StatsRequest::Full {
            session_id: self.session_id,
            challenge_token,
        };
        let body: Vec<u8> = self.send_recv(&request).await?;
        Ok(FullStats::parse(&body)?)
    }
}
