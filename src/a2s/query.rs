use std::time::Duration;

use log::{debug, warn};

use crate::a2s::info::ServerInfo;
use crate::a2s::packet::{RequestPacket, ResponsePacket, NO_CHALLENGE};
use crate::a2s::players::PlayerInfo;
use crate::config::QueryConfig;
use crate::error::{ProtocolError, QueryError};
use crate::transport::Transport;

/// An A2S query session bound to one server.
///
/// Owns the buffer used to reassemble split responses, so one session
/// serves one query at a time.
#[derive(Debug)]
pub struct Query {
    transport: Transport,
    received: Vec<u8>,
    max_challenges: usize,
}

impl Query {
    /// Connect to `host:port` with the default [QueryConfig].
    pub async fn connect(host: &str, port: u16) -> Result<Self, QueryError> {
        Self::connect_with(host, port, &QueryConfig::default()).await
    }

    pub async fn connect_with(host: &str, port: u16, config: &QueryConfig) -> Result<Self, QueryError> {
        let transport: Transport = Transport::connect(host, port, config).await?;
        Ok(Query {
            transport,
            received: Vec::new(),
            max_challenges: config.max_challenges,
        })
    }

    /// Query the server with A2S_INFO.
    pub async fn server_info(&mut self) -> Result<ServerInfo, QueryError> {
        let body: Vec<u8> = self.request(&RequestPacket::info()).await?;
        Ok(ServerInfo::parse(&body)?)
    }

    /// Query the server with A2S_PLAYER.
    pub async fn players(&mut self) -> Result<PlayerInfo, QueryError> {
        let body: Vec<u8> = self.request(&RequestPacket::players()).await?;
        Ok(PlayerInfo::parse(&body)?)
    }

    /// Send `request` and return the full response body, type tag included.
    ///
    /// Challenges are answered by resending the request with the issued
    /// value, at most `max_challenges` times. Split fragments are
    /// concatenated in arrival order until the final single datagram.
    pub async fn request(&mut self, request: &RequestPacket) -> Result<Vec<u8>, QueryError> {
        self.received.clear();
        let mut challenge: i32 = NO_CHALLENGE;
        let mut challenges: usize = 0;

        'send: loop {
            self.transport.send(&request.pack(challenge)).await?;

            loop {
                let datagram: Vec<u8> = self.transport.receive().await?;
                let continuing: bool = !self.received.is_empty();

                match ResponsePacket::unpack(&datagram, continuing)? {
                    ResponsePacket::Challenge(value) => {
                        challenges += 1;
                        if challenges > self.max_challenges {
                            warn!(
                                "{} kept issuing challenges, giving up after {}",
                                self.transport.peer(),
                                self.max_challenges
                            );
                            return Err(ProtocolError::TooManyChallenges(self.max_challenges).into());
                        }
                        debug!("challenged by {} with {value:#010x}", self.transport.peer());
                        challenge = value;
                        continue 'send;
                    }
                    ResponsePacket::Split(payload) => {
                        self.received.extend_from_slice(payload);
                    }
                    ResponsePacket::Single(payload) => {
                        let mut body: Vec<u8> = std::mem::take(&mut self.received);
                        body.extend_from_slice(payload);
                        return Ok(body);
                    }
                }
            }
        }
    }
}

/// Query `host:port` with the Source Query Protocol A2S_INFO query.
///
/// If `timeout_dur` is `Some(Duration)`, each receive will wait at most `timeout_dur`.
/// The default is 1 second if `timeout_dur` is `None`.
///
/// Example usage:
/// ```no_run
/// # async fn run() -> Result<(), gamequery::QueryError> {
/// let info = gamequery::a2s::query("nyc-1.us.uncletopia.com", 27015, None).await?;
/// println!("{} on {}", info.server_name, info.map);
/// # Ok(())
/// # }
/// ```
pub async fn query(host: &str, port: u16, timeout_dur: Option<Duration>) -> Result<ServerInfo, QueryError> {
    let mut config: QueryConfig = QueryConfig::default();
    if let Some(timeout_dur) = timeout_dur {
        config = config.with_timeout(timeout_dur);
    }
    Query::connect_with(host, port, &config).await?.server_info().await
}
