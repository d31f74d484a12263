use std::time::Duration;

/// Settings shared by every query session.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// How long a single receive may wait for a datagram
    pub timeout: Duration,
    /// How many A2S challenge redirections are followed before giving up
    pub max_challenges: usize,
    /// Size of the receive buffer, i.e. the largest datagram accepted
    pub buffer_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            max_challenges: 4,
            buffer_size: 1500,
        }
    }
}

impl QueryConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_challenges(mut self, max_challenges: usize) -> Self {
        self.max_challenges = max_challenges;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_protocol_expectations() {
        let config = QueryConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(config.max_challenges, 4);
        assert_eq!(config.buffer_size, 1500);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = QueryConfig::default()
            .with_timeout(Duration::from_millis(250))
            .with_max_challenges(1)
            .with_buffer_size(4096);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.max_challenges, 1);
        assert_eq!(config.buffer_size, 4096);
    }
}
