use log::trace;

use crate::error::ProtocolError;
use crate::parse::{parse_decimal, Reader};
use crate::stats::basic::BasicStats;

/// Value that stands in for "no value"; the field keeps what it had.
const KEEP_VALUE: &[u8] = &[0x80];

/// Record that separates the key/value section from the player names.
const PLAYER_MARKER: &[u8] = b"\x01player_";

/// Server stats as obtained by [crate::stats::StatsQuery::full_stats].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullStats {
    /// Message of the day, sent as `hostname`
    pub motd: String,
    pub map: String,
    pub num_players: u32,
    pub max_players: u32,
    pub port: u16,
    pub ip: String,
    pub version: String,
    /// Raw plugin string, e.g. `"Paper on 1.20: WorldEdit 7.2; Essentials 2.19"`
    pub plugins: String,
    pub players: Vec<String>,
}

impl Default for FullStats {
    fn default() -> Self {
        FullStats {
            motd: String::new(),
            map: String::new(),
            num_players: 0,
            max_players: 0,
            port: 25565,
            ip: String::new(),
            version: String::new(),
            plugins: String::new(),
            players: Vec::new(),
        }
    }
}

type Setter = fn(&mut FullStats, &str) -> Result<(), ProtocolError>;

/// Known keys of the key/value section; anything else is skipped.
const FIELDS: &[(&str, Setter)] = &[
    ("hostname", |s, v| {
        s.motd = v.to_string();
        Ok(())
    }),
    ("version", |s, v| {
        s.version = v.to_string();
        Ok(())
    }),
    ("plugins", |s, v| {
        s.plugins = v.to_string();
        Ok(())
    }),
    ("map", |s, v| {
        s.map = v.to_string();
        Ok(())
    }),
    ("numplayers", |s, v| {
        s.num_players = parse_decimal(v)?;
        Ok(())
    }),
    ("maxplayers", |s, v| {
        s.max_players = parse_decimal(v)?;
        Ok(())
    }),
    ("hostport", |s, v| {
        s.port = parse_decimal(v)?;
        Ok(())
    }),
    ("hostip", |s, v| {
        s.ip = v.to_string();
        Ok(())
    }),
];

fn setter(key: &str) -> Option<Setter> {
    FIELDS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, setter)| *setter)
}

impl FullStats {
    /// Parse the body of a full stat response.
    pub fn parse(data: &[u8]) -> Result<FullStats, ProtocolError> {
        let mut reader: Reader = Reader::new(data);
        let mut stats: FullStats = FullStats::default();

        loop {
            let key: String = reader.get_string()?;
            if key.is_empty() {
                break;
            }
            let value: &[u8] = reader.get_cstr()?;
            if value == KEEP_VALUE {
                continue;
            }
            let value: &str = std::str::from_utf8(value)?;
            match setter(&key) {
                Some(set) => set(&mut stats, value)?,
                None => trace!("ignoring full stat key {key:?}"),
            }
        }

        loop {
            if reader.is_empty() {
                return Err(ProtocolError::MissingPlayerSection);
            }
            if reader.get_cstr()? == PLAYER_MARKER {
                break;
            }
        }
        // the marker is followed by one empty padding entry
        reader.get_cstr()?;

        // the list ends with an empty entry
        for _ in 0..stats.num_players {
            let start: usize = reader.position();
            let name: &[u8] = reader.get_cstr()?;
            if name.is_empty() {
                return Err(ProtocolError::Truncated(start));
            }
            stats.players.push(std::str::from_utf8(name)?.to_string());
        }

        Ok(stats)
    }

    /// The `hostname` key, which carries the MOTD.
    pub fn hostname(&self) -> &str {
        &self.motd
    }
}

impl From<&FullStats> for BasicStats {
    fn from(stats: &FullStats) -> Self {
        BasicStats {
            motd: stats.motd.clone(),
            map: stats.map.clone(),
            num_players: stats.num_players,
            max_players: stats.max_players,
            port: stats.port,
            ip: stats.ip.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kv_body(pairs: &[(&[u8], &[u8])], players: &[&str]) -> Vec<u8> {
        let mut body: Vec<u8> = b"splitnum\0\x80\0".to_vec();
        for (key, value) in pairs {
            body.extend_from_slice(key);
            body.push(0);
            body.extend_from_slice(value);
            body.push(0);
        }
        body.push(0);
        body.extend_from_slice(b"\x01player_\0\0");
        for player in players {
            body.extend_from_slice(player.as_bytes());
            body.push(0);
        }
        body.push(0);
        body
    }

    #[test]
    fn parses_full_stats() {
        let body = kv_body(
            &[
                (b"hostname", b"A Minecraft Server"),
                (b"gametype", b"SMP"),
                (b"game_id", b"MINECRAFT"),
                (b"version", b"1.20.1"),
                (b"plugins", b"Paper on 1.20.1: WorldEdit 7.2.15; Essentials 2.19"),
                (b"map", b"world"),
                (b"numplayers", b"2"),
                (b"maxplayers", b"20"),
                (b"hostport", b"25566"),
                (b"hostip", b"127.0.0.1"),
            ],
            &["Alice", "Bob"],
        );

        let stats = FullStats::parse(&body).unwrap();
        assert_eq!(stats.hostname(), "A Minecraft Server");
        assert_eq!(stats.version, "1.20.1");
        assert_eq!(
            stats.plugins,
            "Paper on 1.20.1: WorldEdit 7.2.15; Essentials 2.19"
        );
        assert_eq!(stats.map, "world");
        assert_eq!(stats.num_players, 2);
        assert_eq!(stats.max_players, 20);
        assert_eq!(stats.port, 25566);
        assert_eq!(stats.ip, "127.0.0.1");
        assert_eq!(stats.players, vec!["Alice", "Bob"]);

        let basic = BasicStats::from(&stats);
        assert_eq!(basic.motd, "A Minecraft Server");
        assert_eq!(basic.port, 25566);
    }

    #[test]
    fn sentinel_keeps_previous_value() {
        let body = kv_body(
            &[
                (b"map", b"world"),
                (b"map", b"\x80"),
                (b"hostport", b"\x80"),
                (b"version", b"\x80"),
                (b"numplayers", b"0"),
            ],
            &[],
        );

        let stats = FullStats::parse(&body).unwrap();
        assert_eq!(stats.map, "world");
        assert_eq!(stats.port, 25565);
        assert_eq!(stats.version, "");
        assert!(stats.players.is_empty());
    }

    #[test]
    fn takes_only_declared_player_count() {
        let body = kv_body(&[(b"numplayers", b"1")], &["Alice", "Bob"]);
        let stats = FullStats::parse(&body).unwrap();
        assert_eq!(stats.players, vec!["Alice"]);
    }

    #[test]
    fn fewer_players_than_declared_fails() {
        let body = kv_body(&[(b"numplayers", b"2")], &["Alice"]);
        assert!(matches!(
            FullStats::parse(&body),
            Err(ProtocolError::Truncated(_))
        ));
    }

    #[test]
    fn player_list_cut_off_without_terminator_fails() {
        let mut body = kv_body(&[(b"numplayers", b"3")], &["Alice"]);
        body.pop();
        assert!(matches!(
            FullStats::parse(&body),
            Err(ProtocolError::UnterminatedString(_))
        ));
    }

    #[test]
    fn missing_player_marker_fails() {
        let body: &[u8] = b"hostname\0srv\0\0";
        assert_eq!(
            FullStats::parse(body),
            Err(ProtocolError::MissingPlayerSection)
        );
    }

    #[test]
    fn bad_number_fails() {
        let body = kv_body(&[(b"maxplayers", b"lots")], &[]);
        assert_eq!(
            FullStats::parse(&body),
            Err(ProtocolError::InvalidNumber("lots".to_string()))
        );
    }
}
