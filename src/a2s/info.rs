use crate::a2s::packet::PacketType;
use crate::error::ProtocolError;
use crate::parse::Reader;

/// The Extra Data Flag byte of an A2S_INFO response.
///
/// Each bit announces one optional trailing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtraDataFlags(pub u8);

impl ExtraDataFlags {
    pub const PORT: u8 = 0x80;
    pub const STEAM_ID: u8 = 0x10;
    pub const SOURCE_TV: u8 = 0x40;
    pub const KEYWORDS: u8 = 0x20;
    pub const GAME_ID: u8 = 0x01;

    pub fn contains(&self, flag: u8) -> bool {
        self.0 & flag != 0
    }
}

/// Server information as obtained by [crate::a2s::Query::server_info].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerInfo {
    /// A2S_INFO protocol version
    pub protocol_version: u8,
    /// Server hostname
    pub server_name: String,
    /// Current map
    pub map: String,
    /// Location of server files
    pub folder: String,
    /// Name of game
    pub game: String,
    /// Steam application ID of game
    pub app_id: u16,
    /// Current players
    pub num_players: u8,
    /// Max players
    pub max_players: u8,
    /// Current bots
    pub bot_count: u8,
    /// Server type:
    /// - `d`: Dedicated
    /// - `l`: Listen (non-dedicated)
    /// - `p`: SourceTV relay (proxy)
    pub server_type: u8,
    /// Server environment:
    /// - `l`: Linux
    /// - `w`: Windows
    /// - `m` or `o`: Mac
    pub platform: u8,
    /// 1 if the server is password protected
    pub private: u8,
    /// 1 if the server is VAC enabled
    pub vac: u8,
    /// Game version
    pub version: String,
    /// Game port
    pub port: Option<u16>,
    /// SteamID of the server
    pub steam_id: Option<u64>,
    /// SourceTV spectator port
    pub sourcetv_port: Option<u16>,
    /// SourceTV spectator server name
    pub sourcetv_name: Option<String>,
    /// Tags describing the game
    pub keywords: Option<String>,
    /// Full 64-bit game ID
    pub game_id: Option<u64>,
}

impl ServerInfo {
    /// Parse a reassembled A2S_INFO response body into its corresponding [ServerInfo].
    pub fn parse(data: &[u8]) -> Result<ServerInfo, ProtocolError> {
        let mut reader: Reader = Reader::new(data);

        let header: u8 = reader.get_u8()?;
        if header != PacketType::Info.to_byte() {
            return Err(ProtocolError::UnexpectedPacketType {
                expected: PacketType::Info.to_byte(),
                found: header,
            });
        }

        let mut info: ServerInfo = ServerInfo {
            protocol_version: reader.get_u8()?,
            server_name: reader.get_string()?,
            map: reader.get_string()?,
            folder: reader.get_string()?,
            game: reader.get_string()?,
            app_id: reader.get_u16()?,
            num_players: reader.get_u8()?,
            max_players: reader.get_u8()?,
            bot_count: reader.get_u8()?,
            server_type: reader.get_u8()?,
            platform: reader.get_u8()?,
            private: reader.get_u8()?,
            vac: reader.get_u8()?,
            version: reader.get_string()?,
            ..Default::default()
        };

        // older servers stop right after the version string
        if reader.is_empty() {
            return Ok(info);
        }

        let edf: ExtraDataFlags = ExtraDataFlags(reader.get_u8()?);
        if edf.contains(ExtraDataFlags::PORT) {
            info.port = Some(reader.get_u16()?);
        }
        if edf.contains(ExtraDataFlags::STEAM_ID) {
            info.steam_id = Some(reader.get_u64()?);
        }
        if edf.contains(ExtraDataFlags::SOURCE_TV) {
            info.sourcetv_port = Some(reader.get_u16()?);
            info.sourcetv_name = Some(reader.get_string()?);
        }
        if edf.contains(ExtraDataFlags::KEYWORDS) {
            info.keywords = Some(reader.get_string()?);
        }
        if edf.contains(ExtraDataFlags::GAME_ID) {
            info.game_id = Some(reader.get_u64()?);
        }

        Ok(info)
    }

    /// Is the server password protected?
    pub fn password_protected(&self) -> bool {
        self.private == 1
    }

    /// Is the server VAC enabled?
    pub fn vac_enabled(&self) -> bool {
        self.vac == 1
    }

    pub fn server_type_char(&self) -> char {
        char::from(self.server_type)
    }

    pub fn platform_char(&self) -> char {
        char::from(self.platform)
    }
}
