use serde::Serialize;

use super::*;

const EDF_PORT: u8 = 0x80;
const EDF_STEAM_ID: u8 = 0x10;
const EDF_SPECTATOR: u8 = 0x40;
const EDF_KEYWORDS: u8 = 0x20;
const EDF_GAME_ID: u8 = 0x01;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum ServerType {
    Dedicated,
    NonDedicated,
    SourceTv,
    Unknown(u8),
}

impl From<u8> for ServerType {
    fn from(code: u8) -> Self {
        match code {
            b'd' => ServerType::Dedicated,
            b'l' => ServerType::NonDedicated,
            b'p' => ServerType::SourceTv,
            other => ServerType::Unknown(other),
        }
    }
}

impl From<ServerType> for u8 {
    fn from(server_type: ServerType) -> Self {
        match server_type {
            ServerType::Dedicated => b'd',
            ServerType::NonDedicated => b'l',
            ServerType::SourceTv => b'p',
            ServerType::Unknown(code) => code,
        }
    }
}

// Mac servers report either `m` or `o`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Environment {
    Linux,
    Windows,
    Mac(u8),
    Unknown(u8),
}

impl From<u8> for Environment {
    fn from(code: u8) -> Self {
        match code {
            b'l' => Environment::Linux,
            b'w' => Environment::Windows,
            b'm' | b'o' => Environment::Mac(code),
            other => Environment::Unknown(other),
        }
    }
}

impl From<Environment> for u8 {
    fn from(environment: Environment) -> Self {
        match environment {
            Environment::Linux => b'l',
            Environment::Windows => b'w',
            Environment::Mac(code) | Environment::Unknown(code) => code,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Spectator {
    pub port: u16,
    pub host: String,
}

/// Decoded `A2S_INFO` response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Info {
    pub protocol: u8,
    pub name: String,
    pub map: String,
    pub folder: String,
    pub game: String,
    pub app_id: u16,
    pub players: u8,
    pub max_players: u8,
    pub bots: u8,
    pub server_type: ServerType,
    pub environment: Environment,
    pub visibility: u8,
    pub vac: u8,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steam_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectator: Option<Spectator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<u64>,
}

impl Info {
    pub fn is_private(&self) -> bool {
        self.visibility != 0
    }

    pub fn is_vac_secured(&self) -> bool {
        self.vac != 0
    }

    pub fn edf(&self) -> u8 {
        let mut edf = 0;
        if self.port.is_some() {
            edf |= EDF_PORT;
        }
        if self.steam_id.is_some() {
            edf |= EDF_STEAM_ID;
        }
        if self.spectator.is_some() {
            edf |= EDF_SPECTATOR;
        }
        if self.keywords.is_some() {
            edf |= EDF_KEYWORDS;
        }
        if self.game_id.is_some() {
            edf |= EDF_GAME_ID;
        }
        edf
    }

    /// Optional fields are read in transmission order, not EDF bit order.
    pub fn decode(body: &[u8], port_width: PortWidth) -> Result<Self> {
        let mut reader = Cursor::new(body);

        let _header = reader.read_byte()?;
        let protocol = reader.read_byte()?;
        let name = reader.read_string()?;
        let map = reader.read_string()?;
        let folder = reader.read_string()?;
        let game = reader.read_string()?;
        let app_id = reader.read_short()? as u16;
        let players = reader.read_byte()?;
        let max_players = reader.read_byte()?;
        let bots = reader.read_byte()?;
        let server_type = ServerType::from(reader.read_byte()?);
        let environment = Environment::from(reader.read_byte()?);
        let visibility = reader.read_byte()?;
        let vac = reader.read_byte()?;
        let version = reader.read_string()?;
        let edf = reader.read_byte()?;

        let port = if edf & EDF_PORT != 0 {
            Some(match port_width {
                PortWidth::Byte => reader.read_byte()? as u16,
                PortWidth::Short => reader.read_short()? as u16,
            })
        } else {
            None
        };

        let steam_id = if edf & EDF_STEAM_ID != 0 {
            Some(reader.read_long_long()?)
        } else {
            None
        };

        let spectator = if edf & EDF_SPECTATOR != 0 {
            let port = reader.read_short()? as u16;
            let host = reader.read_string()?;
            Some(Spectator { port, host })
        } else {
            None
        };

        let keywords = if edf & EDF_KEYWORDS != 0 {
            Some(reader.read_string()?)
        } else {
            None
        };

        let game_id = if edf & EDF_GAME_ID != 0 {
            Some(reader.read_long_long()?)
        } else {
            None
        };

        reader.finish()?;

        Ok(Self {
            protocol,
            name,
            map,
            folder,
            game,
            app_id,
            players,
            max_players,
            bots,
            server_type,
            environment,
            visibility,
            vac,
            version,
            port,
            steam_id,
            spectator,
            keywords,
            game_id,
        })
    }

    /// With [`PortWidth::Byte`] only the low byte of `port` is written.
    pub fn encode(&self, port_width: PortWidth) -> Vec<u8> {
        let mut buf = Vec::new();

        buf.put_byte(HEADER_INFO);
        buf.put_byte(self.protocol);
        buf.put_string(&self.name);
        buf.put_string(&self.map);
        buf.put_string(&self.folder);
        buf.put_string(&self.game);
        buf.put_short(self.app_id as i16);
        buf.put_byte(self.players);
        buf.put_byte(self.max_players);
        buf.put_byte(self.bots);
        buf.put_byte(self.server_type.into());
        buf.put_byte(self.environment.into());
        buf.put_byte(self.visibility);
        buf.put_byte(self.vac);
        buf.put_string(&self.version);
        buf.put_byte(self.edf());

        if let Some(port) = self.port {
            match port_width {
                PortWidth::Byte => buf.put_byte(port as u8),
                PortWidth::Short => buf.put_short(port as i16),
            }
        }
        if let Some(steam_id) = self.steam_id {
            buf.put_long_long(steam_id);
        }
        if let Some(spectator) = &self.spectator {
            buf.put_short(spectator.port as i16);
            buf.put_string(&spectator.host);
        }
        if let Some(keywords) = &self.keywords {
            buf.put_string(keywords);
        }
        if let Some(game_id) = self.game_id {
            buf.put_long_long(game_id);
        }

        buf
    }
}
