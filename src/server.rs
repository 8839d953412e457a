use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;

use crate::config::{PortWidth, QueryOptions};
use crate::cursor::{Cursor, PutExt};
use crate::error::{QueryError, Result};

const CHALLENGE_SIZE: usize = 4;

/// Header byte of an `A2S_INFO` response.
pub const HEADER_INFO: u8 = 0x49;
/// Header byte of an `A2S_PLAYER` response.
pub const HEADER_PLAYERS: u8 = 0x44;
/// Header byte of an `A2S_RULES` response.
pub const HEADER_RULES: u8 = 0x45;

mod info;
mod players;
mod req_packet;
mod res_packet;
mod rules;

pub use info::*;
pub use players::*;
pub use res_packet::ResPacket;
pub use rules::*;

use req_packet::*;

/// Opaque token a server hands out before disclosing players or rules.
///
/// It is returned by the first phase of a query and passed by value into the
/// second; it is never kept on the [`ServerQuery`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Challenge(pub [u8; CHALLENGE_SIZE]);

/// A single query against one server.
///
/// Each `ServerQuery` owns its own socket and is consumed by the query it
/// runs, so the socket is closed on every return path.
pub struct ServerQuery {
    sock: UdpSocket,
    addr: SocketAddr,
    options: QueryOptions,
}

impl ServerQuery {
    pub async fn new(addr: SocketAddr, options: QueryOptions) -> Result<Self> {
        let sock = match addr {
            SocketAddr::V4(_) => UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?,
            SocketAddr::V6(_) => UdpSocket::bind((Ipv6Addr::UNSPECIFIED, 0)).await?,
        };

        Ok(Self {
            sock,
            addr,
            options,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    async fn send(&self, packet: &ReqPacket) -> Result<()> {
        let raw = packet.to_raw()?;
        self.sock.send_to(&raw, self.addr).await?;

        debug!("[{}] Sent packet [0x{:X}] ({} bytes)", self.addr, packet.header, raw.len());
        Ok(())
    }

    async fn receive(&self) -> Result<ResPacket> {
        let res = ResPacket::rcv(&self.sock).await?;

        debug!("[{}] Received packet [0x{:X}]", self.addr, res.header().unwrap_or_default());
        Ok(res)
    }

    /// Requests a challenge token for `packet_type`.
    async fn challenge(&self, packet_type: PacketType) -> Result<Challenge> {
        self.send(&ReqPacket::challenge_request(packet_type)).await?;
        let res = self.receive().await?;

        let mut reader = res.cursor();
        let header = reader.read_byte()?;
        if header != ResPacket::HEADER_CHALLENGE {
            error!(
                "[{}] Expected challenge packet, received header [0x{:X}]!",
                self.addr, header
            );
            return Err(QueryError::UnexpectedHeader {
                expected: ResPacket::HEADER_CHALLENGE,
                found: header,
            });
        }

        let mut token = [0u8; CHALLENGE_SIZE];
        token.copy_from_slice(reader.read_bytes(CHALLENGE_SIZE)?);
        reader.finish()?;

        let challenge = Challenge(token);
        debug!("[{}] Received challenge {:02X?}", self.addr, challenge.0);

        Ok(challenge)
    }

    /// Runs the two-phase handshake and returns the data response.
    async fn send_with_challenge(&self, packet_type: PacketType) -> Result<ResPacket> {
        let challenge = self.challenge(packet_type).await?;

        self.send(&ReqPacket::with_challenge(packet_type, challenge)).await?;
        self.receive().await
    }

    pub async fn a2s_info(self) -> Result<Info> {
        self.send(&ReqPacket::info()).await?;
        let res = self.receive().await?;

        Info::decode(res.body(), self.options.port_width)
            .inspect_err(|err| error!("[{}] Malformed info response: {}", self.addr, err))
    }

    pub async fn a2s_players(self) -> Result<Vec<Player>> {
        let res = self.send_with_challenge(PacketType::Players).await?;

        decode_players(res.body())
            .inspect_err(|err| error!("[{}] Malformed player response: {}", self.addr, err))
    }

    pub async fn a2s_rules(self) -> Result<Vec<Rule>> {
        let res = self.send_with_challenge(PacketType::Rules).await?;

        decode_rules(res.body())
            .inspect_err(|err| error!("[{}] Malformed rules response: {}", self.addr, err))
    }
}
