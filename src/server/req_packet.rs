use super::*;

/// Packet prefix of a response that fits in one datagram (-1).
pub(super) const PACKET_SINGLE: i32 = -1;
/// Packet prefix of one fragment of a split response (-2).
pub(super) const PACKET_SPLIT: i32 = -2;
/// Split prefix sent as the raw bytes `FF FF FF FE`.
pub(super) const PACKET_SPLIT_RAW: i32 = i32::from_le_bytes([0xFF, 0xFF, 0xFF, 0xFE]);
/// Largest datagram exchanged with a server.
pub(super) const PACKET_SIZE: usize = 1400;

const INFO_PAYLOAD: &[u8] = b"Source Engine Query\0";
const CHALLENGE_REQUEST: Challenge = Challenge([0xFF, 0xFF, 0xFF, 0xFF]);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) enum PacketType {
    Info,
    Players,
    Rules,
}

impl PacketType {
    pub fn header(self) -> u8 {
        match self {
            PacketType::Info => 0x54,
            PacketType::Players => 0x55,
            PacketType::Rules => 0x56,
        }
    }
}

pub(super) struct ReqPacket {
    pub header: u8,
    pub payload: Option<&'static [u8]>,
    pub challenge: Option<Challenge>,
}

impl ReqPacket {
    pub fn new(header: u8, payload: Option<&'static [u8]>, challenge: Option<Challenge>) -> Self {
        Self {
            header,
            payload,
            challenge,
        }
    }

    pub fn info() -> Self {
        Self::new(PacketType::Info.header(), Some(INFO_PAYLOAD), None)
    }

    /// First phase of the player and rules handshake.
    pub fn challenge_request(packet_type: PacketType) -> Self {
        Self::new(packet_type.header(), None, Some(CHALLENGE_REQUEST))
    }

    /// Second phase, echoing the token handed out by the server.
    pub fn with_challenge(packet_type: PacketType, challenge: Challenge) -> Self {
        Self::new(packet_type.header(), None, Some(challenge))
    }

    /// Frames the request as a single packet.
    pub fn to_raw(&self) -> Result<Vec<u8>> {
        let mut body = vec![self.header];

        if let Some(payload) = self.payload {
            body.extend(payload);
        }

        if let Some(challenge) = self.challenge {
            body.extend(challenge.0);
        }

        if body.len() >= PACKET_SIZE {
            error!("Request of {} bytes does not fit in a single packet!", body.len());
            return Err(QueryError::UnsupportedSize(body.len()));
        }

        let mut buffer = Vec::with_capacity(body.len() + 4);
        buffer.extend(PACKET_SINGLE.to_le_bytes());
        buffer.extend(body);

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_request_is_framed_single() {
        let raw = ReqPacket::info().to_raw().unwrap();
        assert_eq!(&raw[..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(raw[4], 0x54);
        assert_eq!(&raw[5..], b"Source Engine Query\0");
    }

    #[test]
    fn challenge_request_carries_all_ones() {
        let raw = ReqPacket::challenge_request(PacketType::Players).to_raw().unwrap();
        assert_eq!(raw, [0xFF, 0xFF, 0xFF, 0xFF, 0x55, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn challenge_is_echoed_verbatim() {
        let challenge = Challenge([0x12, 0x34, 0x56, 0x78]);
        let raw = ReqPacket::with_challenge(PacketType::Rules, challenge).to_raw().unwrap();
        assert_eq!(&raw[4..], &[0x56, 0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn oversized_request_is_rejected() {
        static BIG: [u8; PACKET_SIZE] = [0x61; PACKET_SIZE];
        let packet = ReqPacket::new(0x54, Some(&BIG), None);
        assert!(matches!(packet.to_raw(), Err(QueryError::UnsupportedSize(1401))));
    }
}
