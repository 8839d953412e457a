use super::*;

/// Unframed body of a single-packet response, starting at its header byte.
#[derive(Debug)]
pub struct ResPacket {
    payload: Vec<u8>,
}

impl ResPacket {
    pub const HEADER_CHALLENGE: u8 = 0x41;

    pub async fn rcv(sock: &UdpSocket) -> Result<Self> {
        let mut buf = vec![0u8; PACKET_SIZE];
        let (len, _) = sock.recv_from(&mut buf).await?;
        buf.truncate(len);

        trace!("Received datagram of {} bytes", len);

        Self::from_datagram(buf)
    }

    /// Strips the packet prefix from a raw datagram.
    pub fn from_datagram(mut datagram: Vec<u8>) -> Result<Self> {
        let prefix = Cursor::new(&datagram).read_long()?;

        match prefix {
            PACKET_SINGLE => {
                datagram.drain(..4);
                Ok(Self { payload: datagram })
            }
            PACKET_SPLIT | PACKET_SPLIT_RAW => {
                error!("Received a split packet response, which is not supported!");
                Err(QueryError::UnsupportedFraming)
            }
            other => {
                error!("Received packet with unknown frame type [0x{:08X}]!", other as u32);
                Err(QueryError::UnknownFrameType(other as u32))
            }
        }
    }

    pub fn header(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    pub fn body(&self) -> &[u8] {
        &self.payload
    }

    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_prefix_is_stripped() {
        let packet = ResPacket::from_datagram(vec![0xFF, 0xFF, 0xFF, 0xFF, 0x49, 0x11]).unwrap();
        assert_eq!(packet.header(), Some(0x49));
        assert_eq!(packet.body(), &[0x49, 0x11]);
    }

    #[test]
    fn split_prefix_is_unsupported() {
        let result = ResPacket::from_datagram(vec![0xFE, 0xFF, 0xFF, 0xFF, 0x01, 0x00]);
        assert!(matches!(result, Err(QueryError::UnsupportedFraming)));
    }

    #[test]
    fn raw_byte_split_prefix_is_unsupported() {
        let result = ResPacket::from_datagram(vec![0xFF, 0xFF, 0xFF, 0xFE, 0x01]);
        assert!(matches!(result, Err(QueryError::UnsupportedFraming)));
    }

    #[test]
    fn unknown_prefix_is_reported() {
        let result = ResPacket::from_datagram(vec![0x00, 0x00, 0x00, 0x00, 0x49]);
        assert!(matches!(result, Err(QueryError::UnknownFrameType(0))));
    }

    #[test]
    fn short_datagram_is_truncated() {
        let result = ResPacket::from_datagram(vec![0xFF, 0xFF]);
        assert!(matches!(
            result,
            Err(QueryError::TruncatedBuffer { offset: 0, needed: 4, available: 2 })
        ));
    }

    #[test]
    fn empty_body_has_no_header() {
        let packet = ResPacket::from_datagram(vec![0xFF; 4]).unwrap();
        assert_eq!(packet.header(), None);
    }
}
