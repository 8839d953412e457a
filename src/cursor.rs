use crate::error::{QueryError, Result};

/// Forward-only little-endian reader. Decoders end with [`Cursor::finish`],
/// which rejects any bytes left unread.
#[derive(Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.buf.len() - self.pos;
        if available < len {
            return Err(QueryError::TruncatedBuffer {
                offset: self.pos,
                needed: len,
                available,
            });
        }

        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.read_bytes(N)?);
        Ok(arr)
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_short(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_long(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_float(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read_long_long(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_string(&mut self) -> Result<String> {
        let start = self.pos;
        let rest = self.remaining();

        let Some(len) = rest.iter().position(|&b| b == 0) else {
            return Err(QueryError::TruncatedBuffer {
                offset: start,
                needed: rest.len() + 1,
                available: rest.len(),
            });
        };

        let text = std::str::from_utf8(&rest[..len])
            .map_err(|source| QueryError::InvalidEncoding { offset: start, source })?
            .to_owned();

        self.pos += len + 1;
        Ok(text)
    }

    /// Ends decoding, failing if anything is left unread.
    pub fn finish(self) -> Result<()> {
        match self.remaining().len() {
            0 => Ok(()),
            left => Err(QueryError::ResidualData(left)),
        }
    }
}

pub(crate) trait PutExt {
    fn put_byte(&mut self, v: u8);
    fn put_short(&mut self, v: i16);
    fn put_long(&mut self, v: i32);
    fn put_float(&mut self, v: f32);
    fn put_long_long(&mut self, v: u64);
    fn put_string(&mut self, v: &str);
}

impl PutExt for Vec<u8> {
    fn put_byte(&mut self, v: u8) {
        self.push(v);
    }

    fn put_short(&mut self, v: i16) {
        self.extend(v.to_le_bytes());
    }

    fn put_long(&mut self, v: i32) {
        self.extend(v.to_le_bytes());
    }

    fn put_float(&mut self, v: f32) {
        self.extend(v.to_le_bytes());
    }

    fn put_long_long(&mut self, v: u64) {
        self.extend(v.to_le_bytes());
    }

    fn put_string(&mut self, v: &str) {
        self.extend(v.as_bytes());
        self.push(0x00);
    }
}
