/// Port queried when the caller does not name one.
pub const DEFAULT_PORT: u16 = 27015;

/// Width of the game port carried behind EDF bit `0x80` in an info response.
///
/// Valve's servers send a 2-byte port. Older tooling reads a single byte,
/// which is kept as the default so the decoder stays byte-compatible with it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PortWidth {
    #[default]
    Byte,
    Short,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryOptions {
    pub port_width: PortWidth,
}

impl QueryOptions {
    pub fn with_port_width(mut self, port_width: PortWidth) -> Self {
        self.port_width = port_width;
        self
    }
}
