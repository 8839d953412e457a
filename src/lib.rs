//! Client for the Source Engine Query (A2S) protocol: server info, player
//! lists and rules, fetched over UDP.

#[macro_use]
extern crate tracing;

mod config;
mod cursor;
mod dns;
mod error;
mod server;

pub use config::*;
pub use cursor::Cursor;
pub use dns::DNS;
pub use error::*;
pub use server::*;
