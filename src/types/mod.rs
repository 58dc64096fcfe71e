mod chat;
mod common;
mod log;
mod profile;
mod workout;

pub use chat::*;
pub use common::*;
pub use log::*;
pub use profile::*;
pub use workout::*;
