//! Domain models for fever records.

mod location;
mod medication;
mod record;
mod wire;

pub use location::*;
pub use medication::*;
pub use record::*;
pub use wire::WireError;
