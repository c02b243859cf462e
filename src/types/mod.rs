//! Request and response types shared across the client.

pub mod envelope;
pub mod payload;

pub use envelope::{Envelope, read_envelope};
pub use payload::Payload;
