//! Kraken REST API dispatcher.
//!
//! [`KrakenRestClient`] sends public calls as plain GET requests and private calls
//! as signed POST requests. Endpoint schemas are left to the caller: every call
//! takes a method name and a [`Payload`](crate::types::Payload).

mod client;
mod endpoints;

pub use client::{KrakenRestClient, KrakenRestClientBuilder};
pub use endpoints::*;
