//! rythmd - Assistant Gateway daemon
//!
//! Holds the provider credentials so clients never see them and relays chat
//! conversations to the upstream completion API.

pub mod routes;
pub mod server;

pub use server::{router, run, AppState};
