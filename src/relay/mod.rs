//! The `/submit` relay: token, mapping, forward, error passthrough.

pub mod downstream;
pub mod error;
pub mod handler;
