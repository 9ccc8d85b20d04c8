//! Token sources: where the relay gets its bearer token from.

pub mod oauth2;
