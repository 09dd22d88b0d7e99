//! Concrete implementations of external-collaborator ports.

pub mod auth;
