//! Clients for external collaborators.

pub mod client;
