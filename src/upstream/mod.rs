//! Clients for the remote assistant and speech-to-text services.

mod client;

pub use client::UpstreamClient;
