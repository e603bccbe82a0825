//! Moonshot chat-completions adapter.
//!
//! One endpoint, one call shape: `POST {base}/chat/completions` with a
//! bearer key, non-streaming. [`protocol`] pins the request and response
//! bodies; [`client`] holds the `reqwest` transport and the error mapping.

mod client;
pub mod protocol;

pub use client::MoonshotGateway;
