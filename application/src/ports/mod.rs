//! Ports: interfaces the application layer expects the outside world to
//! implement. Adapters live in the infrastructure crate.

pub mod llm_gateway;
pub mod page_host;
pub mod settings_store;
