//! Settings persistence.

mod store;

pub use store::FileSettingsStore;
