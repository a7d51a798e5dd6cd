//! Server-reported validation errors keyed by field path

mod messages;
pub mod path;
mod store;

pub use messages::Messages;
pub use store::PathErrorStore;
