//! Navigation domain: state transitions, the owning store, notifications
//! and commands.

pub mod commands;
pub mod events;
pub mod state;
pub mod store;
