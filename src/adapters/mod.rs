//! Adapter implementations of the port traits.
//!
//! `live` talks to the real spreadsheet API and the real filesystem;
//! `memory` backs tests and any consumer that wants a deterministic
//! in-process store.

pub mod live;
pub mod memory;
