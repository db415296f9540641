//! Selection bookkeeping and its translation into viewer commands.
//!
//! [`SelectionState`] is plain data. [`SelectionSynchronizer`] is its only
//! writer: it flips keys in response to clicks and produces the command
//! sequence the structure viewer needs to mirror the change.

mod state;
mod sync;

pub use state::{SelectionKey, SelectionState};
pub use sync::{SelectableUnit, SelectionSynchronizer, Transition};
