//! Boundary with the external 3D structure viewer.
//!
//! The viewer owns all structural and rendering state. This side only emits
//! [`ViewerCommand`]s through a [`ViewerConnection`], which holds the one live
//! handle to the viewer for as long as a track is mounted and disposes it on
//! every exit path.

mod backend;
mod command;

pub use backend::{CommandLog, ScriptWriter, ViewerBackend, ViewerConnection};
pub use command::{ViewerColor, ViewerCommand, ViewerStyle, ViewerTarget};
