//! Interactive editing
//!
//! This module connects a front-end to the page model:
//! - Collaborator traits for dialogs, the canvas and the busy indicator
//! - The press/drag/release state machine
//! - Typed commands with explicit indices
//! - The session that owns the project and executes commands

mod collab;
mod commands;
mod interaction;
mod session;

pub use collab::*;
pub use commands::*;
pub use interaction::*;
pub use session::*;
