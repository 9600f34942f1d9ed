//! Presentation layer boundary
//!
//! This module defines the trait the engine uses to push messages to
//! whatever renders the quiz. The engine never draws anything itself; it
//! only reports what changed and, on request, the full state of the
//! current screen.

use crate::game::{SyncMessage, UpdateMessage};

/// Trait for sending messages to the presentation layer
///
/// Implementations might redraw a terminal UI, forward JSON to a web view,
/// or simply record the messages in tests.
pub trait Tunnel {
    /// Sends an incremental update
    ///
    /// Update messages describe a single change, such as a new question or
    /// one second less on the countdown.
    fn send_message(&self, message: &UpdateMessage);

    /// Sends a full snapshot of the current screen
    ///
    /// Sync messages let the presentation layer rebuild its view from
    /// scratch, typically after it was (re)attached.
    fn send_state(&self, state: &SyncMessage);
}
