//! Terminal input adapter for selectbox widgets.
//!
//! Bridges crossterm's event stream to `selectbox_core` events so a select
//! can be driven from a terminal session. Rendering is left to the host.

mod input;

pub use input::InputHandler;
