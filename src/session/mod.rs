//! The filter session: one user's interaction with the catalog.
//!
//! # Module Structure
//!
//! - [`runner`]: the event loop that owns the state and applies events and
//!   fetch completions in order
//! - [`host`]: the UI boundary and a plain-text host
//! - [`message`]: messages delivered to a running session
//! - [`notice`]: non-blocking failure notices
//! - [`command`]: line commands for the terminal host
//! - [`config`]: environment-driven configuration

pub mod command;
pub mod config;
pub mod host;
pub mod message;
pub mod notice;
pub mod runner;

pub use command::{Command, CommandError, parse_command};
pub use config::SessionConfig;
pub use host::{ControlView, ControlsView, HostView, TerminalHost};
pub use message::{SessionMessage, UserEvent};
pub use notice::Notice;
pub use runner::{FilterSession, SessionError, SessionHandle};
