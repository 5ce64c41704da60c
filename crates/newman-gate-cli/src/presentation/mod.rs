//! # Presentation Layer
//!
//! ```text
//! [ Handler ] --> [ ViewModel ] --> [ Renderer ] --> [ Output ]
//!  (Controller)     (Contract)        (View)       (Console/JSON/CSV)
//! ```
//!
//! * `view_models`: serializable data the user sees. No calculation logic.
//! * `chat`: plain-text summary for chat notifications (Slack mrkdwn).
//! * `renderers`: layout, colour and format selection.

pub mod chat;
pub mod renderers;
pub mod view_models;

pub use renderers::ConsoleRenderer;
pub use view_models::{CountViewModel, GateViewModel};
