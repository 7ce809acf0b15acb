//! Chrome DevTools Protocol plumbing for tabclick.
//!
//! Three pieces:
//!
//! - **`discovery`**: queries the browser's `/json` HTTP endpoint for
//!   debuggable targets and picks the page to drive.
//! - **`channel`**: a sequential command channel over the target's DevTools
//!   WebSocket — one command out, one reply back, nothing in flight.
//! - **`workflow`**: the click sequence (enable DOM + Runtime, evaluate a
//!   querySelector-and-click expression, extract the result string).

pub mod channel;
pub mod discovery;
pub mod workflow;

pub use channel::{CdpChannel, CommandChannel};
pub use discovery::{list_targets, select_target, Target};
pub use workflow::run_click;
