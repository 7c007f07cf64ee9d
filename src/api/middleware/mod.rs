//! API middleware.

mod gate;

pub use gate::{has_session_cookie, session_gate};
