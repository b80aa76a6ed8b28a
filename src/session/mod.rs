//! Async drivers for networked matches

mod ai_seat;
mod remote;

pub use ai_seat::AiSeat;
pub use remote::{RemoteSession, SessionUpdate};
