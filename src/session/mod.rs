//! Session module - process-owned state and screen transitions

mod state;
mod reveal;

pub use state::{Session, Screen, Notice, NoticeKind};
pub use reveal::{Reveal, RevealPhase};
