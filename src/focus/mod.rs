//! Focus aids: the focus/break timer and the reading ruler band

pub mod ruler;
pub mod timer;

pub use ruler::RulerBand;
pub use timer::{FocusTimer, TimerEvent, TimerMode};
