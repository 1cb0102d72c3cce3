pub mod clock;
pub mod input;
pub mod mode;
pub mod result;
pub mod run;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::Key;
pub use mode::{Mode, TestConfig};
pub use result::{RunResult, ScoreEntry};
pub use run::{Phase, SessionEvent, TestSession, Transition};
