pub mod duration;
pub mod notes;
pub mod time;
pub mod time_signature;

pub use duration::Duration;
pub use notes::Note;
pub use time::{Frequency, Time, TimeValue};
pub use time_signature::TimeSignature;
