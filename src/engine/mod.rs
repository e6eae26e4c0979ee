//! Engine services shared by every instrument.
//!
//! Instruments never reach for a global audio context. The caller creates a
//! [`Clock`](clock::Clock), hands an `Arc` of it to each instrument at
//! construction, and owns its start/stop lifecycle.

pub mod clock;

pub use clock::Clock;
