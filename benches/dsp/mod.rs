//! Benchmarks for low-level DSP primitives.

mod amplify;
mod automation;
mod filter;
mod oscillator;

pub use amplify::bench_amplify;
pub use automation::bench_automation;
pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
