//! Scheduled parameters and the owned signal graph that routes them.
//!
//! A [`param::Param`] is a value that only changes through scheduled
//! automation. A [`signal_graph::SignalGraph`] owns params, LFOs and simple
//! arithmetic stages, wires them with explicit edges, and renders them block by
//! block in dependency order.

/// Low frequency oscillator stage with a scheduled rate.
pub mod lfo;
/// Node handles, stage kinds and edges.
pub mod node;
/// Scheduled scalar parameters and their external views.
pub mod param;
/// The graph container: wiring, rendering and teardown.
pub mod signal_graph;

pub use lfo::Lfo;
pub use node::{Edge, Inlet, NodeId, Stage};
pub use param::{Param, ParamView, Units};
pub use signal_graph::SignalGraph;
