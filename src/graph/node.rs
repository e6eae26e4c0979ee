use crate::graph::{lfo::Lfo, param::Param};

/// Handle to a node in a `SignalGraph`.
///
/// Ids are never reused: once a node is removed its id stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node does with its inputs each block.
///
/// Every stage first sums its signal inputs. Then:
///
/// - `Param`    adds its own automation value
/// - `Multiply` multiplies by the sum of its control inputs (1.0 if none)
/// - `Gain`     same as `Multiply`; used for depth and level stages
/// - `Lfo`      ignores inputs and outputs its oscillation
/// - `Port`     passes the signal sum through unchanged
pub enum Stage {
    Param(Param),
    Multiply,
    Gain,
    Lfo(Lfo),
    Port,
}

impl Stage {
    pub fn kind(&self) -> &'static str {
        match self {
            Stage::Param(_) => "param",
            Stage::Multiply => "multiply",
            Stage::Gain => "gain",
            Stage::Lfo(_) => "lfo",
            Stage::Port => "port",
        }
    }

    /// Whether the stage has a control inlet.
    pub fn accepts_control(&self) -> bool {
        matches!(self, Stage::Multiply | Stage::Gain)
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Param(param) => f.debug_tuple("Param").field(&param.name()).finish(),
            Stage::Lfo(lfo) => f
                .debug_struct("Lfo")
                .field("min", &lfo.min())
                .field("max", &lfo.max())
                .finish(),
            other => f.write_str(other.kind()),
        }
    }
}

/// Which input of the destination an edge feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inlet {
    /// Summed into the destination's signal
    Signal,
    /// Summed into the destination's multiplier
    Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub inlet: Inlet,
}
