//! Error types shared across the crate.

use crate::graph::NodeId;

/// Rejections raised by an automation curve when a scheduling call is invalid.
#[derive(Debug, Clone, PartialEq)]
pub enum AutomationError {
    /// Exponential ramps can only target strictly positive values
    NonPositiveTarget { value: f32 },
    /// Value is NaN or infinite
    NonFiniteValue { value: f32 },
    /// Time is negative or not finite
    InvalidTime { time: f64 },
}

impl std::fmt::Display for AutomationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomationError::NonPositiveTarget { value } => {
                write!(f, "exponential ramp target must be positive, got {}", value)
            }
            AutomationError::NonFiniteValue { value } => {
                write!(f, "automation value must be finite, got {}", value)
            }
            AutomationError::InvalidTime { time } => {
                write!(f, "automation time must be finite and >= 0, got {}", time)
            }
        }
    }
}

impl std::error::Error for AutomationError {}

/// Errors raised while wiring the signal graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Node was never added or has already been removed
    UnknownNode(NodeId),
    /// The edge would close a feedback loop
    Cycle { from: NodeId, to: NodeId },
    /// The node exists but is not the kind of stage the caller asked for
    WrongStage { node: NodeId, expected: &'static str },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::UnknownNode(node) => write!(f, "unknown graph node {}", node),
            GraphError::Cycle { from, to } => {
                write!(f, "connecting {} -> {} would create a cycle", from, to)
            }
            GraphError::WrongStage { node, expected } => {
                write!(f, "graph node {} is not a {} stage", node, expected)
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Errors raised when parsing notes and musical time descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    InvalidNote(String),
    InvalidTime(String),
    InvalidFrequency(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidNote(s) => write!(f, "invalid note name: {:?}", s),
            ParseError::InvalidTime(s) => write!(f, "invalid time descriptor: {:?}", s),
            ParseError::InvalidFrequency(s) => {
                write!(f, "invalid frequency descriptor: {:?}", s)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Top-level error returned by instrument operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    /// The instrument was disposed; it cannot be used again
    Disposed,
    Automation(AutomationError),
    Graph(GraphError),
    Parse(ParseError),
}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthError::Disposed => write!(f, "instrument used after dispose()"),
            SynthError::Automation(e) => write!(f, "automation rejected: {}", e),
            SynthError::Graph(e) => write!(f, "graph error: {}", e),
            SynthError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SynthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SynthError::Disposed => None,
            SynthError::Automation(e) => Some(e),
            SynthError::Graph(e) => Some(e),
            SynthError::Parse(e) => Some(e),
        }
    }
}

impl From<AutomationError> for SynthError {
    fn from(e: AutomationError) -> Self {
        SynthError::Automation(e)
    }
}

impl From<GraphError> for SynthError {
    fn from(e: GraphError) -> Self {
        SynthError::Graph(e)
    }
}

impl From<ParseError> for SynthError {
    fn from(e: ParseError) -> Self {
        SynthError::Parse(e)
    }
}
