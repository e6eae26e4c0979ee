use std::collections::VecDeque;

use crate::{
    dsp::amplify::{multiply_in_place, sum_into},
    error::GraphError,
    graph::{
        lfo::Lfo,
        node::{Edge, Inlet, NodeId, Stage},
        param::Param,
    },
    MAX_BLOCK_SIZE,
};

/*
Owned Signal Graph
==================

An instrument that routes control signals between its parts owns one
`SignalGraph`. Nodes live in the graph; the instrument keeps only `NodeId`s.
Edges are plain data, so "disconnect everything attached to X" is a filter
over a list, and teardown can verify nothing dangles.

Example: the duo synth's pitch routing

    frequency ──────────────────────────────→ voice0.frequency
        │
        └──→ [multiply] ──────────────────→ voice1.frequency
                 ↑ control
            harmonicity

    vibrato lfo ──→ [gain] ──┬──────────────→ voice0.detune
                      ↑      └──────────────→ voice1.detune
                vibrato amount

Rendering
---------

`render_block()` visits nodes in topological order (Kahn's algorithm over the
edge list), so every node's inputs are complete before it runs. `connect()`
refuses edges that would close a loop, which keeps that order well defined.

Each node owns a block buffer of MAX_BLOCK_SIZE samples. After a render the
first `len` samples of every buffer hold that node's output for the block.

Automation Pruning
------------------

Rendering consumes automation: after a block, points that can no longer
affect the timeline from the block start onward are dropped from every
`Param` the graph owns.
*/

struct Node {
    label: &'static str,
    stage: Stage,
    output: Vec<f32>,
}

#[derive(Default)]
pub struct SignalGraph {
    nodes: Vec<Option<Node>>,
    edges: Vec<Edge>,
    order: Vec<NodeId>,
    control: Vec<f32>,
    rendered: usize,
}

impl SignalGraph {
    pub fn new() -> Self {
        Self {
            control: vec![0.0; MAX_BLOCK_SIZE],
            ..Default::default()
        }
    }

    pub fn add(&mut self, label: &'static str, stage: Stage) -> NodeId {
        let id = NodeId(self.nodes.len());
        tracing::debug!(node = %id, label, kind = stage.kind(), "add graph node");
        self.nodes.push(Some(Node {
            label,
            stage,
            output: vec![0.0; MAX_BLOCK_SIZE],
        }));
        self.order.push(id);
        id
    }

    pub fn add_param(&mut self, label: &'static str, param: Param) -> NodeId {
        self.add(label, Stage::Param(param))
    }

    pub fn add_multiply(&mut self, label: &'static str) -> NodeId {
        self.add(label, Stage::Multiply)
    }

    pub fn add_gain(&mut self, label: &'static str) -> NodeId {
        self.add(label, Stage::Gain)
    }

    pub fn add_lfo(&mut self, label: &'static str, lfo: Lfo) -> NodeId {
        self.add(label, Stage::Lfo(lfo))
    }

    pub fn add_port(&mut self, label: &'static str) -> NodeId {
        self.add(label, Stage::Port)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn label(&self, id: NodeId) -> Option<&'static str> {
        self.node(id).ok().map(|n| n.label)
    }

    pub fn stage(&self, id: NodeId) -> Result<&Stage, GraphError> {
        self.node(id).map(|n| &n.stage)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges arriving at `id`.
    pub fn inputs(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.to == id)
    }

    /// Edges leaving `id`.
    pub fn outputs(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    pub fn param(&self, id: NodeId) -> Result<&Param, GraphError> {
        match &self.node(id)?.stage {
            Stage::Param(param) => Ok(param),
            _ => Err(GraphError::WrongStage {
                node: id,
                expected: "param",
            }),
        }
    }

    pub fn param_mut(&mut self, id: NodeId) -> Result<&mut Param, GraphError> {
        match &mut self.node_mut(id)?.stage {
            Stage::Param(param) => Ok(param),
            _ => Err(GraphError::WrongStage {
                node: id,
                expected: "param",
            }),
        }
    }

    pub fn lfo(&self, id: NodeId) -> Result<&Lfo, GraphError> {
        match &self.node(id)?.stage {
            Stage::Lfo(lfo) => Ok(lfo),
            _ => Err(GraphError::WrongStage {
                node: id,
                expected: "lfo",
            }),
        }
    }

    pub fn lfo_mut(&mut self, id: NodeId) -> Result<&mut Lfo, GraphError> {
        match &mut self.node_mut(id)?.stage {
            Stage::Lfo(lfo) => Ok(lfo),
            _ => Err(GraphError::WrongStage {
                node: id,
                expected: "lfo",
            }),
        }
    }

    /// Route `from`'s output into `to`.
    ///
    /// Connecting the same pair to the same inlet twice is a no-op.
    pub fn connect(&mut self, from: NodeId, to: NodeId, inlet: Inlet) -> Result<(), GraphError> {
        self.node(from)?;
        let target = self.node(to)?;

        if inlet == Inlet::Control && !target.stage.accepts_control() {
            return Err(GraphError::WrongStage {
                node: to,
                expected: "multiply or gain",
            });
        }
        if from == to || self.reaches(to, from) {
            return Err(GraphError::Cycle { from, to });
        }

        let edge = Edge { from, to, inlet };
        if self.edges.contains(&edge) {
            return Ok(());
        }

        tracing::debug!(%from, %to, ?inlet, "connect");
        self.edges.push(edge);
        self.sort();
        Ok(())
    }

    /// Remove every edge into or out of `id`. Returns how many were removed.
    pub fn disconnect(&mut self, id: NodeId) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| e.from != id && e.to != id);
        let removed = before - self.edges.len();
        if removed > 0 {
            tracing::debug!(node = %id, removed, "disconnect");
            self.sort();
        }
        removed
    }

    /// Disconnect and drop a node, handing back its stage.
    pub fn remove(&mut self, id: NodeId) -> Result<Stage, GraphError> {
        self.node(id)?;
        self.disconnect(id);

        let node = self.nodes[id.0].take().ok_or(GraphError::UnknownNode(id))?;
        self.order.retain(|n| *n != id);
        tracing::debug!(node = %id, label = node.label, "remove graph node");
        Ok(node.stage)
    }

    /// Remove every node and edge. Returns how many nodes were dropped.
    pub fn teardown(&mut self) -> usize {
        let ids: Vec<NodeId> = self.order.clone();
        let mut dropped = 0;
        for id in ids {
            if self.remove(id).is_ok() {
                dropped += 1;
            }
        }
        self.rendered = 0;
        dropped
    }

    /// Output of `id` from the most recent `render_block()`.
    pub fn output(&self, id: NodeId) -> Result<&[f32], GraphError> {
        self.node(id).map(|n| &n.output[..self.rendered])
    }

    /// Render `len` samples starting at `start` seconds.
    pub fn render_block(&mut self, start: f64, sample_rate: f32, len: usize) {
        let len = len.min(MAX_BLOCK_SIZE);
        let dt = 1.0 / sample_rate as f64;

        let SignalGraph {
            nodes,
            edges,
            order,
            control,
            ..
        } = self;

        for &id in order.iter() {
            let Some(mut output) = nodes[id.0]
                .as_mut()
                .map(|n| std::mem::take(&mut n.output))
            else {
                continue;
            };
            let out = &mut output[..len];
            out.fill(0.0);

            let mut has_control = false;
            control[..len].fill(0.0);

            for edge in edges.iter().filter(|e| e.to == id) {
                let Some(source) = nodes[edge.from.0].as_ref() else {
                    continue;
                };
                match edge.inlet {
                    Inlet::Signal => sum_into(out, &source.output[..len]),
                    Inlet::Control => {
                        has_control = true;
                        sum_into(&mut control[..len], &source.output[..len]);
                    }
                }
            }

            if let Some(node) = nodes[id.0].as_mut() {
                match &mut node.stage {
                    Stage::Param(param) => {
                        for (i, sample) in out.iter_mut().enumerate() {
                            *sample += param.value_at(start + i as f64 * dt);
                        }
                        param.curve_mut().prune_before(start);
                    }
                    Stage::Multiply | Stage::Gain => {
                        if has_control {
                            multiply_in_place(out, &control[..len]);
                        }
                    }
                    Stage::Lfo(lfo) => lfo.render_block(out, start, sample_rate),
                    Stage::Port => {}
                }
                node.output = output;
            }
        }

        self.rendered = len;
    }

    fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(GraphError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(GraphError::UnknownNode(id))
    }

    /// Whether `target` is reachable from `from` along existing edges.
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut stack = vec![from];
        let mut seen = vec![false; self.nodes.len()];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if std::mem::replace(&mut seen[id.0], true) {
                continue;
            }
            stack.extend(self.outputs(id).map(|e| e.to));
        }
        false
    }

    // Kahn's algorithm; ties resolve by insertion order.
    fn sort(&mut self) {
        let mut in_degree = vec![0usize; self.nodes.len()];
        for edge in &self.edges {
            in_degree[edge.to.0] += 1;
        }

        let mut ready: VecDeque<NodeId> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, n)| n.is_some() && in_degree[*i] == 0)
            .map(|(i, _)| NodeId(i))
            .collect();

        self.order.clear();
        while let Some(id) = ready.pop_front() {
            self.order.push(id);
            for edge in self.edges.iter().filter(|e| e.from == id) {
                in_degree[edge.to.0] -= 1;
                if in_degree[edge.to.0] == 0 {
                    ready.push_back(edge.to);
                }
            }
        }
    }
}

impl std::fmt::Debug for SignalGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalGraph")
            .field("nodes", &self.len())
            .field("edges", &self.edges)
            .finish()
    }
}
