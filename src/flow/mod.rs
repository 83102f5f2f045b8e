//! Flow networks with residual edges and the solvers used by robust bisimulation.
//!
//! - [`FlowNetwork`] stores the capacitated (and optionally costed) directed graph.
//! - [`MaxFlow`] computes a maximum flow using Dinic's algorithm.
//! - [`MinCostMaxFlow`] additionally reduces the cost of that flow by cancelling
//!   negative-cost cycles in the residual graph.
//!
//! Every solver runs at most once: repeated queries return the cached solution.

mod max_flow;
mod min_cost;


use crate::value::ValueAlgebra;
use thiserror::Error;

pub use max_flow::MaxFlow;
pub use min_cost::{CycleCancelling, MinCostMaxFlow};

/// Errors caused by malformed flow network construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("node {node} is out of range for a network with {num_nodes} nodes")]
    NodeOutOfRange { node: usize, num_nodes: usize },
    #[error("the source and sink must be different nodes (got {0} for both)")]
    SourceIsSink(usize),
    #[error("edge {from} -> {to} has a negative capacity")]
    NegativeCapacity { from: usize, to: usize },
    #[error("edge {from} -> {to} has a negative cost")]
    NegativeCost { from: usize, to: usize },
}

/// One directed edge of a [`FlowNetwork`].
///
/// Edges are stored in pairs: the edge with index `i` and its residual edge with
/// index `i ^ 1`. A residual edge has zero capacity and negated cost, and always carries
/// the negated flow of its partner.
#[derive(Clone, Debug)]
pub struct Edge<V> {
    pub from: usize,
    pub to: usize,
    pub capacity: V,
    pub cost: V,
    pub flow: V,
}

impl<V: ValueAlgebra> Edge<V> {
    pub fn remaining_capacity(&self) -> V {
        self.capacity.subtract(&self.flow)
    }
}

/// A directed graph with nodes `0..num_nodes`, a distinguished source and sink.
#[derive(Clone, Debug)]
pub struct FlowNetwork<V> {
    source: usize,
    sink: usize,
    edges: Vec<Edge<V>>,
    adjacency: Vec<Vec<usize>>,
}

impl<V: ValueAlgebra> FlowNetwork<V> {
    pub fn new(num_nodes: usize, source: usize, sink: usize) -> Result<Self, FlowError> {
        for node in [source, sink] {
            if node >= num_nodes {
                return Err(FlowError::NodeOutOfRange { node, num_nodes });
            }
        }
        if source == sink {
            return Err(FlowError::SourceIsSink(source));
        }
        Ok(FlowNetwork {
            source,
            sink,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); num_nodes],
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn sink(&self) -> usize {
        self.sink
    }

    /// Add a zero-cost edge. See [`FlowNetwork::add_costed_edge`].
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: V) -> Result<usize, FlowError> {
        self.add_costed_edge(from, to, capacity, V::zero())
    }

    /// Add an edge `from -> to` together with its residual edge `to -> from`.
    ///
    /// Returns the index of the new (forward) edge.
    pub fn add_costed_edge(
        &mut self,
        from: usize,
        to: usize,
        capacity: V,
        cost: V,
    ) -> Result<usize, FlowError> {
        let num_nodes = self.num_nodes();
        for node in [from, to] {
            if node >= num_nodes {
                return Err(FlowError::NodeOutOfRange { node, num_nodes });
            }
        }
        if capacity < V::zero() {
            return Err(FlowError::NegativeCapacity { from, to });
        }
        if cost < V::zero() {
            return Err(FlowError::NegativeCost { from, to });
        }

        let index = self.edges.len();
        let negated_cost = V::zero().subtract(&cost);
        self.edges.push(Edge {
            from,
            to,
            capacity,
            cost,
            flow: V::zero(),
        });
        self.edges.push(Edge {
            from: to,
            to: from,
            capacity: V::zero(),
            cost: negated_cost,
            flow: V::zero(),
        });
        self.adjacency[from].push(index);
        self.adjacency[to].push(index + 1);
        Ok(index)
    }

    /// All edges, including residual edges (at odd indices).
    pub fn edges(&self) -> &[Edge<V>] {
        &self.edges
    }

    pub fn edge(&self, index: usize) -> &Edge<V> {
        &self.edges[index]
    }

    /// Indices of edges leaving `node` (including residual edges).
    pub fn outgoing(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Push `amount` along edge `index`, cancelling the same amount on its residual edge.
    pub(crate) fn augment(&mut self, index: usize, amount: &V) {
        let forward = &mut self.edges[index];
        forward.flow = forward.flow.add(amount);
        let residual = &mut self.edges[index ^ 1];
        residual.flow = residual.flow.subtract(amount);
    }

    /// Net flow leaving `node` (outgoing minus incoming), computed from forward edges.
    pub fn net_outflow(&self, node: usize) -> V {
        let mut total = V::zero();
        for edge in self.edges.iter().step_by(2) {
            if edge.from == node {
                total = total.add(&edge.flow);
            }
            if edge.to == node {
                total = total.subtract(&edge.flow);
            }
        }
        total
    }

    /// Sum of `flow * cost` over all forward edges.
    pub fn total_cost(&self) -> V {
        self.edges
            .iter()
            .step_by(2)
            .fold(V::zero(), |acc, edge| acc.add(&edge.flow.multiply(&edge.cost)))
    }

    /// Total capacity of edges leaving the source; an upper bound on any flow value.
    pub(crate) fn source_capacity(&self) -> V {
        self.adjacency[self.source]
            .iter()
            .map(|index| &self.edges[*index].capacity)
            .fold(V::zero(), |acc, capacity| acc.add(capacity))
    }
}
