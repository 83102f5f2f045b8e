use crate::flow::FlowNetwork;
use crate::value::ValueAlgebra;
use log::trace;
use std::collections::VecDeque;

/// Maximum flow via Dinic's algorithm (`O(V^2 E)`).
///
/// Each phase builds a BFS level graph from the source and then saturates it with a
/// blocking flow found by DFS. Per-node "next edge" cursors ensure that dead ends are
/// never scanned twice within one phase. The DFS recursion depth is bounded by the length
/// of the level graph, i.e. by the number of nodes.
#[derive(Clone, Debug)]
pub struct MaxFlow<V> {
    network: FlowNetwork<V>,
    max_flow: Option<V>,
}

impl<V: ValueAlgebra> MaxFlow<V> {
    pub fn new(network: FlowNetwork<V>) -> Self {
        MaxFlow {
            network,
            max_flow: None,
        }
    }

    /// Run the solver (once) and return the maximum flow value.
    pub fn max_flow(&mut self) -> V {
        if let Some(value) = &self.max_flow {
            return value.clone();
        }
        let value = dinic(&mut self.network);
        self.max_flow = Some(value.clone());
        value
    }

    /// The network, with flows assigned if the solver has already run.
    pub fn network(&self) -> &FlowNetwork<V> {
        &self.network
    }

    pub(crate) fn network_mut(&mut self) -> &mut FlowNetwork<V> {
        &mut self.network
    }

    pub fn into_network(self) -> FlowNetwork<V> {
        self.network
    }
}

/// Run Dinic's algorithm on `network`, assuming all flows start at zero.
pub(crate) fn dinic<V: ValueAlgebra>(network: &mut FlowNetwork<V>) -> V {
    let num_nodes = network.num_nodes();
    let limit = network.source_capacity();
    let mut total = V::zero();
    let mut level = vec![usize::MAX; num_nodes];
    let mut next = vec![0usize; num_nodes];
    let mut phase = 0;

    while build_levels(network, &mut level) {
        phase += 1;
        next.fill(0);
        loop {
            let pushed = blocking_path(network, network.source(), &limit, &level, &mut next);
            if !pushed.is_positive() {
                break;
            }
            total = total.add(&pushed);
        }
        trace!("[phase:{}] Dinic flow increased to {}.", phase, total.to_f64());
    }

    total
}

/// Compute BFS levels over edges with positive remaining capacity. Returns `true` if
/// the sink is reachable.
fn build_levels<V: ValueAlgebra>(network: &FlowNetwork<V>, level: &mut [usize]) -> bool {
    level.fill(usize::MAX);
    level[network.source()] = 0;
    let mut queue = VecDeque::from([network.source()]);
    while let Some(node) = queue.pop_front() {
        for edge_index in network.outgoing(node) {
            let edge = network.edge(*edge_index);
            if level[edge.to] == usize::MAX && edge.remaining_capacity().is_positive() {
                level[edge.to] = level[node] + 1;
                queue.push_back(edge.to);
            }
        }
    }
    level[network.sink()] != usize::MAX
}

/// Find one augmenting path in the level graph starting at `at`, push its bottleneck
/// and return it (zero if there is no such path).
fn blocking_path<V: ValueAlgebra>(
    network: &mut FlowNetwork<V>,
    at: usize,
    flow: &V,
    level: &[usize],
    next: &mut [usize],
) -> V {
    if at == network.sink() {
        return flow.clone();
    }
    while next[at] < network.outgoing(at).len() {
        let edge_index = network.outgoing(at)[next[at]];
        let edge = network.edge(edge_index);
        let to = edge.to;
        let remaining = edge.remaining_capacity();
        if level[to] == level[at] + 1 && remaining.is_positive() {
            let bottleneck = blocking_path(network, to, &flow.min_of(&remaining), level, next);
            if bottleneck.is_positive() {
                network.augment(edge_index, &bottleneck);
                return bottleneck;
            }
        }
        next[at] += 1;
    }
    V::zero()
}
