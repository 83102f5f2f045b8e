use crate::flow::{FlowNetwork, MaxFlow};
use crate::value::ValueAlgebra;
use log::trace;

/// How many negative-cost cycles are cancelled after the maximum flow is found.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CycleCancelling {
    /// Cancel at most one cycle. This is enough to decide whether the cost can be
    /// reduced at all, but the reported cost is not necessarily minimal.
    #[default]
    Once,
    /// Cancel cycles until none remain. The reported cost is then the true minimum.
    Exhaustive,
}

/// Maximum flow followed by cost reduction through negative cycle cancelling.
///
/// Costs of the network must be non-negative (see [`FlowNetwork::add_costed_edge`]); the
/// only negative costs are then those of residual edges.
#[derive(Clone, Debug)]
pub struct MinCostMaxFlow<V> {
    solver: MaxFlow<V>,
    mode: CycleCancelling,
    min_cost: Option<V>,
}

impl<V: ValueAlgebra> MinCostMaxFlow<V> {
    pub fn new(network: FlowNetwork<V>, mode: CycleCancelling) -> Self {
        MinCostMaxFlow {
            solver: MaxFlow::new(network),
            mode,
            min_cost: None,
        }
    }

    pub fn mode(&self) -> CycleCancelling {
        self.mode
    }

    pub fn max_flow(&mut self) -> V {
        self.solve();
        self.solver.max_flow()
    }

    /// The cost of the computed maximum flow after cycle cancelling.
    pub fn min_cost(&mut self) -> V {
        self.solve();
        self.min_cost.clone().unwrap_or_else(V::zero)
    }

    pub fn network(&self) -> &FlowNetwork<V> {
        self.solver.network()
    }

    fn solve(&mut self) {
        if self.min_cost.is_some() {
            return;
        }
        let flow = self.solver.max_flow();
        let network = self.solver.network_mut();
        let mut cancelled = 0usize;
        while cancel_negative_cycle(network) {
            cancelled += 1;
            if self.mode == CycleCancelling::Once {
                break;
            }
        }
        let cost = network.total_cost();
        trace!(
            "Flow {} with cost {} after cancelling {} cycle(s).",
            flow.to_f64(),
            cost.to_f64(),
            cancelled
        );
        self.min_cost = Some(cost);
    }
}

/// Find one negative-cost cycle in the residual graph using Bellman-Ford and push its
/// bottleneck capacity around it. Returns `false` if there is no negative cycle.
///
/// All distances start at zero, which is equivalent to a virtual root connected to every
/// node, so cycles unreachable from the source are found as well.
fn cancel_negative_cycle<V: ValueAlgebra>(network: &mut FlowNetwork<V>) -> bool {
    let num_nodes = network.num_nodes();
    let mut distance = vec![V::zero(); num_nodes];
    let mut previous: Vec<Option<usize>> = vec![None; num_nodes];

    let mut relaxed = None;
    for _ in 0..num_nodes {
        relaxed = None;
        for (index, edge) in network.edges().iter().enumerate() {
            if !edge.remaining_capacity().is_positive() {
                continue;
            }
            let candidate = distance[edge.from].add(&edge.cost);
            if distance[edge.to].subtract(&candidate).is_positive() {
                distance[edge.to] = candidate;
                previous[edge.to] = Some(index);
                relaxed = Some(edge.to);
            }
        }
        if relaxed.is_none() {
            return false;
        }
    }
    let Some(mut node) = relaxed else {
        return false;
    };

    // Walking back `num_nodes` predecessors is guaranteed to end up on the cycle.
    for _ in 0..num_nodes {
        let Some(edge) = previous[node] else {
            return false;
        };
        node = network.edge(edge).from;
    }

    let mut cycle = Vec::new();
    let mut at = node;
    loop {
        let Some(edge) = previous[at] else {
            return false;
        };
        cycle.push(edge);
        at = network.edge(edge).from;
        if at == node {
            break;
        }
        if cycle.len() > num_nodes {
            return false;
        }
    }

    let Some(bottleneck) = cycle
        .iter()
        .map(|edge| network.edge(*edge).remaining_capacity())
        .reduce(|a, b| a.min_of(&b))
    else {
        return false;
    };
    for edge in &cycle {
        network.augment(*edge, &bottleneck);
    }
    trace!(
        "Cancelled a negative cycle of length {} with bottleneck {}.",
        cycle.len(),
        bottleneck.to_f64()
    );
    true
}
