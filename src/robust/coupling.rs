use crate::chain::MarkovChain;
use crate::flow::{CycleCancelling, FlowError, FlowNetwork, MinCostMaxFlow};
use crate::partition::Partition;
use crate::robust::relation::Relation;
use crate::value::ValueAlgebra;

const SOURCE: usize = 0;
const SINK: usize = 1;

/// Check if some pair of successors of `left` and `right` is already in `confirmed`.
pub fn shares_confirmed_successor<C: MarkovChain>(
    chain: &C,
    left: usize,
    right: usize,
    confirmed: &Relation,
) -> bool {
    chain.transitions(left).any(|(left_succ, _)| {
        chain
            .transitions(right)
            .any(|(right_succ, _)| confirmed.contains(left_succ, right_succ))
    })
}

/// Check if there is a coupling of the distributions of `left` and `right` whose support
/// stays within the blocks of `partition` and intersects `confirmed`.
///
/// The question is answered by a min-cost max-flow query on a bipartite network:
///
/// ```text
/// source -(P(left, u))-> u -(1)-> v -(P(right, v))-> sink
/// ```
///
/// The middle edge `u -> v` costs `0` if `(u, v)` is confirmed, `1` if `u` and `v` are only
/// in the same block, and is missing otherwise. A coupling exists iff the maximum flow is one,
/// and it uses a confirmed pair iff the minimum cost is below one.
pub fn has_confirmed_coupling<C: MarkovChain>(
    chain: &C,
    left: usize,
    right: usize,
    partition: &Partition,
    confirmed: &Relation,
    cycle_cancelling: CycleCancelling,
) -> Result<bool, FlowError> {
    let left_row: Vec<(usize, &C::Value)> = chain.transitions(left).collect();
    let right_row: Vec<(usize, &C::Value)> = chain.transitions(right).collect();
    let left_node = |index: usize| 2 + index;
    let right_node = |index: usize| 2 + left_row.len() + index;

    let mut network = FlowNetwork::new(2 + left_row.len() + right_row.len(), SOURCE, SINK)?;
    let mut uses_confirmed = false;
    for (i, (left_succ, probability)) in left_row.iter().enumerate() {
        network.add_edge(SOURCE, left_node(i), (*probability).clone())?;
        for (j, (right_succ, _)) in right_row.iter().enumerate() {
            if confirmed.contains(*left_succ, *right_succ) {
                uses_confirmed = true;
                network.add_costed_edge(
                    left_node(i),
                    right_node(j),
                    C::Value::one(),
                    C::Value::zero(),
                )?;
            } else if partition.same_block(*left_succ, *right_succ) {
                network.add_costed_edge(
                    left_node(i),
                    right_node(j),
                    C::Value::one(),
                    C::Value::one(),
                )?;
            }
        }
    }
    if !uses_confirmed {
        return Ok(false);
    }
    for (j, (_, probability)) in right_row.iter().enumerate() {
        network.add_edge(right_node(j), SINK, (*probability).clone())?;
    }

    let mut solver = MinCostMaxFlow::new(network, cycle_cancelling);
    if !solver.max_flow().is_one() {
        return Ok(false);
    }
    Ok(C::Value::one().subtract(&solver.min_cost()).is_positive())
}
