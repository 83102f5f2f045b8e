use crate::BisimulationError;
use crate::chain::{ChainKind, MarkovChain};
use crate::value::ValueAlgebra;

/// A simple explicit Markov chain that stores one sparse row per state.
///
/// Rows are kept sorted by target state and never contain duplicate targets.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseChain<V> {
    kind: ChainKind,
    rows: Vec<Vec<(usize, V)>>,
}

impl<V: ValueAlgebra> SparseChain<V> {
    /// Create a chain with `num_states` states and no transitions.
    pub fn new(kind: ChainKind, num_states: usize) -> SparseChain<V> {
        SparseChain {
            kind,
            rows: vec![Vec::new(); num_states],
        }
    }

    /// Create a chain from explicit rows. Duplicate targets within a row are summed.
    ///
    /// # Panics
    ///
    /// Panics if a row refers to a state outside of `0..rows.len()`.
    pub fn from_rows(kind: ChainKind, rows: Vec<Vec<(usize, V)>>) -> SparseChain<V> {
        let mut chain = SparseChain::new(kind, rows.len());
        for (source, row) in rows.into_iter().enumerate() {
            for (target, value) in row {
                chain.add_probability(source, target, value);
            }
        }
        chain
    }

    pub fn kind(&self) -> ChainKind {
        self.kind
    }

    pub fn num_states(&self) -> usize {
        self.rows.len()
    }

    pub fn num_transitions(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    /// The sparse row of `state`, sorted by target.
    pub fn row(&self, state: usize) -> &[(usize, V)] {
        &self.rows[state]
    }

    /// Set the value of the `source -> target` transition, replacing any previous value.
    ///
    /// # Panics
    ///
    /// Panics if `source` or `target` is not a valid state.
    pub fn set_probability(&mut self, source: usize, target: usize, value: V) {
        assert!(target < self.rows.len(), "Target state {target} out of range.");
        let row = &mut self.rows[source];
        match row.binary_search_by_key(&target, |(t, _)| *t) {
            Ok(index) => row[index].1 = value,
            Err(index) => row.insert(index, (target, value)),
        }
    }

    /// Add `value` to the `source -> target` transition (creating it if necessary).
    ///
    /// # Panics
    ///
    /// Panics if `source` or `target` is not a valid state.
    pub fn add_probability(&mut self, source: usize, target: usize, value: V) {
        assert!(target < self.rows.len(), "Target state {target} out of range.");
        let row = &mut self.rows[source];
        match row.binary_search_by_key(&target, |(t, _)| *t) {
            Ok(index) => row[index].1 = row[index].1.add(&value),
            Err(index) => row.insert(index, (target, value)),
        }
    }

    /// Total outgoing value of `state`, ignoring its self-loop.
    pub fn exit_rate(&self, state: usize) -> V {
        self.rows[state]
            .iter()
            .filter(|(target, _)| *target != state)
            .fold(V::zero(), |acc, (_, value)| acc.add(value))
    }

    /// The largest [`SparseChain::exit_rate`] over all states (zero for an empty chain).
    pub fn max_exit_rate(&self) -> V {
        let mut max = V::zero();
        for state in 0..self.num_states() {
            let rate = self.exit_rate(state);
            if rate > max {
                max = rate;
            }
        }
        max
    }

    /// Build the uniformised DTMC of this CTMC using the uniformisation rate `rate`.
    ///
    /// Every off-diagonal rate is divided by `rate` and the remaining mass becomes a self-loop.
    /// Rates *into the state's own block* therefore stop mattering for bisimulation of the
    /// resulting DTMC, which is how CTMC lumpability is obtained from DTMC bisimulation.
    ///
    /// The rate must be positive and at least [`SparseChain::max_exit_rate`].
    pub fn uniformised(&self, rate: &V) -> Result<SparseChain<V>, BisimulationError> {
        if self.kind != ChainKind::Ctmc {
            return Err(BisimulationError::UnsupportedModel {
                strategy: "uniformisation",
                kind: self.kind,
            });
        }
        let max_exit = self.max_exit_rate();
        if !rate.is_positive() || (*rate < max_exit && !rate.approx_eq(&max_exit)) {
            return Err(BisimulationError::InvariantViolation(format!(
                "uniformisation rate {} is below the maximal exit rate {}",
                rate.to_f64(),
                max_exit.to_f64()
            )));
        }

        let mut dtmc = SparseChain::new(ChainKind::Dtmc, self.num_states());
        for state in 0..self.num_states() {
            let mut stay = V::one();
            for (target, value) in &self.rows[state] {
                if *target == state || value.is_zero() {
                    continue;
                }
                let probability = value.divide(rate);
                stay = stay.subtract(&probability);
                dtmc.set_probability(state, *target, probability);
            }
            if stay.is_positive() {
                dtmc.set_probability(state, state, stay);
            }
        }
        Ok(dtmc)
    }
}

impl<V: ValueAlgebra> MarkovChain for SparseChain<V> {
    type Value = V;

    fn kind(&self) -> ChainKind {
        self.kind
    }

    fn num_states(&self) -> usize {
        self.rows.len()
    }

    fn transitions(&self, state: usize) -> impl Iterator<Item = (usize, &V)> {
        self.rows[state].iter().map(|(target, value)| (*target, value))
    }
}
