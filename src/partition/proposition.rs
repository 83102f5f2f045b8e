use bit_set::BitSet;

/// A named atomic proposition, given by the set of states that satisfy it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Proposition {
    pub name: String,
    pub states: BitSet,
}

impl Proposition {
    pub fn new(name: impl Into<String>, states: BitSet) -> Proposition {
        Proposition {
            name: name.into(),
            states,
        }
    }

    /// Create a proposition satisfied exactly by the listed states.
    pub fn from_states(name: impl Into<String>, states: &[usize]) -> Proposition {
        Proposition::new(name, states.iter().copied().collect())
    }

    pub fn contains(&self, state: usize) -> bool {
        self.states.contains(state)
    }
}
