use crate::partition::Partition;

/// The state of a refinement computation between two rounds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefinementState {
    pub iteration: usize,
    pub partition: Partition,
    /// Blocks of `partition` that can distinguish states in the next round. `None` before
    /// the first round, when the splitters depend on the kind of the chain.
    pub splitters: Option<Vec<bool>>,
}

impl From<Partition> for RefinementState {
    fn from(value: Partition) -> Self {
        RefinementState {
            iteration: 0,
            partition: value,
            splitters: None,
        }
    }
}

impl From<&Partition> for RefinementState {
    fn from(value: &Partition) -> Self {
        Self::from(value.clone())
    }
}

impl From<RefinementState> for Partition {
    fn from(value: RefinementState) -> Self {
        value.partition
    }
}
