use crate::BisimulationError;
use crate::bisimulation::{
    Bisimulation, LegacyBisimulation, RobustBisimulation, SignatureBisimulation,
};
use crate::chain::MarkovChain;
use crate::robust::PairTest;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The built-in bisimulation minimisation methods.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Signature-based refinement (keys `signature` and `new`).
    #[default]
    Signature,
    /// Refinement using full liftings in every round (keys `legacy` and `old`).
    Legacy,
    /// Robust bisimulation using the successor test (key `robust`).
    Robust,
    /// Robust bisimulation using the min-cost max-flow coupling test (key `robust-coupling`).
    RobustCoupling,
}

impl Strategy {
    /// All built-in strategies.
    pub const ALL: [Strategy; 4] = [
        Strategy::Signature,
        Strategy::Legacy,
        Strategy::Robust,
        Strategy::RobustCoupling,
    ];

    /// The canonical registry key of this strategy.
    pub fn key(&self) -> &'static str {
        match self {
            Strategy::Signature => "signature",
            Strategy::Legacy => "legacy",
            Strategy::Robust => "robust",
            Strategy::RobustCoupling => "robust-coupling",
        }
    }

    /// Alternative keys accepted by [`Strategy::from_str`].
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Strategy::Signature => &["new"],
            Strategy::Legacy => &["old"],
            Strategy::Robust | Strategy::RobustCoupling => &[],
        }
    }

    /// Instantiate the method implementing this strategy.
    pub fn method<C: MarkovChain + Clone + 'static>(&self) -> Box<dyn Bisimulation<C>> {
        match self {
            Strategy::Signature => Box::new(SignatureBisimulation),
            Strategy::Legacy => Box::new(LegacyBisimulation),
            Strategy::Robust => Box::new(RobustBisimulation::new(PairTest::Successor)),
            Strategy::RobustCoupling => Box::new(RobustBisimulation::new(PairTest::Coupling)),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Strategy {
    type Err = BisimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|it| it.key() == s || it.aliases().contains(&s))
            .ok_or_else(|| BisimulationError::UnknownStrategy(s.to_string()))
    }
}
