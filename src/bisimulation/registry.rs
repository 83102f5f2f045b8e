use crate::BisimulationError;
use crate::bisimulation::{Bisimulation, Strategy};
use crate::chain::MarkovChain;
use std::collections::BTreeMap;

/// Creates a fresh instance of a minimisation method.
pub type MethodFactory<C> = Box<dyn Fn() -> Box<dyn Bisimulation<C>>>;

/// Maps string keys to minimisation methods.
///
/// The default registry knows every [`Strategy`] under its canonical key and its aliases.
/// Custom implementations of [`Bisimulation`] can be added with
/// [`StrategyRegistry::register`] and are then resolved like the built-in ones.
pub struct StrategyRegistry<C> {
    factories: BTreeMap<String, MethodFactory<C>>,
}

impl<C: MarkovChain + Clone + 'static> Default for StrategyRegistry<C> {
    fn default() -> Self {
        let mut registry = StrategyRegistry::empty();
        for strategy in Strategy::ALL {
            for key in std::iter::once(strategy.key()).chain(strategy.aliases().iter().copied()) {
                registry.register(key, move || strategy.method::<C>());
            }
        }
        registry
    }
}

impl<C: MarkovChain> StrategyRegistry<C> {
    /// A registry without any methods.
    pub fn empty() -> StrategyRegistry<C> {
        StrategyRegistry {
            factories: BTreeMap::new(),
        }
    }

    /// Register (or replace) the method available under `key`.
    pub fn register<F>(&mut self, key: &str, factory: F)
    where
        F: Fn() -> Box<dyn Bisimulation<C>> + 'static,
    {
        self.factories.insert(key.to_string(), Box::new(factory));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// All registered keys in alphabetical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(|key| key.as_str())
    }

    /// Instantiate the method registered under `key`. `None` selects the default
    /// [`Strategy`].
    pub fn resolve(&self, key: Option<&str>) -> Result<Box<dyn Bisimulation<C>>, BisimulationError> {
        let key = key.unwrap_or(Strategy::default().key());
        match self.factories.get(key) {
            Some(factory) => Ok(factory()),
            None => Err(BisimulationError::UnknownStrategy(key.to_string())),
        }
    }
}
