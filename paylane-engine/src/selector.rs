//! Strategy selection.
//!
//! A new provider integrates by implementing `PaymentStrategy` and
//! registering here; nothing else in the engine changes.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use paylane_types::{EngineError, PaymentMethod, PaymentStrategy};

/// Registry resolving a payment method to its provider strategy.
pub struct StrategySelector {
    strategies: HashMap<PaymentMethod, Arc<dyn PaymentStrategy>>,
}

impl StrategySelector {
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registers a strategy under the method it reports.
    ///
    /// Registering a second strategy for the same method replaces the
    /// first.
    pub fn register(&mut self, strategy: Arc<dyn PaymentStrategy>) {
        let method = strategy.method();
        info!("Registered payment strategy: {}", method);
        self.strategies.insert(method, strategy);
    }

    /// Resolves the strategy serving a method.
    pub fn get(&self, method: PaymentMethod) -> Result<Arc<dyn PaymentStrategy>, EngineError> {
        self.strategies
            .get(&method)
            .cloned()
            .ok_or(EngineError::UnsupportedMethod(method))
    }

    /// Methods with a registered strategy.
    pub fn methods(&self) -> Vec<PaymentMethod> {
        self.strategies.keys().copied().collect()
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paylane_providers::CashStrategy;

    #[test]
    fn test_resolves_registered_method() {
        let mut selector = StrategySelector::new();
        selector.register(Arc::new(CashStrategy));

        let strategy = selector.get(PaymentMethod::Cash).unwrap();

        assert_eq!(strategy.method(), PaymentMethod::Cash);
    }

    #[test]
    fn test_unregistered_method_is_unsupported() {
        let selector = StrategySelector::new();

        let result = selector.get(PaymentMethod::Stripe);

        assert!(matches!(
            result,
            Err(EngineError::UnsupportedMethod(PaymentMethod::Stripe))
        ));
    }
}
