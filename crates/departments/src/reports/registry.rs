use std::collections::HashMap;
use std::sync::Arc;

use super::report_type::ReportType;
use super::sources::{BudgetLedger, EmployeeDirectory};
use super::strategies::{BudgetStrategy, HeadcountStrategy, PayrollStrategy};
use super::strategy::ReportStrategy;

/// Immutable map from report type to its strategy. Building it proves every
/// report type has exactly one strategy.
pub struct ReportRegistry {
    strategies: HashMap<ReportType, Arc<dyn ReportStrategy>>,
}

impl ReportRegistry {
    pub fn builder() -> ReportRegistryBuilder {
        ReportRegistryBuilder::default()
    }

    /// Registers the built-in strategies over the given sources.
    pub fn standard(
        employees: Arc<dyn EmployeeDirectory>,
        ledger: Arc<dyn BudgetLedger>,
    ) -> Result<Self, RegistryError> {
        Self::builder()
            .register(HeadcountStrategy::new(Arc::clone(&employees)))
            .register(PayrollStrategy::new(Arc::clone(&employees)))
            .register(BudgetStrategy::new(ledger, employees))
            .build()
    }

    pub fn strategy(&self, report_type: ReportType) -> Option<&Arc<dyn ReportStrategy>> {
        self.strategies.get(&report_type)
    }
}

#[derive(Default)]
pub struct ReportRegistryBuilder {
    strategies: Vec<Arc<dyn ReportStrategy>>,
}

impl ReportRegistryBuilder {
    pub fn register<T>(mut self, strategy: T) -> Self
    where
        T: ReportStrategy + 'static,
    {
        self.strategies.push(Arc::new(strategy));
        self
    }

    pub fn build(self) -> Result<ReportRegistry, RegistryError> {
        let mut strategies = HashMap::with_capacity(self.strategies.len());
        for strategy in self.strategies {
            let report_type = strategy.report_type();
            if strategies.insert(report_type, strategy).is_some() {
                return Err(RegistryError::DuplicateStrategy(report_type));
            }
        }

        if let Some(missing) = ReportType::values()
            .into_iter()
            .find(|report_type| !strategies.contains_key(report_type))
        {
            return Err(RegistryError::MissingStrategy(missing));
        }

        Ok(ReportRegistry { strategies })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no strategy registered for report type '{0}'")]
    MissingStrategy(ReportType),
    #[error("report type '{0}' registered more than once")]
    DuplicateStrategy(ReportType),
}
