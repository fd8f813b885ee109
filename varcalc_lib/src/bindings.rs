use std::collections::HashMap;

use crate::calc_error::CalcError;
use crate::tokens::VariableName;
use anyhow::Result;

/// Variable name to value table for one scope. The engine only ever borrows it; who owns
/// it and how long it lives is up to the caller.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Bindings {
    values: HashMap<VariableName, f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        let name: VariableName = name.parse().ok()?;
        self.values.get(&name).copied()
    }

    /// Looks up a variable, failing with an unknown-variable error if it is unbound.
    pub fn resolve(&self, name: &VariableName) -> Result<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| CalcError::UnknownVariable(name.to_string()).into())
    }

    /// Inserts or overwrites a binding.
    pub fn assign(&mut self, name: VariableName, value: f64) {
        self.values.insert(name, value);
    }

    /// Like `assign`, but validates a raw name first.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let name = name.parse()?;
        self.assign(name, value);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}
