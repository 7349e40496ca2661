//! Variable store
//!
//! Maps identifiers to values for the lifetime of an engine. Listing order is
//! the order in which names were first assigned; reassignment updates the
//! value in place.

use crate::{CalcError, CalcResult};
use serde::Serialize;
use std::collections::HashMap;

/// A named value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    entries: Vec<Variable>,
    index: HashMap<String, usize>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, overwriting any previous binding
    ///
    /// Identifier validity is the caller's concern; the router validates
    /// before it writes.
    pub fn set(&mut self, name: &str, value: f64) {
        match self.index.get(name) {
            Some(&slot) => self.entries[slot].value = value,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(Variable {
                    name: name.to_string(),
                    value,
                });
            }
        }
    }

    pub fn get(&self, name: &str) -> CalcResult<f64> {
        self.index
            .get(name)
            .map(|&slot| self.entries[slot].value)
            .ok_or_else(|| CalcError::UndefinedVariable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All bindings in first-assignment order
    pub fn list(&self) -> &[Variable] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
