//! Chained lexical scopes used during binding.

use std::collections::HashMap;

use crate::symbols::VariableSymbol;

/// One lexical scope level: name to variable mapping plus a parent link.
///
/// Names are unique within a scope; an inner scope may shadow an outer
/// name. Lookup walks the chain to the root.
#[derive(Debug, Default)]
pub struct BoundScope {
    parent: Option<Box<BoundScope>>,
    variables: HashMap<String, VariableSymbol>,
    // Declaration order, for deterministic reporting of declared variables.
    declaration_order: Vec<String>,
}

impl BoundScope {
    /// Creates a scope with an optional parent.
    pub fn new(parent: Option<Box<BoundScope>>) -> Self {
        Self {
            parent,
            variables: HashMap::new(),
            declaration_order: Vec::new(),
        }
    }

    /// Declares a variable in this scope.
    ///
    /// Returns `false` when the name is already declared here; the existing
    /// declaration is kept.
    pub fn try_declare(&mut self, variable: VariableSymbol) -> bool {
        if self.variables.contains_key(variable.name()) {
            return false;
        }

        self.declaration_order.push(variable.name().to_string());
        self.variables.insert(variable.name().to_string(), variable);
        true
    }

    /// Resolves a name, walking from this scope to the root.
    pub fn lookup(&self, name: &str) -> Option<&VariableSymbol> {
        match self.variables.get(name) {
            Some(variable) => Some(variable),
            None => self.parent.as_ref().and_then(|parent| parent.lookup(name)),
        }
    }

    /// Returns the variables declared in this scope, in declaration order.
    pub fn declared_variables(&self) -> Vec<VariableSymbol> {
        self.declaration_order
            .iter()
            .filter_map(|name| self.variables.get(name))
            .cloned()
            .collect()
    }

    /// Detaches and returns the parent scope, if any.
    pub fn take_parent(&mut self) -> Option<Box<BoundScope>> {
        self.parent.take()
    }
}
