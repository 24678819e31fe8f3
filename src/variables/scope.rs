//! Variable scope merging.
//!
//! Four scopes contribute variables to a request, lowest priority first:
//! workspace, environment, collection, request. Later scopes override earlier
//! ones on key collision. The result is a flat key → raw value map that the
//! interpolator reads from.

use crate::models::Variable;
use std::collections::{HashMap, HashSet};

/// The four variable scopes, in override order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariableScope {
    Workspace,
    Environment,
    Collection,
    Request,
}

impl VariableScope {
    /// All scopes in the order they are applied.
    pub const ORDER: [VariableScope; 4] = [
        VariableScope::Workspace,
        VariableScope::Environment,
        VariableScope::Collection,
        VariableScope::Request,
    ];

    fn index(self) -> usize {
        match self {
            VariableScope::Workspace => 0,
            VariableScope::Environment => 1,
            VariableScope::Collection => 2,
            VariableScope::Request => 3,
        }
    }
}

/// Reduces a scope's variable list to a lookup map.
///
/// Disabled variables are dropped entirely. When a key appears more than once
/// the last enabled entry in list order wins.
pub fn reduce_enabled(variables: &[Variable]) -> HashMap<String, String> {
    variables
        .iter()
        .filter(|v| v.enabled)
        .map(|v| (v.key.clone(), v.value.clone()))
        .collect()
}

/// Merges the four scope maps into one lookup table.
///
/// Each layer overwrites matching keys of the layers before it, so the result
/// is the same whatever order the individual maps iterate in.
pub fn merge(
    workspace: &HashMap<String, String>,
    environment: &HashMap<String, String>,
    collection: &HashMap<String, String>,
    request: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged =
        HashMap::with_capacity(workspace.len() + environment.len() + collection.len() + request.len());

    for layer in [workspace, environment, collection, request] {
        for (key, value) in layer {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}

/// Builder over the four scope maps. Scopes that are never set are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeSet {
    scopes: [HashMap<String, String>; 4],
}

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a scope set from the raw variable lists of each scope.
    pub fn from_variables(
        workspace: &[Variable],
        environment: &[Variable],
        collection: &[Variable],
        request: &[Variable],
    ) -> Self {
        Self::new()
            .with_scope(VariableScope::Workspace, reduce_enabled(workspace))
            .with_scope(VariableScope::Environment, reduce_enabled(environment))
            .with_scope(VariableScope::Collection, reduce_enabled(collection))
            .with_scope(VariableScope::Request, reduce_enabled(request))
    }

    /// Replaces one scope's map.
    pub fn with_scope(mut self, scope: VariableScope, values: HashMap<String, String>) -> Self {
        self.scopes[scope.index()] = values;
        self
    }

    pub fn scope(&self, scope: VariableScope) -> &HashMap<String, String> {
        &self.scopes[scope.index()]
    }

    /// Sets a single key in one scope.
    pub fn insert(&mut self, scope: VariableScope, key: impl Into<String>, value: impl Into<String>) {
        self.scopes[scope.index()].insert(key.into(), value.into());
    }

    /// Removes a key from one scope, returning its value.
    pub fn remove(&mut self, scope: VariableScope, key: &str) -> Option<String> {
        self.scopes[scope.index()].remove(key)
    }

    /// The merged lookup table.
    pub fn merged(&self) -> HashMap<String, String> {
        let [workspace, environment, collection, request] = &self.scopes;
        merge(workspace, environment, collection, request)
    }

    /// Every key defined in any scope.
    pub fn available_names(&self) -> HashSet<String> {
        self.scopes
            .iter()
            .flat_map(|scope| scope.keys().cloned())
            .collect()
    }

    /// The scope a key resolves from, if any.
    pub fn source_of(&self, key: &str) -> Option<VariableScope> {
        VariableScope::ORDER
            .iter()
            .rev()
            .copied()
            .find(|scope| self.scope(*scope).contains_key(key))
    }
}
