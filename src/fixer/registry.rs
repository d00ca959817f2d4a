//! Rule registry and ordering resolution
//!
//! The registry owns the full set of registered rules and resolves the order
//! they run in. Ordering inputs are, strongest first: declared `run_before`
//! constraints, rule priority (higher runs earlier), and the rule name as the
//! final tie-break. Resolution is a topological sort with a deterministic
//! ready-node selection, so a fixed rule set and configuration always produce
//! the same sequence, a property external caching layers depend on.
//!
//! Resolution happens once at engine construction, before any file is
//! processed; every failure here (duplicate names, enabled conflicting pairs,
//! cyclic constraints, unknown configured names) is startup-fatal.

use crate::fixer::error::RegistryError;
use crate::fixer::rules::{builtin_rules, Rule};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Ordered collection of registered rules.
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        RuleRegistry { rules: Vec::new() }
    }

    /// Create a registry holding the built-in ruleset.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for rule in builtin_rules() {
            registry
                .register_arc(rule)
                .expect("built-in rule names are unique");
        }
        registry
    }

    /// Register a rule, rejecting duplicate names.
    pub fn register(&mut self, rule: impl Rule + 'static) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(rule))
    }

    /// Register an already-shared rule, rejecting duplicate names.
    pub fn register_arc(&mut self, rule: Arc<dyn Rule>) -> Result<(), RegistryError> {
        if self.get(rule.name()).is_some() {
            return Err(RegistryError::DuplicateRule(rule.name().to_string()));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    /// All registered rules, in registration order.
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Resolve the total run order for the enabled subset.
    ///
    /// `enabled` of `None` enables every registered rule; otherwise each named
    /// rule must exist. Constraints that name a rule outside the enabled set
    /// are ignored: rules are written independently, and disabling one must
    /// not break the rest.
    pub fn resolve(
        &self,
        enabled: Option<&[String]>,
    ) -> Result<Vec<Arc<dyn Rule>>, RegistryError> {
        let enabled = self.enabled_subset(enabled)?;
        check_conflicts(&enabled)?;
        topological_order(enabled)
    }

    /// The enabled rules in registration order, independent of the order names
    /// appear in the configuration.
    fn enabled_subset(
        &self,
        enabled: Option<&[String]>,
    ) -> Result<Vec<Arc<dyn Rule>>, RegistryError> {
        match enabled {
            None => Ok(self.rules.clone()),
            Some(names) => {
                for name in names {
                    if self.get(name).is_none() {
                        return Err(RegistryError::UnknownRule(name.clone()));
                    }
                }
                let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
                Ok(self
                    .rules
                    .iter()
                    .filter(|rule| wanted.contains(rule.name()))
                    .cloned()
                    .collect())
            }
        }
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Reject a set where two enabled rules declare a conflict.
fn check_conflicts(enabled: &[Arc<dyn Rule>]) -> Result<(), RegistryError> {
    let names: HashSet<&str> = enabled.iter().map(|rule| rule.name()).collect();
    for rule in enabled {
        for other in rule.constraints().conflicts_with {
            if names.contains(other) {
                return Err(RegistryError::ConflictingRules {
                    first: rule.name().to_string(),
                    second: other.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Kahn's algorithm with a deterministic ready-node choice: among rules whose
/// predecessors are all placed, the highest priority wins, then the
/// lexicographically smallest name.
fn topological_order(enabled: Vec<Arc<dyn Rule>>) -> Result<Vec<Arc<dyn Rule>>, RegistryError> {
    let index_of: HashMap<&str, usize> = enabled
        .iter()
        .enumerate()
        .map(|(index, rule)| (rule.name(), index))
        .collect();

    // successors[i] holds the rules that must wait for rule i
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); enabled.len()];
    let mut indegree: Vec<usize> = vec![0; enabled.len()];
    for (index, rule) in enabled.iter().enumerate() {
        for after in rule.constraints().run_before {
            if let Some(&after_index) = index_of.get(after) {
                successors[index].push(after_index);
                indegree[after_index] += 1;
            }
        }
    }

    let mut ready: Vec<usize> = (0..enabled.len()).filter(|&i| indegree[i] == 0).collect();
    let mut order = Vec::with_capacity(enabled.len());

    while !ready.is_empty() {
        let next_position = ready
            .iter()
            .enumerate()
            .min_by_key(|&(_, &i)| (Reverse(enabled[i].priority()), enabled[i].name()))
            .map(|(position, _)| position)
            .expect("ready set is non-empty");
        let next = ready.swap_remove(next_position);
        order.push(next);

        for &successor in &successors[next] {
            indegree[successor] -= 1;
            if indegree[successor] == 0 {
                ready.push(successor);
            }
        }
    }

    if order.len() < enabled.len() {
        let mut involved: Vec<String> = indegree
            .iter()
            .enumerate()
            .filter(|&(_, &degree)| degree > 0)
            .map(|(i, _)| enabled[i].name().to_string())
            .collect();
        involved.sort_unstable();
        return Err(RegistryError::CyclicOrdering { involved });
    }

    Ok(order.into_iter().map(|i| enabled[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixer::error::RuleError;
    use crate::fixer::rules::{FileContext, RuleConstraints};
    use crate::fixer::stream::TokenStream;

    /// Inert rule with configurable ordering metadata.
    struct StubRule {
        name: &'static str,
        priority: i32,
        constraints: RuleConstraints,
    }

    impl StubRule {
        fn new(name: &'static str) -> Self {
            StubRule {
                name,
                priority: 0,
                constraints: RuleConstraints::none(),
            }
        }

        fn with_priority(mut self, priority: i32) -> Self {
            self.priority = priority;
            self
        }

        fn before(mut self, names: &[&'static str]) -> Self {
            self.constraints.run_before = names.to_vec();
            self
        }

        fn conflicting(mut self, names: &[&'static str]) -> Self {
            self.constraints.conflicts_with = names.to_vec();
            self
        }
    }

    impl Rule for StubRule {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            "stub"
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn constraints(&self) -> RuleConstraints {
            self.constraints.clone()
        }

        fn is_candidate(&self, _stream: &TokenStream) -> bool {
            false
        }

        fn apply(&self, _file: &FileContext, _stream: &mut TokenStream) -> Result<(), RuleError> {
            Ok(())
        }
    }

    fn names(rules: &[Arc<dyn Rule>]) -> Vec<&str> {
        rules.iter().map(|rule| rule.name()).collect()
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = RuleRegistry::new();
        registry.register(StubRule::new("a")).expect("first is fine");
        let err = registry.register(StubRule::new("a")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateRule("a".to_string()));
    }

    #[test]
    fn test_with_defaults_registers_builtins() {
        let registry = RuleRegistry::with_defaults();
        assert!(registry.get("doc_inline_tag").is_some());
        assert!(registry.get("trailing_whitespace").is_some());
    }

    #[test]
    fn test_resolve_orders_by_priority_then_name() {
        let mut registry = RuleRegistry::new();
        registry.register(StubRule::new("b")).expect("register");
        registry
            .register(StubRule::new("c").with_priority(5))
            .expect("register");
        registry.register(StubRule::new("a")).expect("register");

        let order = registry.resolve(None).expect("no constraints, no cycle");
        assert_eq!(names(&order), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_resolve_honors_run_before_over_priority() {
        // "low" must run before "high" even though "high" has greater priority
        let mut registry = RuleRegistry::new();
        registry
            .register(StubRule::new("high").with_priority(100))
            .expect("register");
        registry
            .register(StubRule::new("low").before(&["high"]))
            .expect("register");

        let order = registry.resolve(None).expect("constraint is satisfiable");
        assert_eq!(names(&order), vec!["low", "high"]);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let build = || {
            let mut registry = RuleRegistry::new();
            registry
                .register(StubRule::new("m").before(&["z"]))
                .expect("register");
            registry
                .register(StubRule::new("z").with_priority(-1))
                .expect("register");
            registry
                .register(StubRule::new("k").with_priority(3))
                .expect("register");
            registry.register(StubRule::new("q")).expect("register");
            registry
        };

        let reference: Vec<String> = build()
            .resolve(None)
            .expect("resolvable")
            .iter()
            .map(|rule| rule.name().to_string())
            .collect();
        for _ in 0..100 {
            let order: Vec<String> = build()
                .resolve(None)
                .expect("resolvable")
                .iter()
                .map(|rule| rule.name().to_string())
                .collect();
            assert_eq!(order, reference);
        }
    }

    #[test]
    fn test_resolve_detects_cycles() {
        let mut registry = RuleRegistry::new();
        registry
            .register(StubRule::new("a").before(&["b"]))
            .expect("register");
        registry
            .register(StubRule::new("b").before(&["a"]))
            .expect("register");

        let err = registry.resolve(None).unwrap_err();
        assert_eq!(
            err,
            RegistryError::CyclicOrdering {
                involved: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_resolve_detects_enabled_conflicts() {
        let mut registry = RuleRegistry::new();
        registry
            .register(StubRule::new("tabs").conflicting(&["spaces"]))
            .expect("register");
        registry.register(StubRule::new("spaces")).expect("register");

        let err = registry.resolve(None).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ConflictingRules {
                first: "tabs".to_string(),
                second: "spaces".to_string(),
            }
        );

        // Disabling one side of the conflict makes the set valid again
        let order = registry
            .resolve(Some(&["tabs".to_string()]))
            .expect("conflict is gone");
        assert_eq!(names(&order), vec!["tabs"]);
    }

    #[test]
    fn test_resolve_rejects_unknown_configured_rule() {
        let registry = RuleRegistry::with_defaults();
        let err = registry
            .resolve(Some(&["no_such_rule".to_string()]))
            .unwrap_err();
        assert_eq!(err, RegistryError::UnknownRule("no_such_rule".to_string()));
    }

    #[test]
    fn test_constraints_to_disabled_rules_are_ignored() {
        let mut registry = RuleRegistry::new();
        registry
            .register(StubRule::new("a").before(&["gone"]))
            .expect("register");

        let order = registry.resolve(None).expect("dangling constraint ignored");
        assert_eq!(names(&order), vec!["a"]);
    }

    #[test]
    fn test_enabled_subset_follows_registration_order() {
        let mut registry = RuleRegistry::new();
        registry.register(StubRule::new("x")).expect("register");
        registry.register(StubRule::new("y")).expect("register");

        let order = registry
            .resolve(Some(&["y".to_string(), "x".to_string()]))
            .expect("both exist");
        // Name tie-break, not configuration order, decides
        assert_eq!(names(&order), vec!["x", "y"]);
    }

    #[test]
    fn test_builtin_resolution_puts_inline_tag_first() {
        let registry = RuleRegistry::with_defaults();
        let order = registry.resolve(None).expect("builtins are consistent");
        assert_eq!(names(&order), vec!["doc_inline_tag", "trailing_whitespace"]);
    }
}
