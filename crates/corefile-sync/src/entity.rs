//! Routing entities and rule derivation.

use std::collections::BTreeMap;
use std::fmt;

use corefile_blocks::Rule;
use corefile_meta::RulesConfig;
use serde::{Deserialize, Serialize};

/// Identifies the entity that triggered a reconcile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    pub namespace: String,
    pub name: String,
}

impl EntityKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A routing entity (an ingress) and the hosts it routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingEntity {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    /// Hosts in declaration order; empty entries are ignored
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl RoutingEntity {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            hosts: Vec::new(),
            annotations: BTreeMap::new(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.hosts.push(host.into());
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(&self.namespace, &self.name)
    }

    /// Whether the entity takes part in routing.
    ///
    /// Without a required annotation every entity is routed; otherwise the
    /// annotation key must be present, whatever its value.
    pub fn is_routed(&self, annotation: Option<&str>) -> bool {
        annotation.is_none_or(|key| self.annotations.contains_key(key))
    }
}

/// Derive rewrite rules from entities in discovery order.
///
/// Each non-empty host of each routed entity becomes one rule pointing at
/// the configured target. Duplicates are kept.
pub fn derive_rules(entities: &[RoutingEntity], config: &RulesConfig) -> Vec<Rule> {
    let annotation = config.annotation.as_deref();

    entities
        .iter()
        .filter(|entity| {
            let routed = entity.is_routed(annotation);
            if !routed {
                tracing::trace!(entity = %entity.key(), "Skipping entity without routing annotation");
            }
            routed
        })
        .flat_map(|entity| entity.hosts.iter())
        .map(|host| host.trim())
        .filter(|host| !host.is_empty())
        .map(|host| Rule::new(host, config.target.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(annotation: Option<&str>) -> RulesConfig {
        RulesConfig {
            annotation: annotation.map(str::to_string),
            target: "ingress.svc".into(),
            excluded_namespaces: Vec::new(),
        }
    }

    #[test]
    fn derives_rules_in_entity_then_host_order() {
        let entities = vec![
            RoutingEntity::new("a", "one").with_host("x.example.com").with_host("y.example.com"),
            RoutingEntity::new("b", "two").with_host("z.example.com"),
        ];
        let rules = derive_rules(&entities, &config(None));
        assert_eq!(
            rules,
            vec![
                Rule::new("x.example.com", "ingress.svc"),
                Rule::new("y.example.com", "ingress.svc"),
                Rule::new("z.example.com", "ingress.svc"),
            ]
        );
    }

    #[test]
    fn annotation_filter_requires_key_only() {
        let entities = vec![
            RoutingEntity::new("a", "plain").with_host("plain.example.com"),
            RoutingEntity::new("a", "marked")
                .with_host("marked.example.com")
                .with_annotation("corefile-sync/managed", ""),
        ];
        let rules = derive_rules(&entities, &config(Some("corefile-sync/managed")));
        assert_eq!(rules, vec![Rule::new("marked.example.com", "ingress.svc")]);
    }

    #[test]
    fn empty_hosts_are_ignored() {
        let entities = vec![RoutingEntity::new("a", "one").with_host("").with_host("  ")];
        assert!(derive_rules(&entities, &config(None)).is_empty());
    }

    #[test]
    fn duplicate_hosts_are_kept() {
        let entities = vec![
            RoutingEntity::new("a", "one").with_host("dup.example.com"),
            RoutingEntity::new("b", "two").with_host("dup.example.com"),
        ];
        assert_eq!(derive_rules(&entities, &config(None)).len(), 2);
    }

    #[test]
    fn entity_key_display() {
        assert_eq!(EntityKey::new("web", "shop").to_string(), "web/shop");
    }
}
