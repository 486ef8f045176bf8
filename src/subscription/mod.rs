//! Subscription plans and client registry.
//!
//! The registry tracks which usernames have paid for a plan. Plans are
//! immutable reference data injected at construction; the two standard
//! plans ship as the default table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Plan
// ============================================================================

/// An immutable subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan identifier
    pub id: u32,
    /// Plan name
    pub name: String,
    /// Price in the smallest currency unit
    pub price: u32,
    /// Short description (billing period)
    pub description: String,
}

impl Plan {
    /// Creates a new plan.
    pub fn new(id: u32, name: impl Into<String>, price: u32, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
        }
    }
}

/// The two standard plans offered out of the box.
pub fn default_plans() -> Vec<Plan> {
    vec![
        Plan::new(1, "Basic plan", 10_000, "1 month"),
        Plan::new(2, "Annual plan", 30_000, "12 months"),
    ]
}

// ============================================================================
// SubscriptionError
// ============================================================================

/// Errors reported by the subscription registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The username has already paid for a plan.
    #[error("'{0}' is already registered")]
    AlreadyRegistered(String),
}

// ============================================================================
// SubscriptionRegistry
// ============================================================================

/// Tracks paying clients against the plan table.
///
/// Registration is a service call, not ownership: the registry knows
/// usernames, not client objects.
#[derive(Debug, Clone)]
pub struct SubscriptionRegistry {
    plans: Vec<Plan>,
    clients: Vec<String>,
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new(default_plans())
    }
}

impl SubscriptionRegistry {
    /// Creates a registry over the given plan table.
    pub fn new(plans: Vec<Plan>) -> Self {
        Self {
            plans,
            clients: Vec::new(),
        }
    }

    /// The available plans.
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Registers a paying client.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if the username has paid before.
    pub fn register_client(&mut self, username: &str) -> Result<(), SubscriptionError> {
        if self.clients.iter().any(|c| c == username) {
            return Err(SubscriptionError::AlreadyRegistered(username.to_string()));
        }
        tracing::debug!(username, "registering subscription client");
        self.clients.push(username.to_string());
        Ok(())
    }

    /// Usernames registered so far, in registration order.
    pub fn clients(&self) -> &[String] {
        &self.clients
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod plan_tests {
        use super::*;

        #[test]
        fn test_default_plans() {
            let plans = default_plans();
            assert_eq!(plans.len(), 2);
            assert_eq!(plans[0].name, "Basic plan");
            assert_eq!(plans[0].price, 10_000);
            assert_eq!(plans[1].name, "Annual plan");
            assert_eq!(plans[1].price, 30_000);
        }

        #[test]
        fn test_serialize_deserialize() {
            let plan = Plan::new(7, "Custom", 500, "1 week");
            let json = serde_json::to_string(&plan).unwrap();
            let back: Plan = serde_json::from_str(&json).unwrap();
            assert_eq!(plan, back);
        }
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_default_registry_has_standard_plans() {
            let registry = SubscriptionRegistry::default();
            assert_eq!(registry.plans().len(), 2);
            assert!(registry.clients().is_empty());
        }

        #[test]
        fn test_register_client() {
            let mut registry = SubscriptionRegistry::default();
            assert!(registry.register_client("ana").is_ok());
            assert_eq!(registry.clients(), ["ana".to_string()]);
        }

        #[test]
        fn test_register_same_username_twice_fails() {
            let mut registry = SubscriptionRegistry::default();
            registry.register_client("ana").unwrap();

            let err = registry.register_client("ana").unwrap_err();
            assert_eq!(err, SubscriptionError::AlreadyRegistered("ana".into()));
            assert_eq!(registry.clients().len(), 1);
        }

        #[test]
        fn test_register_distinct_usernames() {
            let mut registry = SubscriptionRegistry::default();
            registry.register_client("ana").unwrap();
            registry.register_client("javier").unwrap();
            assert_eq!(registry.clients().len(), 2);
        }

        #[test]
        fn test_injected_plan_table() {
            let registry = SubscriptionRegistry::new(vec![Plan::new(9, "Trial", 0, "7 days")]);
            assert_eq!(registry.plans().len(), 1);
            assert_eq!(registry.plans()[0].name, "Trial");
        }
    }
}
