//! Policy types for the leave engine.
//!
//! These are the strongly-typed structures deserialized from the YAML
//! policy file. Every field has a built-in default so a partial file (or
//! no file at all) yields a working policy.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::LeaveCategory;

fn default_casual() -> Decimal {
    Decimal::new(12, 0)
}

fn default_sick() -> Decimal {
    Decimal::new(12, 0)
}

fn default_special() -> Decimal {
    Decimal::new(5, 0)
}

fn default_casual_cap() -> Decimal {
    Decimal::new(5, 0)
}

fn default_pending_hours() -> i64 {
    24
}

/// Default yearly entitlement per leave category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntitlementPolicy {
    /// Casual days granted per year.
    #[serde(default = "default_casual")]
    pub casual: Decimal,
    /// Sick days granted per year.
    #[serde(default = "default_sick")]
    pub sick: Decimal,
    /// Special days granted per year.
    #[serde(default = "default_special")]
    pub special: Decimal,
}

impl EntitlementPolicy {
    /// Returns the default entitlement for the given category.
    pub fn for_category(&self, category: LeaveCategory) -> Decimal {
        match category {
            LeaveCategory::Casual => self.casual,
            LeaveCategory::Sick => self.sick,
            LeaveCategory::Special => self.special,
        }
    }
}

impl Default for EntitlementPolicy {
    fn default() -> Self {
        Self {
            casual: default_casual(),
            sick: default_sick(),
            special: default_special(),
        }
    }
}

/// Rules for the annual carry-forward batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarryForwardPolicy {
    /// Maximum casual days carried into the next year.
    #[serde(default = "default_casual_cap")]
    pub casual_cap: Decimal,
}

impl Default for CarryForwardPolicy {
    fn default() -> Self {
        Self {
            casual_cap: default_casual_cap(),
        }
    }
}

/// Escalation rules for stale pending requests.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EscalationPolicy {
    /// How long a request may sit pending before HR is alerted, in hours.
    #[serde(default = "default_pending_hours")]
    pub pending_hours: i64,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            pending_hours: default_pending_hours(),
        }
    }
}

/// The complete leave policy consumed by the engine.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LeavePolicy {
    /// Default yearly entitlements.
    #[serde(default)]
    pub entitlements: EntitlementPolicy,
    /// Carry-forward rules.
    #[serde(default)]
    pub carry_forward: CarryForwardPolicy,
    /// Escalation rules.
    #[serde(default)]
    pub escalation: EscalationPolicy,
}
