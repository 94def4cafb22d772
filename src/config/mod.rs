//! Leave policy configuration.
//!
//! Entitlement defaults, the carry-forward cap, and escalation timing are
//! deployment policy, not code. They load from a small YAML file and fall
//! back to built-in defaults.
//!
//! # Example
//!
//! ```
//! use leave_engine::config::LeavePolicy;
//!
//! let policy = LeavePolicy::default();
//! assert_eq!(policy.escalation.pending_hours, 24);
//! ```

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{CarryForwardPolicy, EntitlementPolicy, EscalationPolicy, LeavePolicy};
