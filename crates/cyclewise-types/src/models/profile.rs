//! User profile and subscription state

use serde::{Deserialize, Serialize};

/// Subscription state driving premium entitlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Free,
    Active,
    Canceled,
    PastDue,
}

/// Per-user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: String,
    /// Typical cycle length in days
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u8,
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
}

fn default_cycle_length() -> u8 {
    28
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            display_name: "Demo User".to_string(),
            cycle_length: default_cycle_length(),
            subscription_status: SubscriptionStatus::Free,
        }
    }
}

impl Profile {
    /// Premium insights are unlocked only for an active subscription
    pub fn is_premium(&self) -> bool {
        self.subscription_status == SubscriptionStatus::Active
    }
}
