//! Subscription records for per-user quota enforcement.

use serde::{Deserialize, Serialize};

/// Subscription lifecycle status as stored by the billing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Canceled,
}

/// A user's subscription row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub user_id: String,
    pub status: SubscriptionStatus,
    /// Videos allowed per calendar month
    pub monthly_video_limit: u32,
    /// Videos generated so far this month
    #[serde(default)]
    pub current_month_usage: u32,
}

impl Subscription {
    /// Whether another video generation is within the plan limit.
    pub fn has_remaining_quota(&self) -> bool {
        self.status == SubscriptionStatus::Active
            && self.current_month_usage < self.monthly_video_limit
    }

    pub fn remaining(&self) -> u32 {
        self.monthly_video_limit
            .saturating_sub(self.current_month_usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(usage: u32, limit: u32) -> Subscription {
        Subscription {
            user_id: "user-1".to_string(),
            status: SubscriptionStatus::Active,
            monthly_video_limit: limit,
            current_month_usage: usage,
        }
    }

    #[test]
    fn test_quota_exhausted_at_limit() {
        assert!(sub(9, 10).has_remaining_quota());
        assert!(!sub(10, 10).has_remaining_quota());
        assert!(!sub(11, 10).has_remaining_quota());
    }

    #[test]
    fn test_inactive_subscription_has_no_quota() {
        let mut s = sub(0, 10);
        s.status = SubscriptionStatus::Canceled;
        assert!(!s.has_remaining_quota());
    }

    #[test]
    fn test_remaining_saturates() {
        assert_eq!(sub(12, 10).remaining(), 0);
        assert_eq!(sub(3, 10).remaining(), 7);
    }
}
