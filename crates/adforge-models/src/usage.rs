//! API usage records for cost tracking and analytics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One billable vendor call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUsageRecord {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Vendor name, e.g. "runway" or "elevenlabs"
    pub service: String,
    /// Operation type, e.g. "video_generation"
    pub operation: String,
    /// Units consumed: seconds of video, characters of speech
    pub units_consumed: f64,
    pub cost_usd: f64,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Month-to-date usage rollup returned by the usage endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageSummary {
    pub total_cost: f64,
    pub usage: Vec<ApiUsageRecord>,
}

impl UsageSummary {
    pub fn from_records(usage: Vec<ApiUsageRecord>) -> Self {
        let total_cost = usage.iter().map(|u| u.cost_usd).sum();
        Self { total_cost, usage }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_totals_costs() {
        let rec = |cost| ApiUsageRecord {
            user_id: "user-1".to_string(),
            project_id: None,
            service: "runway".to_string(),
            operation: "video_generation".to_string(),
            units_consumed: 10.0,
            cost_usd: cost,
            metadata: serde_json::Value::Null,
            created_at: None,
        };
        let summary = UsageSummary::from_records(vec![rec(0.25), rec(0.75)]);
        assert!((summary.total_cost - 1.0).abs() < f64::EPSILON);
        assert_eq!(summary.usage.len(), 2);
    }
}
