//! API usage tracking and month-to-date rollups.

use chrono::{Datelike, TimeZone, Utc};
use tracing::warn;

use adforge_models::{ApiUsageRecord, UsageSummary};

use crate::client::SupabaseClient;
use crate::error::StoreResult;

const TABLE: &str = "api_usage";

/// Repository for billable vendor-call records.
pub struct UsageRepository {
    client: SupabaseClient,
}

impl UsageRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Record one billable vendor call.
    ///
    /// Errors are logged, never surfaced: cost bookkeeping must not fail
    /// the request it is accounting for.
    pub async fn track(&self, record: &ApiUsageRecord) {
        if let Err(err) = self.client.insert_only(TABLE, record).await {
            warn!(
                error = %err,
                service = %record.service,
                operation = %record.operation,
                "failed to record api usage"
            );
        }
    }

    /// Month-to-date usage and total cost for a user.
    pub async fn monthly_usage(&self, user_id: &str) -> StoreResult<UsageSummary> {
        let month_start = month_start_rfc3339();
        let records: Vec<ApiUsageRecord> = self
            .client
            .select(
                TABLE,
                &format!(
                    "select=*&user_id=eq.{user_id}&created_at=gte.{month_start}&order=created_at.desc"
                ),
            )
            .await?;
        Ok(UsageSummary::from_records(records))
    }
}

/// Midnight UTC on the first of the current month.
fn month_start_rfc3339() -> String {
    let now = Utc::now();
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
        .to_rfc3339()
}
