//! Subscription lookup and quota enforcement.

use tracing::warn;

use adforge_models::Subscription;

use crate::client::SupabaseClient;
use crate::error::{StoreError, StoreResult};

const TABLE: &str = "subscriptions";

/// Repository for subscription rows.
pub struct SubscriptionRepository {
    client: SupabaseClient,
}

impl SubscriptionRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// The user's active subscription, if any.
    pub async fn get_active(&self, user_id: &str) -> StoreResult<Option<Subscription>> {
        let mut rows: Vec<Subscription> = self
            .client
            .select(
                TABLE,
                &format!("select=*&user_id=eq.{user_id}&status=eq.active&limit=1"),
            )
            .await?;
        Ok(rows.pop())
    }

    /// Enforce the monthly video quota before starting a generation.
    ///
    /// A store fault here fails open: generation should not depend on the
    /// billing table being reachable.
    pub async fn check_video_allowed(&self, user_id: &str) -> StoreResult<()> {
        let subscription = match self.get_active(user_id).await {
            Ok(sub) => sub,
            Err(err) => {
                warn!(error = %err, user_id, "subscription lookup failed, allowing generation");
                return Ok(());
            }
        };

        match subscription {
            Some(sub) if sub.has_remaining_quota() => Ok(()),
            Some(sub) => Err(StoreError::QuotaExceeded(format!(
                "monthly video limit reached ({}/{})",
                sub.current_month_usage, sub.monthly_video_limit
            ))),
            None => Err(StoreError::QuotaExceeded(
                "no active subscription".to_string(),
            )),
        }
    }

    /// Count one generated video against the monthly quota.
    ///
    /// Errors are logged, never surfaced: a missed increment must not fail
    /// a generation that already succeeded.
    pub async fn increment_usage(&self, user_id: &str) {
        let result = async {
            let sub = self
                .get_active(user_id)
                .await?
                .ok_or_else(|| StoreError::not_found(format!("subscription for {user_id}")))?;

            let patch = serde_json::json!({
                "current_month_usage": sub.current_month_usage + 1,
            });
            let _: Vec<Subscription> = self
                .client
                .update(
                    TABLE,
                    &format!("user_id=eq.{user_id}&status=eq.active"),
                    &patch,
                )
                .await?;
            Ok::<_, StoreError>(())
        }
        .await;

        if let Err(err) = result {
            warn!(error = %err, user_id, "failed to increment monthly usage");
        }
    }
}
