//! Project repository.
//!
//! Every query is scoped to the owning user; a project id alone is never
//! enough to read or mutate a row.

use chrono::Utc;
use tracing::info;

use adforge_models::{Project, ProjectId, ProjectUpdate};

use crate::client::SupabaseClient;
use crate::error::{StoreError, StoreResult};

const TABLE: &str = "projects";

/// Repository for saved ad projects.
pub struct ProjectRepository {
    client: SupabaseClient,
}

impl ProjectRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn scoped(user_id: &str, id: ProjectId) -> String {
        format!("id=eq.{id}&user_id=eq.{user_id}")
    }

    /// Persist a new project, returning the stored row.
    pub async fn create(&self, project: &Project) -> StoreResult<Project> {
        let stored: Project = self.client.insert(TABLE, project).await?;
        info!(project_id = %stored.id, user_id = %stored.user_id, "created project");
        Ok(stored)
    }

    /// All projects for a user, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Project>> {
        self.client
            .select(
                TABLE,
                &format!("select=*&user_id=eq.{user_id}&order=created_at.desc"),
            )
            .await
    }

    /// One project, scoped to its owner.
    pub async fn get(&self, user_id: &str, id: ProjectId) -> StoreResult<Project> {
        let mut rows: Vec<Project> = self
            .client
            .select(TABLE, &format!("select=*&{}", Self::scoped(user_id, id)))
            .await?;
        rows.pop()
            .ok_or_else(|| StoreError::not_found(format!("project {id}")))
    }

    /// Patch a project's mutable fields; bumps `updated_at`.
    pub async fn update(
        &self,
        user_id: &str,
        id: ProjectId,
        patch: &ProjectUpdate,
    ) -> StoreResult<Project> {
        let mut body = serde_json::to_value(patch)?;
        if let Some(map) = body.as_object_mut() {
            map.insert(
                "updated_at".to_string(),
                serde_json::to_value(Utc::now())?,
            );
        }

        let mut rows: Vec<Project> = self
            .client
            .update(TABLE, &Self::scoped(user_id, id), &body)
            .await?;
        rows.pop()
            .ok_or_else(|| StoreError::not_found(format!("project {id}")))
    }

    /// Delete a project, scoped to its owner.
    pub async fn delete(&self, user_id: &str, id: ProjectId) -> StoreResult<()> {
        let removed = self.client.delete(TABLE, &Self::scoped(user_id, id)).await?;
        if removed == 0 {
            return Err(StoreError::not_found(format!("project {id}")));
        }
        info!(project_id = %id, user_id = %user_id, "deleted project");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_scope_query_binds_both_keys() {
        let id = Uuid::nil();
        let q = ProjectRepository::scoped("user-1", id);
        assert!(q.contains(&format!("id=eq.{id}")));
        assert!(q.contains("user_id=eq.user-1"));
    }
}
