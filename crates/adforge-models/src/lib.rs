//! Shared data models for the AdForge backend.
//!
//! This crate provides Serde-serializable types for:
//! - Ad briefs and storyboard scenes (boundary-validated)
//! - In-flight generation task state
//! - Durable project, subscription, and usage records

pub mod brief;
pub mod project;
pub mod scene;
pub mod subscription;
pub mod task;
pub mod usage;

// Re-export common types
pub use brief::{AdBrief, AdStyle, Archetype};
pub use project::{Project, ProjectId, ProjectUpdate};
pub use scene::Scene;
pub use subscription::{Subscription, SubscriptionStatus};
pub use task::{GenerationTask, Provider, TaskStatus};
pub use usage::{ApiUsageRecord, UsageSummary};
