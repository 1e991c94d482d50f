//! Supabase PostgREST persistence layer.
//!
//! Typed repositories over the Supabase `rest/v1` table API:
//! - [`ProjectRepository`] — saved ad projects, scoped per user
//! - [`SubscriptionRepository`] — quota lookups and usage increments
//! - [`UsageRepository`] — vendor-call cost records and monthly rollups
//!
//! The store is optional end to end: without credentials the API serves
//! requests with no persistence, and the write paths that run after a
//! successful generation log failures instead of surfacing them.

pub mod client;
pub mod error;
pub mod metrics;
pub mod projects;
pub mod subscriptions;
pub mod usage;

pub use client::{StoreConfig, SupabaseClient};
pub use error::{StoreError, StoreResult};
pub use projects::ProjectRepository;
pub use subscriptions::SubscriptionRepository;
pub use usage::UsageRepository;
