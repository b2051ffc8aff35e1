//! Trait abstraction for the intake backend to enable mocking in tests

use crate::state::{CreatedUser, NewUser, PatientIntake};
use anyhow::Result;
use async_trait::async_trait;

/// Operations the intake backend offers. The app only depends on this
/// trait; the gRPC client is one implementation, the test mock another.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntakeBackend: Send + Sync {
    /// Check if the backend is reachable
    async fn check_connection(&self) -> bool;

    /// Create a minimal user record; a successful result must expose a
    /// stable user id
    async fn create_user(&mut self, user: NewUser) -> Result<CreatedUser>;

    /// Submit the full intake form for an existing user
    async fn register_patient(&mut self, intake: PatientIntake) -> Result<String>;
}
