//! Intake backend client module for gRPC communication

mod client;
mod traits;

pub use client::IntakeClient;
pub use traits::IntakeBackend;

#[cfg(test)]
pub use traits::MockIntakeBackend;
