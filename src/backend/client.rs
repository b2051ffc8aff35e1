//! gRPC client for the intake backend service

use crate::state::{CreatedUser, NewUser, PatientIntake};
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::traits::IntakeBackend;

// Include the generated proto types
pub mod proto {
    tonic::include_proto!("intake");
}

use proto::intake_service_client::IntakeServiceClient;

/// Default backend address
const DEFAULT_ADDRESS: &str = "http://127.0.0.1:50061";

/// Client for communicating with the intake backend
pub struct IntakeClient {
    /// The gRPC client
    client: Option<IntakeServiceClient<tonic::transport::Channel>>,
    /// The backend address
    address: String,
}

impl IntakeClient {
    /// Create a new client. Connection failures are tolerated here; calls
    /// reconnect lazily.
    pub async fn new(address: Option<String>) -> Result<Self> {
        let address = address
            .or_else(|| std::env::var("INTAKE_BACKEND_ADDRESS").ok())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        let client = match IntakeServiceClient::connect(address.clone()).await {
            Ok(client) => Some(client),
            Err(_) => None,
        };

        Ok(Self { client, address })
    }

    /// Ensure connection is established
    async fn ensure_connected(
        &mut self,
    ) -> Result<&mut IntakeServiceClient<tonic::transport::Channel>> {
        if self.client.is_none() {
            self.client = Some(
                IntakeServiceClient::connect(self.address.clone())
                    .await
                    .map_err(|e| anyhow!("Failed to connect to backend: {}", e))?,
            );
        }
        self.client
            .as_mut()
            .ok_or_else(|| anyhow!("Client not connected"))
    }
}

#[async_trait]
impl IntakeBackend for IntakeClient {
    async fn check_connection(&self) -> bool {
        self.client.is_some()
    }

    async fn create_user(&mut self, user: NewUser) -> Result<CreatedUser> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::CreateUserRequest {
            name: user.name,
            email: user.email,
            phone: user.phone,
        });

        let response = client
            .create_user(request)
            .await
            .map_err(|e| anyhow!("Failed to create user: {}", e))?;

        let inner = response.into_inner();
        if !inner.success {
            return Err(anyhow!("Failed to create user: {}", inner.error));
        }

        Ok(CreatedUser { id: inner.id })
    }

    async fn register_patient(&mut self, intake: PatientIntake) -> Result<String> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::RegisterPatientRequest {
            user_id: intake.user_id,
            name: intake.name,
            email: intake.email,
            phone: intake.phone,
            birth_date: intake.birth_date,
            gender: intake.gender,
            address: intake.address,
            occupation: intake.occupation,
            emergency_contact_name: intake.emergency_contact_name,
            emergency_contact_phone: intake.emergency_contact_phone,
            primary_physician: intake.primary_physician,
            insurance_provider: intake.insurance_provider,
            insurance_policy_number: intake.insurance_policy_number,
            allergies: intake.allergies,
            current_medication: intake.current_medication,
            family_medical_history: intake.family_medical_history,
            past_medical_history: intake.past_medical_history,
            identification_type: intake.identification_type,
            identification_number: intake.identification_number,
            identification_document: intake.identification_document,
            treatment_consent: intake.treatment_consent,
            disclosure_consent: intake.disclosure_consent,
            privacy_consent: intake.privacy_consent,
        });

        let response = client
            .register_patient(request)
            .await
            .map_err(|e| anyhow!("Failed to register patient: {}", e))?;

        let inner = response.into_inner();
        if !inner.success {
            return Err(anyhow!("Failed to register patient: {}", inner.error));
        }

        Ok(inner.id)
    }
}
