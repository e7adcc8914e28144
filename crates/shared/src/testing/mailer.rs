use crate::{
    abstract_trait::{EmailRequest, EmailServiceTrait},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keeps every email instead of sending it.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailRequest>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<EmailRequest> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailServiceTrait for RecordingMailer {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        self.sent.lock().await.push(req.clone());
        Ok(())
    }
}
