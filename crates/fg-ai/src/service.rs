use crate::error::ServiceError;
use async_trait::async_trait;

/// A provider that turns a prompt plus a system instruction into text.
///
/// Exactly one request per call: implementations must not retry or
/// stream. `Ok(None)` means the provider answered with no text.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Whether a credential is available. Checked before any request is
    /// attempted.
    fn is_configured(&self) -> bool;

    async fn complete(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<Option<String>, ServiceError>;
}

#[async_trait]
impl<S: GenerativeService + ?Sized> GenerativeService for Box<S> {
    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }

    async fn complete(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<Option<String>, ServiceError> {
        (**self).complete(prompt, system_instruction).await
    }
}
