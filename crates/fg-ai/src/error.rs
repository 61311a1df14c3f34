use thiserror::Error;

/// Failures of a single call to the generative service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed service response: {0}")]
    Decode(String),

    #[error("no credential configured for the generative service")]
    Unauthenticated,
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

/// Errors that can occur while generating a diagram from a prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("API key is missing. Please check your environment configuration.")]
    MissingCredential,

    #[error("could not connect to the generative service: {0}")]
    Connection(#[source] ServiceError),

    #[error("no diagram could be generated: {0}")]
    NoDiagram(String),
}

impl GenerateError {
    /// Configuration errors disable generation until the environment is
    /// fixed; everything else only aborts the current request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GenerateError::MissingCredential)
    }
}

impl From<ServiceError> for GenerateError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthenticated => GenerateError::MissingCredential,
            other => GenerateError::Connection(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_credential_is_fatal() {
        assert!(GenerateError::MissingCredential.is_fatal());
        assert!(!GenerateError::NoDiagram("empty".into()).is_fatal());
        let offline = GenerateError::Connection(ServiceError::Transport("dns".into()));
        assert!(!offline.is_fatal());
    }

    #[test]
    fn unauthenticated_maps_to_missing_credential() {
        assert_eq!(
            GenerateError::from(ServiceError::Unauthenticated),
            GenerateError::MissingCredential
        );
        let unavailable = ServiceError::Status {
            status: 503,
            body: String::new(),
        };
        assert!(matches!(
            GenerateError::from(unavailable),
            GenerateError::Connection(_)
        ));
    }
}
