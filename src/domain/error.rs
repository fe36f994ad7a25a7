use thiserror::Error;

/// Result alias used by every model, decorator and registry operation
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by models, decorators and the model registry
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unbound access: decorator '{decorator}' has no wrapped model, cannot access '{attribute}'")]
    UnboundAccess {
        decorator: String,
        attribute: &'static str,
    },

    #[error("Already registered: a model with qualified name '{qualified_name}' is already in the registry")]
    AlreadyRegistered { qualified_name: String },

    #[error("Not found: model '{qualified_name}' is not in the registry")]
    NotFound { qualified_name: String },

    #[error("Invalid qualified name '{qualified_name}': {reason}")]
    InvalidQualifiedName {
        qualified_name: String,
        reason: String,
    },

    #[error("Resolution error for '{reference}': {message}")]
    Resolution { reference: String, message: String },

    #[error("Prediction error: {message}")]
    Prediction { message: String },

    #[error("Schema validation error: {message}")]
    SchemaValidation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ModelError {
    pub fn unbound(decorator: impl Into<String>, attribute: &'static str) -> Self {
        Self::UnboundAccess {
            decorator: decorator.into(),
            attribute,
        }
    }

    pub fn already_registered(qualified_name: impl Into<String>) -> Self {
        Self::AlreadyRegistered {
            qualified_name: qualified_name.into(),
        }
    }

    pub fn not_found(qualified_name: impl Into<String>) -> Self {
        Self::NotFound {
            qualified_name: qualified_name.into(),
        }
    }

    pub fn invalid_qualified_name(
        qualified_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidQualifiedName {
            qualified_name: qualified_name.into(),
            reason: reason.into(),
        }
    }

    pub fn resolution(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            reference: reference.into(),
            message: message.into(),
        }
    }

    pub fn prediction(message: impl Into<String>) -> Self {
        Self::Prediction {
            message: message.into(),
        }
    }

    pub fn schema_validation(message: impl Into<String>) -> Self {
        Self::SchemaValidation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
