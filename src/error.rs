//! # Error Types
//!
//! Error taxonomy shared by the orchestration core, the storage collaborator
//! and the web layer.
//!
//! Every failure belongs to one of three classes, which the transport layer
//! maps onto a response status:
//!
//! - **NotFound** - a referenced id does not resolve in storage
//! - **BadRequest** - invariant violations, parameter validation failures,
//!   repeated deployments and unreachable Activity Providers
//! - **Internal** - storage, configuration or programming faults

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Kind of persisted entity, used to build `NotFound` messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    ActivityProvider,
    Activity,
    Goal,
    Iap,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::ActivityProvider => "Activity Provider",
            EntityKind::Activity => "Activity",
            EntityKind::Goal => "Goal",
            EntityKind::Iap => "Inventive Activity Plan",
        };
        f.write_str(label)
    }
}

/// Coarse classification used by callers that only care about the HTTP-ish
/// semantics of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    BadRequest,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InveniraError {
    #[error("{entity} with id {id} not found.")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("{0}")]
    Validation(String),

    #[error("IAP with id {0} is already deployed")]
    AlreadyDeployed(Uuid),

    #[error("Unable to contact Activity Provider: {0}")]
    ProviderUnreachable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl InveniraError {
    pub fn not_found(entity: EntityKind, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn provider_unreachable(reason: impl fmt::Display) -> Self {
        Self::ProviderUnreachable(reason.to_string())
    }

    pub fn error_class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::Validation(_) | Self::AlreadyDeployed(_) | Self::ProviderUnreachable(_) => {
                ErrorClass::BadRequest
            }
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => ErrorClass::Internal,
        }
    }

    /// Client errors are caused by the request (or by the provider the
    /// request points at) rather than by this service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self.error_class(), ErrorClass::Internal)
    }
}

impl From<serde_json::Error> for InveniraError {
    fn from(error: serde_json::Error) -> Self {
        InveniraError::Validation(format!("JSON serialization error: {error}"))
    }
}

pub type InveniraResult<T> = Result<T, InveniraError>;
