use crate::domain::model::{Operation, ResourceKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Admin credential is missing")]
    Unauthorized,

    #[error("{operation} on {resource} failed: {reason}")]
    RequestFailed {
        resource: ResourceKind,
        operation: Operation,
        reason: String,
    },

    #[error("No {resource} entry with id '{id}'")]
    NotFound { resource: ResourceKind, id: String },

    #[error("Operation cancelled by operator")]
    UserCancelled,

    #[error("Another mutation is still in flight")]
    MutationInFlight,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 靜默處理，不需要通知
    Low,
    /// 可在本地恢復的請求失敗
    Medium,
    /// 需要操作員處理（例如登入）
    High,
    /// 配置或系統錯誤
    Critical,
}

impl ConsoleError {
    pub fn request_failed(
        resource: ResourceKind,
        operation: Operation,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::RequestFailed {
            resource,
            operation,
            reason: reason.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// 通知管道顯示給操作員的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Unauthorized => "Admin login required".to_string(),
            Self::RequestFailed {
                resource,
                operation,
                ..
            } => match (resource, operation) {
                (ResourceKind::Contacts, Operation::List) => "Failed to load contacts".to_string(),
                (ResourceKind::Contacts, Operation::UpdateStatus) => {
                    "Failed to update status".to_string()
                }
                (ResourceKind::Contacts, Operation::Delete) => {
                    "Failed to delete message".to_string()
                }
                (ResourceKind::Inventory, Operation::List) => {
                    "Failed to load inventory".to_string()
                }
                (resource, operation) => format!("Failed to {} {}", operation, resource),
            },
            Self::NotFound {
                resource: ResourceKind::Contacts,
                ..
            } => "Message not found".to_string(),
            Self::NotFound { resource, .. } => format!("No such {} entry", resource),
            Self::UserCancelled => "Cancelled".to_string(),
            Self::MutationInFlight => "Please wait for the current action to finish".to_string(),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::ConfigError { message } => format!("Invalid configuration: {}", message),
            Self::MissingConfigError { field } => format!("Missing configuration: {}", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Log in again or pass --token / set ADMIN_TOKEN",
            Self::RequestFailed { .. } => "Check that the API server is reachable and retry",
            Self::NotFound { .. } => "List the entries again and check the id",
            Self::UserCancelled | Self::MutationInFlight => "No action needed",
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration file and retry",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UserCancelled | Self::MutationInFlight => ErrorSeverity::Low,
            Self::RequestFailed { .. } | Self::NotFound { .. } => ErrorSeverity::Medium,
            Self::Unauthorized => ErrorSeverity::High,
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 不需要通知操作員的結果（取消、排隊中被拒絕）
    pub fn is_silent(&self) -> bool {
        self.severity() == ErrorSeverity::Low
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
