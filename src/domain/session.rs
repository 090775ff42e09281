use crate::utils::error::{ConsoleError, Result};
use std::fmt;

/// Bearer token，Debug 輸出時會遮蔽
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// 整個工作階段共用、唯讀的登入狀態，在建構時設定一次
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    credential: Option<Credential>,
}

impl SessionContext {
    pub fn new(token: Option<String>) -> Self {
        Self {
            credential: token.and_then(Credential::new),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authorized(&self) -> bool {
        self.credential.is_some()
    }

    pub fn credential(&self) -> Result<&Credential> {
        self.credential.as_ref().ok_or(ConsoleError::Unauthorized)
    }
}
