// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use storefront_store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyncErrorCode {
    Config,
    Network,
    Auth,
    Format,
    Store,
    Deadline,
}

impl SyncErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config_error",
            Self::Network => "network_error",
            Self::Auth => "auth_error",
            Self::Format => "format_error",
            Self::Store => "store_error",
            Self::Deadline => "deadline_exceeded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncError {
    pub code: SyncErrorCode,
    pub message: String,
}

impl SyncError {
    #[must_use]
    pub fn new(code: SyncErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for SyncError {}

impl From<StoreError> for SyncError {
    fn from(value: StoreError) -> Self {
        Self::new(SyncErrorCode::Store, value.to_string())
    }
}
