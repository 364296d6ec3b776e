// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod canonical;
mod env;
mod error;

use sha2::{Digest, Sha256};

pub use env::{env_bool, env_non_empty};
pub use error::{ExitCode, MachineError};

pub const CRATE_NAME: &str = "storefront-core";

pub const ENV_STOREFRONT_LOG_LEVEL: &str = "STOREFRONT_LOG_LEVEL";
pub const ENV_STOREFRONT_LOG_JSON: &str = "STOREFRONT_LOG_JSON";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
