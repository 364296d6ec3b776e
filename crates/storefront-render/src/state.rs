// SPDX-License-Identifier: Apache-2.0

use storefront_model::{CategoryFilter, CategoryId};

/// Per-session UI state, threaded through every render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_category: CategoryId,
    pub open_preview: Option<u32>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_category: CategoryId::all(),
            open_preview: None,
        }
    }
}

impl SessionState {
    #[must_use]
    pub fn filter(&self) -> CategoryFilter {
        CategoryFilter::from_id(&self.current_category)
    }
}
