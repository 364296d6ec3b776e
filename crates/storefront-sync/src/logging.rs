// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Prepare,
    List,
    Fetch,
    Merge,
    Persist,
    Finalize,
}

impl SyncStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prepare => "prepare",
            Self::List => "list",
            Self::Fetch => "fetch",
            Self::Merge => "merge",
            Self::Persist => "persist",
            Self::Finalize => "finalize",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncEvent {
    pub stage: SyncStage,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

/// Ordered record of one sync run, returned with its outcome.
#[derive(Debug, Default, Clone)]
pub struct SyncLog {
    events: Vec<SyncEvent>,
}

impl SyncLog {
    pub fn emit(
        &mut self,
        stage: SyncStage,
        name: impl Into<String>,
        fields: BTreeMap<String, String>,
    ) {
        let name = name.into();
        debug!(stage = stage.as_str(), event = %name, ?fields, "sync event");
        self.events.push(SyncEvent {
            stage,
            name,
            fields,
        });
    }

    #[must_use]
    pub fn events(&self) -> &[SyncEvent] {
        &self.events
    }

    #[must_use]
    pub fn named(&self, name: &str) -> Vec<&SyncEvent> {
        self.events.iter().filter(|e| e.name == name).collect()
    }
}

/// Builds an event field map from `(key, value)` pairs.
pub(crate) fn fields<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
