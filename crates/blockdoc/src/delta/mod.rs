// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Structural deltas between two document snapshots.
//!
//! Deltas are block-granular and keyed by [`BlockId`](crate::BlockId): a
//! block is deleted, created, or replaced wholesale when its content
//! changed. Text inside a block is never diffed, and a block that only
//! moved produces no operation at all.
//!
//! Operation indices are positional. They are only meaningful when the
//! operations are replayed in order against the exact snapshot the delta
//! was computed from; nothing in a [`Delta`] records which snapshot that
//! was.

mod apply;
mod compute;
mod wire;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use apply::{apply_delta, apply_delta_json};
pub use compute::compute_delta;

use crate::model::{random_name, Block};

/// Identifies one delta, and so one revision in a history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Current time plus a random component, so two deltas practically
    /// never share an id.
    pub fn generate() -> Self {
        Self(random_name())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RevisionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One positional edit of a document's block list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    /// Remove the block currently at `index`.
    Delete { index: usize },
    /// Insert `block` at `index`, shifting later blocks right.
    Create { index: usize, block: Block },
    /// Replace the block at `index`.
    Update { index: usize, block: Block },
}

impl Operation {
    pub fn index(&self) -> usize {
        match self {
            Self::Delete { index }
            | Self::Create { index, .. }
            | Self::Update { index, .. } => *index,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Delete { .. } => "delete",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
        }
    }
}

/// An ordered list of operations plus the metadata identifying it. Never
/// modified once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "wire::RawDelta")]
pub struct Delta {
    pub revision_id: RevisionId,
    pub timestamp: DateTime<Utc>,
    pub operations: Vec<Operation>,
}

impl Delta {
    /// Wrap `operations` with a fresh revision id and the current time.
    pub fn new(operations: Vec<Operation>) -> Self {
        Self {
            revision_id: RevisionId::generate(),
            timestamp: Utc::now(),
            operations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }
}
