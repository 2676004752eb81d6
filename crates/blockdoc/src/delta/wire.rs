// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! JSON form of documents and deltas.
//!
//! Stored or transmitted values are read through loosely typed mirrors so
//! that a missing field is reported as an invalid source or delta, rather
//! than as a generic decoding failure.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Delta, Operation, RevisionId};
use crate::error::{DeltaError, InputSide};
use crate::model::{Block, Document};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDelta {
    revision_id: Option<RevisionId>,
    timestamp: Option<DateTime<Utc>>,
    operations: Option<Vec<RawOperation>>,
}

#[derive(Deserialize)]
pub(crate) struct RawOperation {
    #[serde(rename = "type")]
    kind: Option<String>,
    index: Option<usize>,
    block: Option<Block>,
}

#[derive(Deserialize)]
struct RawDocument {
    blocks: Option<Vec<Block>>,
}

fn invalid_delta(reason: impl Into<String>) -> DeltaError {
    DeltaError::invalid(InputSide::Delta, reason)
}

fn invalid_source(reason: impl Into<String>) -> DeltaError {
    DeltaError::invalid(InputSide::Source, reason)
}

impl TryFrom<RawDelta> for Delta {
    type Error = DeltaError;

    fn try_from(raw: RawDelta) -> Result<Self, Self::Error> {
        let revision_id = raw
            .revision_id
            .ok_or_else(|| invalid_delta("missing `revisionId`"))?;
        let timestamp = raw
            .timestamp
            .ok_or_else(|| invalid_delta("missing `timestamp`"))?;
        let operations = raw
            .operations
            .ok_or_else(|| invalid_delta("missing `operations`"))?
            .into_iter()
            .enumerate()
            .map(|(position, op)| {
                Operation::try_from(op).map_err(|reason| {
                    invalid_delta(format!("operation {position}: {reason}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Delta {
            revision_id,
            timestamp,
            operations,
        })
    }
}

impl TryFrom<RawOperation> for Operation {
    type Error = String;

    fn try_from(raw: RawOperation) -> Result<Self, Self::Error> {
        let kind = raw.kind.ok_or("missing `type`")?;
        let index = raw.index.ok_or("missing `index`")?;
        match kind.as_str() {
            "delete" => Ok(Operation::Delete { index }),
            "create" => Ok(Operation::Create {
                index,
                block: raw.block.ok_or("missing `block`")?,
            }),
            "update" => Ok(Operation::Update {
                index,
                block: raw.block.ok_or("missing `block`")?,
            }),
            other => Err(format!("unknown operation type `{other}`")),
        }
    }
}

impl Delta {
    /// Read a stored delta. Any malformed or missing part is reported as an
    /// invalid delta.
    pub fn from_json(json: &str) -> Result<Self, DeltaError> {
        let raw: RawDelta = serde_json::from_str(json)
            .map_err(|e| invalid_delta(e.to_string()))?;
        Delta::try_from(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Document {
    /// Read a stored document. Any malformed or missing part is reported as
    /// an invalid source.
    pub fn from_json(json: &str) -> Result<Self, DeltaError> {
        let raw: RawDocument = serde_json::from_str(json)
            .map_err(|e| invalid_source(e.to_string()))?;
        let blocks = raw
            .blocks
            .ok_or_else(|| invalid_source("missing `blocks`"))?;
        Ok(Document::new(blocks))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
