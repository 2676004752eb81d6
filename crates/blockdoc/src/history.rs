// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! A log of deltas on top of a base snapshot.
//!
//! Only the base document is stored in full. Any later revision is rebuilt
//! by replaying the recorded deltas, in order, onto a copy of the base.

use tracing::debug;

use crate::delta::{apply_delta, compute_delta, Delta, RevisionId};
use crate::error::DeltaError;
use crate::model::Document;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Revision {
    /// Position in the log, starting at 1.
    pub number: u64,
    pub delta: Delta,
}

#[derive(Clone, Debug)]
pub struct RevisionHistory {
    base: Document,
    latest: Document,
    revisions: Vec<Revision>,
}

impl RevisionHistory {
    pub fn new(base: Document) -> Self {
        Self {
            latest: base.clone(),
            base,
            revisions: Vec::new(),
        }
    }

    pub fn base(&self) -> &Document {
        &self.base
    }

    /// The snapshot the next [`commit`](Self::commit) diffs against.
    pub fn latest(&self) -> &Document {
        &self.latest
    }

    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    /// Append `delta` to the log and return its revision number. Empty
    /// deltas are not kept and return `None`.
    ///
    /// The delta must have been computed against the document the log
    /// currently ends at; nothing checks this.
    pub fn record(&mut self, delta: Delta) -> Option<u64> {
        if delta.is_empty() {
            return None;
        }
        let number = self.revisions.len() as u64 + 1;
        debug!(number, revision = %delta.revision_id, "recorded revision");
        self.revisions.push(Revision { number, delta });
        Some(number)
    }

    /// Diff `current` against the latest snapshot, record the result and
    /// make `current` the latest snapshot.
    pub fn commit(&mut self, current: Document) -> Option<u64> {
        let delta = compute_delta(&self.latest, &current);
        let number = self.record(delta);
        self.latest = current;
        number
    }

    /// Rebuild the document as it was right after `revision_id`, or `None`
    /// when no recorded revision has that id.
    pub fn document_at(
        &self,
        revision_id: &RevisionId,
    ) -> Result<Option<Document>, DeltaError> {
        let Some(end) = self
            .revisions
            .iter()
            .position(|r| &r.delta.revision_id == revision_id)
        else {
            return Ok(None);
        };

        let mut document = self.base.clone();
        for revision in &self.revisions[..=end] {
            apply_delta(&mut document, &revision.delta)?;
        }
        Ok(Some(document))
    }
}
