// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::{debug, trace};

use super::{Delta, Operation};
use crate::error::DeltaError;
use crate::model::{Block, Document};

/// Replay `delta` onto `source` in place and hand it back.
///
/// Operations run in order, each against the list as the previous ones left
/// it. An index outside that list fails with
/// [`DeltaError::IndexOutOfRange`]; operations already applied stay
/// applied, so callers that need all-or-nothing should work on a copy.
pub fn apply_delta<'a>(
    source: &'a mut Document,
    delta: &Delta,
) -> Result<&'a mut Document, DeltaError> {
    if delta.is_empty() {
        return Ok(source);
    }

    for operation in &delta.operations {
        trace!(
            operation = operation.name(),
            index = operation.index(),
            blocks = source.blocks.len(),
            "applying operation"
        );
        operation.apply_to(&mut source.blocks)?;
    }
    debug!(
        revision = %delta.revision_id,
        operations = delta.len(),
        blocks = source.blocks.len(),
        "applied delta"
    );

    source.assert_invariants();
    Ok(source)
}

/// [`apply_delta`] over stored JSON, returning the resulting document.
///
/// A malformed document is an invalid source and a malformed delta an
/// invalid delta; both are checked before anything is applied.
pub fn apply_delta_json(
    source: &str,
    delta: &str,
) -> Result<Document, DeltaError> {
    let mut document = Document::from_json(source)?;
    let delta = Delta::from_json(delta)?;
    apply_delta(&mut document, &delta)?;
    Ok(document)
}

impl Operation {
    fn apply_to(&self, blocks: &mut Vec<Block>) -> Result<(), DeltaError> {
        let len = blocks.len();
        let out_of_range = |index| DeltaError::IndexOutOfRange {
            operation: self.name(),
            index,
            len,
        };

        match self {
            Self::Delete { index } => {
                if *index >= len {
                    return Err(out_of_range(*index));
                }
                blocks.remove(*index);
            }
            Self::Create { index, block } => {
                if *index > len {
                    return Err(out_of_range(*index));
                }
                blocks.insert(*index, block.clone());
            }
            Self::Update { index, block } => {
                let slot = blocks
                    .get_mut(*index)
                    .ok_or_else(|| out_of_range(*index))?;
                *slot = block.clone();
            }
        }
        Ok(())
    }
}
