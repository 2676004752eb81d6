// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use indexmap::IndexMap;
use tracing::debug;

use super::{Delta, Operation};
use crate::model::{Block, BlockId, Document};

/// Blocks keyed by id, in document order, with their position.
fn keyed(document: &Document) -> IndexMap<&BlockId, (usize, &Block)> {
    document
        .blocks
        .iter()
        .enumerate()
        .map(|(index, block)| (&block.id, (index, block)))
        .collect()
}

/// Compute the operations that turn `source` into `target`.
///
/// Operations come out as: deletes and updates in source order, then
/// creates in target order. Delete indices account for the deletes before
/// them, so they stay valid while the list shrinks during replay. Updates
/// and creates carry the block's position in `target`.
///
/// Passing the same document twice short-circuits to an empty delta.
pub fn compute_delta(source: &Document, target: &Document) -> Delta {
    let mut operations = Vec::new();

    if !std::ptr::eq(source, target) {
        let source_blocks = keyed(source);
        let target_blocks = keyed(target);

        let mut removed = 0;
        for (id, (index, block)) in &source_blocks {
            match target_blocks.get(id) {
                None => {
                    operations.push(Operation::Delete {
                        index: index.saturating_sub(removed),
                    });
                    removed += 1;
                }
                Some((target_index, target_block)) if target_block != block => {
                    operations.push(Operation::Update {
                        index: *target_index,
                        block: (*target_block).clone(),
                    });
                }
                Some(_) => {}
            }
        }

        for (id, (index, block)) in &target_blocks {
            if !source_blocks.contains_key(id) {
                operations.push(Operation::Create {
                    index: *index,
                    block: (*block).clone(),
                });
            }
        }
    }

    let delta = Delta::new(operations);
    debug!(
        revision = %delta.revision_id,
        operations = delta.len(),
        source_blocks = source.len(),
        target_blocks = target.len(),
        "computed delta"
    );
    delta
}
