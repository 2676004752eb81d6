// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Annotation, Block, BlockId};

/// One full snapshot of the edited content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A broken document invariant, as reported by
/// [`Document::check_invariants`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    DuplicateId(BlockId),
    AnnotationOutOfRange {
        block: BlockId,
        annotation: Annotation,
        text_len: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => {
                write!(formatter, "Block id `{id}` appears more than once")
            }
            Self::AnnotationOutOfRange {
                block,
                annotation,
                text_len,
            } => write!(
                formatter,
                "Annotation {} [{}, {}) in block `{block}` does not fit \
                 text of length {text_len}",
                annotation.kind, annotation.start, annotation.end
            ),
        }
    }
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Every violated invariant: duplicate block ids, and annotations that
    /// are inverted or reach past the end of their block's text.
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();
        for block in &self.blocks {
            if !seen.insert(&block.id) {
                violations
                    .push(InvariantViolation::DuplicateId(block.id.clone()));
            }
            let text_len = block.text_len();
            violations.extend(
                block
                    .annotations
                    .iter()
                    .filter(|a| !a.fits(text_len))
                    .map(|a| InvariantViolation::AnnotationOutOfRange {
                        block: block.id.clone(),
                        annotation: *a,
                        text_len,
                    }),
            );
        }
        violations
    }

    /// Panics if any invariant is broken. Only active with the
    /// `assert-invariants` feature.
    pub fn assert_invariants(&self) {
        #[cfg(feature = "assert-invariants")]
        self.explicitly_assert_invariants();
    }

    pub fn explicitly_assert_invariants(&self) {
        let violations = self.check_invariants();
        if let Some(first) = violations.first() {
            panic!(
                "Document invariants violated ({} total): {first}",
                violations.len()
            );
        }
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}
