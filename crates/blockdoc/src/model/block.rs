// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{AnnotationKind, BlockKind};
use crate::escape::text_len;

/// Stable identity of a block. This is the only key used when diffing two
/// snapshots, so it must never be reassigned while the block exists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh identifier: the current time in milliseconds followed by a
    /// random suffix, both in base 36.
    pub fn generate() -> Self {
        Self(random_name())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

pub(crate) fn random_name() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let suffix: u64 = rand::thread_rng().gen();
    format!("{}{}", base36(millis), base36(suffix))
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

/// An inline markup span over a block's text, as half-open `[start, end)`
/// character offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub start: usize,
    pub end: usize,
}

impl Annotation {
    pub fn new(kind: AnnotationKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this span is well formed for a text of `text_len` characters.
    pub fn fits(&self, text_len: usize) -> bool {
        self.start <= self.end && self.end <= text_len
    }
}

/// One paragraph-level unit of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Entity-escaped text. Annotation offsets count its `char`s.
    pub text: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Block {
    pub fn new(
        id: impl Into<BlockId>,
        kind: BlockKind,
        text: impl Into<String>,
        annotations: Vec<Annotation>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
            annotations,
        }
    }

    /// An unannotated paragraph with a freshly generated id.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockId::generate(), BlockKind::Paragraph, text, Vec::new())
    }

    pub fn text_len(&self) -> usize {
        text_len(&self.text)
    }
}
