// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// The kind of a paragraph-level block, named after the tag it renders as.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum BlockKind {
    #[strum(serialize = "p")]
    #[serde(rename = "p")]
    Paragraph,
    #[strum(serialize = "h1")]
    #[serde(rename = "h1")]
    Heading1,
    #[strum(serialize = "h2")]
    #[serde(rename = "h2")]
    Heading2,
    #[strum(serialize = "blockquote")]
    #[serde(rename = "blockquote")]
    Quote,
}

/// The kind of an inline annotation, named after the tag it renders as.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum AnnotationKind {
    #[strum(serialize = "b")]
    #[serde(rename = "b")]
    Bold,
    #[strum(serialize = "i")]
    #[serde(rename = "i")]
    Italic,
    #[strum(serialize = "u")]
    #[serde(rename = "u")]
    Underline,
    #[strum(serialize = "s")]
    #[serde(rename = "s")]
    Strike,
    #[strum(serialize = "a")]
    #[serde(rename = "a")]
    Anchor,
}

static BLOCK_TAGS: Lazy<HashMap<&'static str, BlockKind>> =
    Lazy::new(|| BlockKind::iter().map(|kind| (kind.tag(), kind)).collect());

static ANNOTATION_TAGS: Lazy<HashMap<&'static str, AnnotationKind>> =
    Lazy::new(|| {
        AnnotationKind::iter().map(|kind| (kind.tag(), kind)).collect()
    });

fn lookup<K: Copy>(table: &HashMap<&'static str, K>, tag: &str) -> Option<K> {
    if tag.bytes().any(|b| b.is_ascii_uppercase()) {
        table.get(tag.to_ascii_lowercase().as_str()).copied()
    } else {
        table.get(tag).copied()
    }
}

impl BlockKind {
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// Map an element tag name (case-insensitive) to a block kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        lookup(&BLOCK_TAGS, tag)
    }
}

impl AnnotationKind {
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// Map an element tag name (case-insensitive) to an annotation kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        lookup(&ANNOTATION_TAGS, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_block_kind_round_trips_through_its_tag() {
        for kind in BlockKind::iter() {
            assert_eq!(BlockKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(BlockKind::Quote.tag(), "blockquote");
        assert_eq!(BlockKind::Heading2.to_string(), "h2");
    }

    #[test]
    fn every_annotation_kind_round_trips_through_its_tag() {
        for kind in AnnotationKind::iter() {
            assert_eq!(AnnotationKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(AnnotationKind::Strike.tag(), "s");
    }

    #[test]
    fn tag_lookup_ignores_case() {
        assert_eq!(BlockKind::from_tag("H1"), Some(BlockKind::Heading1));
        assert_eq!(AnnotationKind::from_tag("B"), Some(AnnotationKind::Bold));
    }

    #[test]
    fn unknown_tags_have_no_kind() {
        assert_eq!(BlockKind::from_tag("div"), None);
        assert_eq!(BlockKind::from_tag("b"), None);
        assert_eq!(AnnotationKind::from_tag("strong"), None);
        assert_eq!(AnnotationKind::from_tag("p"), None);
    }

    #[test]
    fn kinds_serialize_as_tag_names() {
        assert_eq!(
            serde_json::to_string(&BlockKind::Quote).unwrap(),
            "\"blockquote\""
        );
        assert_eq!(
            serde_json::from_str::<AnnotationKind>("\"u\"").unwrap(),
            AnnotationKind::Underline
        );
    }
}
