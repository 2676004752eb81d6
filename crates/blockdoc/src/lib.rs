// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Block document model for a rich text editor.
//!
//! A [`Document`] is an ordered list of [`Block`]s. Each block holds
//! entity-escaped text and a list of inline [`Annotation`]s expressed as
//! character offsets into that text.
//!
//! - [`codec`] converts text + annotations into nested inline markup and
//!   back again.
//! - [`extract`] builds a [`Document`] from a tree of content nodes, as
//!   produced by the editing surface (or by [`parse_html`]).
//! - [`delta`] computes block-keyed deltas between two snapshots and
//!   replays them.
//! - [`history`] keeps a log of deltas and rebuilds any revision.

pub mod codec;
pub mod delta;
mod error;
pub mod escape;
pub mod extract;
pub mod history;
pub mod model;
#[cfg(feature = "sys")]
mod parser;
pub mod render;
pub mod tree;

pub use crate::codec::{decode, encode};
pub use crate::delta::{
    apply_delta, apply_delta_json, compute_delta, Delta, Operation,
    RevisionId,
};
pub use crate::error::{DeltaError, HtmlParseError, InputSide, MarkupError};
pub use crate::escape::{escape_entities, escaped_len, text_len};
pub use crate::extract::{block_candidates, extract_document};
pub use crate::history::{Revision, RevisionHistory};
pub use crate::model::{
    Annotation, AnnotationKind, Block, BlockId, BlockKind, Document,
    InvariantViolation,
};
#[cfg(feature = "sys")]
pub use crate::parser::parse_html;
pub use crate::render::{render_document, RenderOptions, ToHtml};
pub use crate::tree::{ContentNode, ElementNode};
