// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Document model: blocks, inline annotations and their kinds.

mod block;
mod document;
mod kinds;

pub(crate) use block::random_name;
pub use block::{Annotation, Block, BlockId};
pub use document::{Document, InvariantViolation};
pub use kinds::{AnnotationKind, BlockKind};
