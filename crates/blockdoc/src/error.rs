// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::fmt;

use thiserror::Error;

use crate::model::{Annotation, AnnotationKind};

/// Failure while turning annotations into nested markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// Tags were still open once the whole text had been walked. This
    /// happens when an annotation ends past the end of the text.
    #[error("Inconsistent tags: {} left open ({})", .open.len(), kinds(.open))]
    Unterminated { open: Vec<AnnotationKind> },

    #[error(
        "Annotation {} ends at {} before it starts at {}",
        .annotation.kind, .annotation.end, .annotation.start
    )]
    Inverted { annotation: Annotation },
}

fn kinds(open: &[AnnotationKind]) -> String {
    open.iter()
        .map(|k| k.tag())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Which input of a delta operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSide {
    Source,
    Delta,
}

impl fmt::Display for InputSide {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(formatter, "source"),
            Self::Delta => write!(formatter, "delta"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaError {
    #[error("Invalid {side} object: {reason}")]
    InvalidArgument { side: InputSide, reason: String },

    #[error("{operation} index {index} out of range for {len} blocks")]
    IndexOutOfRange {
        operation: &'static str,
        index: usize,
        len: usize,
    },
}

impl DeltaError {
    pub(crate) fn invalid(side: InputSide, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            side,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse HTML: {}", .parse_errors.join("; "))]
pub struct HtmlParseError {
    pub parse_errors: Vec<String>,
}
