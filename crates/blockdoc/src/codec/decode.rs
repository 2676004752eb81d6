// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::escape::{escape_entities, escaped_len};
use crate::model::{Annotation, AnnotationKind};
use crate::tree::ContentNode;

/// Escaped text and inline annotations recovered from a content node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Outer spans come before the spans nested inside them.
    pub annotations: Vec<Annotation>,
}

/// Recover the escaped text of `node` together with the annotations its
/// inline elements describe.
///
/// Offsets are measured in the escaped text. Elements whose tag is not an
/// annotation kind contribute their text but no span.
pub fn decode(node: &ContentNode) -> Decoded {
    let mut annotations = Vec::new();
    if let ContentNode::Element(element) = node {
        walk_children(&element.children, 0, &mut annotations);
    }
    Decoded {
        text: escape_entities(&node.text_content()),
        annotations,
    }
}

/// Walk `children` in document order starting at `cursor`, and return the
/// cursor after the last child.
fn walk_children(
    children: &[ContentNode],
    mut cursor: usize,
    annotations: &mut Vec<Annotation>,
) -> usize {
    for child in children {
        cursor = match child {
            ContentNode::Text(content) => cursor + escaped_len(content),
            ContentNode::Element(element) => {
                let children = &element.children;
                match AnnotationKind::from_tag(&element.tag) {
                    Some(kind) => {
                        // Record the outer span before descending so that
                        // it precedes anything nested inside it.
                        let slot = annotations.len();
                        annotations.push(Annotation::new(kind, cursor, cursor));
                        let end = walk_children(children, cursor, annotations);
                        annotations[slot].end = end;
                        end
                    }
                    None => walk_children(children, cursor, annotations),
                }
            }
        };
    }
    cursor
}
