// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::HashMap;

use crate::error::MarkupError;
use crate::model::{Annotation, AnnotationKind};

/// Render escaped `text` with `annotations` applied as inline tags.
///
/// Annotations may arrive in any order. At each offset every tag ending
/// there is closed before any tag starting there is opened, so adjacent
/// spans come out side by side rather than nested. Tags ending at the same
/// offset close innermost first, so nested input stays nested. A close with
/// no matching open tag is skipped.
///
/// Fails if a tag is still open after the last offset, which is what an
/// annotation ending past the end of the text leads to.
pub fn encode(
    text: &str,
    annotations: &[Annotation],
) -> Result<String, MarkupError> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let mut starting_at: HashMap<usize, Vec<&Annotation>> = HashMap::new();
    let mut ending_at: HashMap<usize, Vec<&Annotation>> = HashMap::new();
    for annotation in annotations {
        if annotation.start > annotation.end {
            return Err(MarkupError::Inverted {
                annotation: *annotation,
            });
        }
        starting_at.entry(annotation.start).or_default().push(annotation);
        if !annotation.is_empty() {
            ending_at.entry(annotation.end).or_default().push(annotation);
        }
    }

    let mut html = String::with_capacity(text.len());
    let mut open_tags: Vec<AnnotationKind> = Vec::new();
    let mut chars = text.chars();
    let mut offset = 0;

    loop {
        if let Some(ending) = ending_at.get(&offset) {
            close_tags(&mut html, &mut open_tags, ending);
        }

        if let Some(starting) = starting_at.get(&offset) {
            for annotation in starting {
                open_tag(&mut html, annotation.kind);
                if annotation.is_empty() {
                    // Nothing to wrap, so it closes straight away.
                    push_close_tag(&mut html, annotation.kind);
                } else {
                    open_tags.push(annotation.kind);
                }
            }
        }

        match chars.next() {
            Some(c) => html.push(c),
            None => break,
        }
        offset += 1;
    }

    if open_tags.is_empty() {
        Ok(html)
    } else {
        Err(MarkupError::Unterminated { open: open_tags })
    }
}

fn open_tag(html: &mut String, kind: AnnotationKind) {
    html.push('<');
    html.push_str(kind.tag());
    html.push('>');
}

fn push_close_tag(html: &mut String, kind: AnnotationKind) {
    html.push_str("</");
    html.push_str(kind.tag());
    html.push('>');
}

/// Close every tag in `ending`, innermost first.
///
/// Whichever ending tag sits on top of the stack is closed next, so spans
/// sharing an end offset close in reverse opening order. Only when none of
/// them is on top (crossing spans) is the innermost open tag of the next
/// kind in `ending` closed from below the top.
fn close_tags(
    html: &mut String,
    open_tags: &mut Vec<AnnotationKind>,
    ending: &[&Annotation],
) {
    let mut pending: Vec<AnnotationKind> =
        ending.iter().map(|a| a.kind).collect();
    while !pending.is_empty() {
        let on_top = open_tags
            .last()
            .and_then(|top| pending.iter().position(|kind| kind == top));
        let kind = pending.remove(on_top.unwrap_or(0));
        close_tag(html, open_tags, kind);
    }
}

/// Close the innermost open tag of `kind`, which need not be the top of
/// the stack.
fn close_tag(
    html: &mut String,
    open_tags: &mut Vec<AnnotationKind>,
    kind: AnnotationKind,
) {
    if let Some(index) = open_tags.iter().rposition(|open| *open == kind) {
        open_tags.remove(index);
        push_close_tag(html, kind);
    }
}
