// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Entity escaping for block text.
//!
//! Text stored in a [`Block`](crate::Block) is always escaped, so the
//! markup-significant characters `&`, `<`, `>`, `"`, `'` and `/` only ever
//! appear as entities. All annotation offsets count Unicode scalar values of
//! the escaped form.

/// Entity written for `'`. Stored documents use the decimal form, which is
/// one character shorter than the hex form html-escape picks.
const APOSTROPHE: &str = "&#39;";

/// Escape `&`, `<`, `>`, `"`, `'` and `/` into their entity forms.
pub fn escape_entities(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for (i, part) in raw.split('\'').enumerate() {
        if i > 0 {
            escaped.push_str(APOSTROPHE);
        }
        escaped.push_str(&html_escape::encode_safe(part));
    }
    escaped
}

/// Length, in scalar values, of `raw` once escaped.
pub fn escaped_len(raw: &str) -> usize {
    text_len(&escape_entities(raw))
}

/// Length of already-escaped text, in the units used by annotation offsets.
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}
