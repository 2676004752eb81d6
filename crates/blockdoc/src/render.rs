// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Rendering a [`Document`] back into editor markup.
//!
//! Each block becomes one element named after its kind, carrying the block
//! id in `name` and the block classes so the editing surface can find it
//! again:
//!
//! ```text
//! <p name='ID' class='se-elem se-elem--p'>…</p>
//! ```

use crate::codec::encode;
use crate::error::MarkupError;
use crate::extract::BLOCK_ID_ATTR;
use crate::model::{Block, Document};

/// Class carried by every block element.
pub const BLOCK_CLASS: &str = "se-elem";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Base class for block elements. Each block also gets
    /// `<block_class>--<tag>`.
    pub block_class: String,
    /// Emitted instead of the content of a block whose markup is blank, so
    /// the block keeps its height when displayed.
    pub blank_block: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            block_class: BLOCK_CLASS.to_owned(),
            blank_block: "<br/>".to_owned(),
        }
    }
}

pub trait ToHtml {
    fn to_html(&self) -> Result<String, MarkupError>;
}

impl ToHtml for Block {
    fn to_html(&self) -> Result<String, MarkupError> {
        let mut html = String::new();
        render_block(&mut html, self, &RenderOptions::default())?;
        Ok(html)
    }
}

impl ToHtml for Document {
    fn to_html(&self) -> Result<String, MarkupError> {
        render_document(self, &RenderOptions::default())
    }
}

/// Render every block in order. Fails on the first block whose annotations
/// cannot be encoded.
pub fn render_document(
    document: &Document,
    options: &RenderOptions,
) -> Result<String, MarkupError> {
    let mut html = String::new();
    for block in &document.blocks {
        render_block(&mut html, block, options)?;
    }
    Ok(html)
}

fn render_block(
    html: &mut String,
    block: &Block,
    options: &RenderOptions,
) -> Result<(), MarkupError> {
    let tag = block.kind.tag();
    let content = encode(&block.text, &block.annotations)?;

    html.push_str(&format!(
        "<{tag} {BLOCK_ID_ATTR}='{}' class='{class} {class}--{tag}'>",
        html_escape::encode_single_quoted_attribute(block.id.as_str()),
        class = options.block_class,
    ));
    if content.trim().is_empty() {
        html.push_str(&options.blank_block);
    } else {
        html.push_str(&content);
    }
    html.push_str(&format!("</{tag}>"));
    Ok(())
}
