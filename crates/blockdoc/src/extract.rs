// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Snapshotting editor content into a [`Document`].

use tracing::{debug, warn};

use crate::codec::{decode, Decoded};
use crate::model::{Block, BlockId, BlockKind, Document};
use crate::render::BLOCK_CLASS;
use crate::tree::ContentNode;

/// Attribute the editing surface stores a block's id in.
pub const BLOCK_ID_ATTR: &str = "name";

/// Build a document from block candidate nodes, keeping their order.
///
/// Text nodes and elements whose tag is not a block kind are skipped, as
/// are block elements without an id attribute.
pub fn extract_document<'a>(
    nodes: impl IntoIterator<Item = &'a ContentNode>,
) -> Document {
    let blocks: Vec<Block> =
        nodes.into_iter().filter_map(extract_block).collect();
    debug!(blocks = blocks.len(), "extracted document");

    let document = Document::new(blocks);
    document.assert_invariants();
    document
}

fn extract_block(node: &ContentNode) -> Option<Block> {
    let element = node.as_element()?;
    let kind = BlockKind::from_tag(&element.tag)?;
    let Some(id) = element.get_attr(BLOCK_ID_ATTR) else {
        warn!(
            tag = %element.tag,
            "skipping block without a `{BLOCK_ID_ATTR}` attribute"
        );
        return None;
    };

    let Decoded { text, annotations } = decode(node);
    Some(Block {
        id: BlockId::new(id),
        kind,
        text,
        annotations,
    })
}

/// Every element marked with the block class, in document order.
///
/// Matches are searched at any depth, including inside other matches, the
/// same way a class selector query over the content would.
pub fn block_candidates(nodes: &[ContentNode]) -> Vec<&ContentNode> {
    let mut found = Vec::new();
    collect_candidates(nodes, &mut found);
    found
}

fn collect_candidates<'a>(
    nodes: &'a [ContentNode],
    found: &mut Vec<&'a ContentNode>,
) {
    for node in nodes {
        if let ContentNode::Element(element) = node {
            if element.has_class(BLOCK_CLASS) {
                found.push(node);
            }
            collect_candidates(&element.children, found);
        }
    }
}

impl Document {
    /// Snapshot rendered editor content: parse it, find the block elements
    /// and extract them.
    #[cfg(feature = "sys")]
    pub fn from_html(html: &str) -> Result<Self, crate::HtmlParseError> {
        let nodes = crate::parser::parse_html(html)?;
        Ok(extract_document(block_candidates(&nodes)))
    }
}
