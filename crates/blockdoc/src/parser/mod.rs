// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! HTML fragment parsing into a [`ContentNode`] forest.
//!
//! html5ever drives an [`ArenaDom`]: every node lives in one flat list and
//! parents refer to their children by [`ArenaHandle`]. The arena may hold
//! garbage nodes that html5ever created and later detached; converting to
//! [`ContentNode`]s only follows live handles, so they are dropped.

mod sink;

use html5ever::{LocalName, Namespace, QualName};

use crate::error::HtmlParseError;
use crate::tree::{ContentNode, ElementNode};
use sink::ArenaSink;

/// Parse an HTML fragment into its top-level content nodes.
///
/// Comments and processing instructions are dropped. Any parse error
/// reported by html5ever fails the whole parse.
pub fn parse_html(html: &str) -> Result<Vec<ContentNode>, HtmlParseError> {
    let dom = ArenaSink::parse(html)?;
    let mut nodes = Vec::new();
    for handle in dom.document().children.iter() {
        match dom.get_node(handle) {
            // The fragment parser wraps everything in a synthetic root.
            ArenaNode::Container(root) if &*root.name.local == "html" => {
                nodes.extend(
                    root.children.iter().filter_map(|h| dom.to_content(h)),
                );
            }
            _ => nodes.extend(dom.to_content(handle)),
        }
    }
    Ok(nodes)
}

pub(crate) fn html_qual_name(name: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from("http://www.w3.org/1999/xhtml"),
        LocalName::from(name),
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ArenaHandle(usize);

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ArenaContainer {
    pub(crate) name: QualName,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<ArenaHandle>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ArenaNode {
    Document(ArenaContainer),
    Container(ArenaContainer),
    Text(String),
    /// Comments and processing instructions. Kept only so html5ever has a
    /// handle to hold on to.
    Ignored,
}

impl ArenaNode {
    fn container(&self) -> Option<&ArenaContainer> {
        match self {
            Self::Document(c) | Self::Container(c) => Some(c),
            Self::Text(_) | Self::Ignored => None,
        }
    }

    fn container_mut(&mut self) -> Option<&mut ArenaContainer> {
        match self {
            Self::Document(c) | Self::Container(c) => Some(c),
            Self::Text(_) | Self::Ignored => None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ArenaDom {
    nodes: Vec<ArenaNode>,
    document_handle: ArenaHandle,
}

impl ArenaDom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![ArenaNode::Document(ArenaContainer {
                name: html_qual_name(""),
                attrs: Vec::new(),
                children: Vec::new(),
            })],
            document_handle: ArenaHandle(0),
        }
    }

    pub(crate) fn document_handle(&self) -> &ArenaHandle {
        &self.document_handle
    }

    pub(crate) fn document(&self) -> &ArenaContainer {
        self.get_node(&self.document_handle)
            .container()
            .unwrap_or_else(|| unreachable!("the document node is a container"))
    }

    pub(crate) fn add_node(&mut self, node: ArenaNode) -> ArenaHandle {
        self.nodes.push(node);
        ArenaHandle(self.nodes.len() - 1)
    }

    pub(crate) fn get_node(&self, handle: &ArenaHandle) -> &ArenaNode {
        &self.nodes[handle.0]
    }

    pub(crate) fn get_mut_node(
        &mut self,
        handle: &ArenaHandle,
    ) -> &mut ArenaNode {
        &mut self.nodes[handle.0]
    }

    pub(crate) fn children_mut(
        &mut self,
        handle: &ArenaHandle,
    ) -> Option<&mut Vec<ArenaHandle>> {
        self.get_mut_node(handle).container_mut().map(|c| &mut c.children)
    }

    /// The container currently holding `child`, and its position there.
    pub(crate) fn parent_of(
        &self,
        child: &ArenaHandle,
    ) -> Option<(ArenaHandle, usize)> {
        self.nodes.iter().enumerate().find_map(|(i, node)| {
            node.container()?
                .children
                .iter()
                .position(|h| h == child)
                .map(|pos| (ArenaHandle(i), pos))
        })
    }

    fn to_content(&self, handle: &ArenaHandle) -> Option<ContentNode> {
        match self.get_node(handle) {
            ArenaNode::Text(content) => {
                Some(ContentNode::Text(content.clone()))
            }
            ArenaNode::Container(container) => {
                let children = container
                    .children
                    .iter()
                    .filter_map(|h| self.to_content(h));
                Some(
                    ElementNode::new(
                        container.name.local.as_ref(),
                        container.attrs.clone(),
                        children,
                    )
                    .into(),
                )
            }
            ArenaNode::Document(_) | ArenaNode::Ignored => None,
        }
    }
}
