// Copyright 2024 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Generic content tree, as handed over by the editing surface.
//!
//! Parents own their children. Text nodes hold raw (unescaped) text, the
//! same as a DOM text node would.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentNode {
    Text(String),
    Element(ElementNode),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementNode {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn element(
        tag: impl Into<String>,
        children: impl IntoIterator<Item = ContentNode>,
    ) -> Self {
        Self::Element(ElementNode::new(tag, Vec::new(), children))
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated raw text of this node and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(content) => out.push_str(content),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl ElementNode {
    pub fn new(
        tag: impl Into<String>,
        attrs: Vec<(String, String)>,
        children: impl IntoIterator<Item = ContentNode>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            children: children.into_iter().collect(),
        }
    }

    pub fn with_attr(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|v| v.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

impl From<ElementNode> for ContentNode {
    fn from(element: ElementNode) -> Self {
        Self::Element(element)
    }
}
