// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::borrow::Cow;
use std::cell::{Ref, RefCell};

use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{parse_fragment, Attribute, QualName};
use once_cell::sync::Lazy;

use super::{html_qual_name, ArenaContainer, ArenaDom, ArenaHandle, ArenaNode};
use crate::error::HtmlParseError;

/// Name reported for nodes that are not elements. html5ever only asks for
/// element names, so this is never compared against in practice.
static NO_NAME: Lazy<QualName> = Lazy::new(|| html_qual_name(""));

struct SinkState {
    dom: ArenaDom,
    parse_errors: Vec<String>,
}

pub(crate) struct ArenaSink {
    state: RefCell<SinkState>,
}

impl ArenaSink {
    pub(crate) fn parse(html: &str) -> Result<ArenaDom, HtmlParseError> {
        parse_fragment(
            ArenaSink::default(),
            Default::default(),
            html_qual_name(""),
            vec![],
        )
        .from_utf8()
        .one(html.as_bytes())
    }

    fn insert_child(
        dom: &mut ArenaDom,
        parent: &ArenaHandle,
        position: Option<usize>,
        child: NodeOrText<ArenaHandle>,
    ) {
        let Some(children) = dom.children_mut(parent) else {
            return;
        };
        let position = position.unwrap_or(children.len());
        let before = position
            .checked_sub(1)
            .and_then(|p| children.get(p))
            .cloned();

        match child {
            NodeOrText::AppendNode(child) => {
                if let Some(children) = dom.children_mut(parent) {
                    children.insert(position, child);
                }
            }
            NodeOrText::AppendText(tendril) => {
                // Merge into the preceding text node if there is one.
                if let Some(before) = before {
                    if let ArenaNode::Text(content) =
                        dom.get_mut_node(&before)
                    {
                        content.push_str(tendril.as_ref());
                        return;
                    }
                }
                let text =
                    dom.add_node(ArenaNode::Text(tendril.as_ref().to_owned()));
                if let Some(children) = dom.children_mut(parent) {
                    children.insert(position, text);
                }
            }
        }
    }
}

impl Default for ArenaSink {
    fn default() -> Self {
        Self {
            state: RefCell::new(SinkState {
                dom: ArenaDom::new(),
                parse_errors: Vec::new(),
            }),
        }
    }
}

impl TreeSink for ArenaSink {
    type Handle = ArenaHandle;
    type Output = Result<ArenaDom, HtmlParseError>;
    type ElemName<'a> = Ref<'a, QualName>;

    fn finish(self) -> Self::Output {
        let state = self.state.into_inner();
        if state.parse_errors.is_empty() {
            Ok(state.dom)
        } else {
            Err(HtmlParseError {
                parse_errors: state.parse_errors,
            })
        }
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.state.borrow_mut().parse_errors.push(String::from(msg));
    }

    fn get_document(&self) -> Self::Handle {
        self.state.borrow().dom.document_handle().clone()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        Ref::map(self.state.borrow(), |state| {
            match state.dom.get_node(target) {
                ArenaNode::Container(c) | ArenaNode::Document(c) => &c.name,
                ArenaNode::Text(_) | ArenaNode::Ignored => &*NO_NAME,
            }
        })
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs
            .into_iter()
            .map(|attr| {
                (
                    attr.name.local.as_ref().to_owned(),
                    attr.value.as_ref().to_owned(),
                )
            })
            .collect();
        self.state
            .borrow_mut()
            .dom
            .add_node(ArenaNode::Container(ArenaContainer {
                name,
                attrs,
                children: Vec::new(),
            }))
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        self.state.borrow_mut().dom.add_node(ArenaNode::Ignored)
    }

    fn create_pi(
        &self,
        _target: StrTendril,
        _data: StrTendril,
    ) -> Self::Handle {
        self.state.borrow_mut().dom.add_node(ArenaNode::Ignored)
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let dom = &mut self.state.borrow_mut().dom;
        Self::insert_child(dom, parent, None, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.state.borrow().dom.parent_of(element).is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Fragments have no doctype.
    }

    fn pop(&self, _node: &Self::Handle) {}

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(
        &self,
        sibling: &Self::Handle,
        new_node: NodeOrText<Self::Handle>,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        if let Some((parent, position)) = dom.parent_of(sibling) {
            Self::insert_child(dom, &parent, Some(position), new_node);
        }
    }

    fn add_attrs_if_missing(
        &self,
        target: &Self::Handle,
        attrs: Vec<Attribute>,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        if let ArenaNode::Container(node) = dom.get_mut_node(target) {
            for attr in attrs {
                let name = attr.name.local.as_ref();
                if !node.attrs.iter().any(|(n, _)| n == name) {
                    let value = attr.value.as_ref().to_owned();
                    node.attrs.push((name.to_owned(), value));
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        let dom = &mut self.state.borrow_mut().dom;
        if let Some((parent, position)) = dom.parent_of(target) {
            if let Some(children) = dom.children_mut(&parent) {
                children.remove(position);
            }
        }
    }

    fn reparent_children(
        &self,
        node: &Self::Handle,
        new_parent: &Self::Handle,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        let moved = dom
            .children_mut(node)
            .map(std::mem::take)
            .unwrap_or_default();
        if let Some(children) = dom.children_mut(new_parent) {
            children.extend(moved);
        }
    }

    fn set_current_line(&self, _line_number: u64) {}
}
