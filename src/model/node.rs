// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use smallvec::SmallVec;
use smol_str::SmolStr;

use super::ids::NodeId;

/// The closed set of node kinds a dialogue graph contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Speech,
    Response,
}

/// Canvas coordinate, kept only so layouts survive save/load. Carries no
/// semantic weight for graph logic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Kind-specific node data, matched exhaustively by the mutator.
///
/// A `Response` has no branching fields at all: it continues linearly
/// through `next_id` like any other node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeBody {
    Speech {
        response_ids: SmallVec<[NodeId; 4]>,
        expects_response: bool,
    },
    Response,
}

/// A vertex in the dialogue graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    text: String,
    position: Position,
    next_id: Option<NodeId>,
    prev_ids: SmallVec<[NodeId; 2]>,
    selected_callbacks: BTreeSet<SmolStr>,
    body: NodeBody,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, text: impl Into<String>, position: Position) -> Self {
        let body = match kind {
            NodeKind::Speech => NodeBody::Speech {
                response_ids: SmallVec::new(),
                expects_response: false,
            },
            NodeKind::Response => NodeBody::Response,
        };

        Self {
            id,
            text: text.into(),
            position,
            next_id: None,
            prev_ids: SmallVec::new(),
            selected_callbacks: BTreeSet::new(),
            body,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: NodeId,
        text: String,
        position: Position,
        next_id: Option<NodeId>,
        prev_ids: SmallVec<[NodeId; 2]>,
        selected_callbacks: BTreeSet<SmolStr>,
        body: NodeBody,
    ) -> Self {
        Self {
            id,
            text,
            position,
            next_id,
            prev_ids,
            selected_callbacks,
            body,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::Speech { .. } => NodeKind::Speech,
            NodeBody::Response => NodeKind::Response,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn next_id(&self) -> Option<NodeId> {
        self.next_id
    }

    pub(crate) fn set_next_id(&mut self, next_id: Option<NodeId>) {
        self.next_id = next_id;
    }

    pub fn prev_ids(&self) -> &[NodeId] {
        &self.prev_ids
    }

    pub(crate) fn record_prev(&mut self, node_id: NodeId) {
        if !self.prev_ids.contains(&node_id) {
            self.prev_ids.push(node_id);
        }
    }

    pub(crate) fn forget_prev(&mut self, node_id: NodeId) {
        self.prev_ids.retain(|id| *id != node_id);
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    /// `false` for a `Response` node, which has no such concept.
    pub fn expects_response(&self) -> bool {
        match self.body {
            NodeBody::Speech {
                expects_response, ..
            } => expects_response,
            NodeBody::Response => false,
        }
    }

    /// Ignored on a `Response` node.
    pub fn set_expects_response(&mut self, expects: bool) {
        if let NodeBody::Speech {
            expects_response, ..
        } = &mut self.body
        {
            *expects_response = expects;
        }
    }

    /// Empty for a `Response` node.
    pub fn response_ids(&self) -> &[NodeId] {
        match &self.body {
            NodeBody::Speech { response_ids, .. } => response_ids,
            NodeBody::Response => &[],
        }
    }

    pub(crate) fn push_response(&mut self, node_id: NodeId) {
        if let NodeBody::Speech { response_ids, .. } = &mut self.body {
            if !response_ids.contains(&node_id) {
                response_ids.push(node_id);
            }
        }
    }

    pub(crate) fn remove_response(&mut self, node_id: NodeId) {
        if let NodeBody::Speech { response_ids, .. } = &mut self.body {
            response_ids.retain(|id| *id != node_id);
        }
    }

    pub fn selected_callbacks(&self) -> &BTreeSet<SmolStr> {
        &self.selected_callbacks
    }

    pub(crate) fn selected_callbacks_mut(&mut self) -> &mut BTreeSet<SmolStr> {
        &mut self.selected_callbacks
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeBody, NodeKind, Position};
    use crate::model::NodeId;

    #[test]
    fn speech_node_starts_unbranched() {
        let node = Node::new(NodeId::new(0), NodeKind::Speech, "Hello", Position::default());

        assert_eq!(node.kind(), NodeKind::Speech);
        assert_eq!(node.text(), "Hello");
        assert_eq!(node.next_id(), None);
        assert!(node.prev_ids().is_empty());
        assert!(node.response_ids().is_empty());
        assert!(!node.expects_response());
        assert!(node.selected_callbacks().is_empty());
    }

    #[test]
    fn response_node_has_no_branching_fields() {
        let mut node = Node::new(NodeId::new(3), NodeKind::Response, "Yes", Position::default());

        assert_eq!(node.kind(), NodeKind::Response);
        assert_eq!(node.body(), &NodeBody::Response);

        node.set_expects_response(true);
        assert!(!node.expects_response());

        node.push_response(NodeId::new(4));
        assert!(node.response_ids().is_empty());
    }

    #[test]
    fn prev_bookkeeping_deduplicates() {
        let mut node = Node::new(NodeId::new(1), NodeKind::Speech, "Hi", Position::default());

        node.record_prev(NodeId::new(0));
        node.record_prev(NodeId::new(0));
        assert_eq!(node.prev_ids(), [NodeId::new(0)]);

        node.forget_prev(NodeId::new(0));
        assert!(node.prev_ids().is_empty());
    }
}
