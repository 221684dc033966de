// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for dialogue graphs.
//!
//! Every structural rule lives here; the presentation adapter calls these
//! in response to canvas gestures and may surface rejections as toasts. A
//! rejected operation never mutates the `State`.

use std::fmt;

use smol_str::SmolStr;

use crate::model::{
    Link, LinkId, Node, NodeId, NodeKind, PinId, PinRole, Position, State, ROOT_NODE_ID,
};

/// Text and placement of the auto-spawned root node.
pub const ROOT_TEXT: &str = "Conversation starter";
pub const ROOT_POSITION: Position = Position::new(150.0, 400.0);

/// Default texts for nodes spawned by dropping a link on empty canvas.
pub const DEFAULT_SPEECH_TEXT: &str = "This is interesting...";
pub const DEFAULT_RESPONSE_TEXT: &str = "Yes/No";

/// Why a mutation was refused. The state is untouched whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    UnknownNode { node_id: NodeId },
    ResponseToResponse { start: NodeId, end: NodeId },
    ResponseNotExpected { start: NodeId, end: NodeId },
    AlreadyLinked { node_id: NodeId },
    RootIsPermanent,
    UnknownCallback { tag: SmolStr },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode { node_id } => write!(f, "node not found (id={node_id})"),
            Self::ResponseToResponse { start, end } => {
                write!(
                    f,
                    "a response may not point at another response (start={start}, end={end})"
                )
            }
            Self::ResponseNotExpected { start, end } => {
                write!(
                    f,
                    "speech node {start} does not expect responses (end={end})"
                )
            }
            Self::AlreadyLinked { node_id } => {
                write!(f, "node {node_id} already has an outgoing connection")
            }
            Self::RootIsPermanent => f.write_str("the root node cannot be removed"),
            Self::UnknownCallback { tag } => {
                write!(f, "callback tag not in vocabulary ({tag})")
            }
        }
    }
}

impl std::error::Error for Rejection {}

/// Fresh document with the root speech node (id 0) already spawned.
pub fn new_document() -> State {
    let mut state = State::new();
    add_node(&mut state, ROOT_TEXT, NodeKind::Speech, ROOT_POSITION);
    state
}

/// Inserts a new node; ids are monotone and never reused.
pub fn add_node(
    state: &mut State,
    text: impl Into<String>,
    kind: NodeKind,
    position: Position,
) -> NodeId {
    let node_id = state.issue_node_id();
    state
        .nodes_mut()
        .insert(node_id, Node::new(node_id, kind, text, position));
    node_id
}

/// Connects two already-existing nodes by their pins.
///
/// The start pin decodes under `Output`, the end pin under `Input`.
/// Speech -> Speech sets the successor; Speech -> Response appends to the
/// response branch (only if the speech expects responses); Response ->
/// Speech creates the link without touching node fields; Response ->
/// Response is refused.
pub fn connect(state: &mut State, start_pin: PinId, end_pin: PinId) -> Result<LinkId, Rejection> {
    let start_id = start_pin.node_id(PinRole::Output);
    let end_id = end_pin.node_id(PinRole::Input);

    let Some(start) = state.node(start_id) else {
        return Err(Rejection::UnknownNode { node_id: start_id });
    };
    let start_kind = start.kind();
    let start_expects = start.expects_response();
    let displaced_next = start.next_id();

    let Some(end) = state.node(end_id) else {
        return Err(Rejection::UnknownNode { node_id: end_id });
    };
    let end_kind = end.kind();

    match (start_kind, end_kind) {
        (NodeKind::Speech, NodeKind::Response) => {
            if !start_expects {
                return Err(Rejection::ResponseNotExpected {
                    start: start_id,
                    end: end_id,
                });
            }
            if let Some(start) = state.node_mut(start_id) {
                start.push_response(end_id);
            }
            if let Some(end) = state.node_mut(end_id) {
                end.record_prev(start_id);
            }
        }
        (NodeKind::Speech, NodeKind::Speech) => {
            if let Some(start) = state.node_mut(start_id) {
                start.set_next_id(Some(end_id));
            }
            if let Some(end) = state.node_mut(end_id) {
                end.record_prev(start_id);
            }
            // A successor displaced by re-pointing must not keep a stale
            // back-reference.
            if let Some(old_next) = displaced_next.filter(|id| *id != end_id) {
                if let Some(old) = state.node_mut(old_next) {
                    old.forget_prev(start_id);
                }
            }
        }
        (NodeKind::Response, NodeKind::Response) => {
            return Err(Rejection::ResponseToResponse {
                start: start_id,
                end: end_id,
            });
        }
        (NodeKind::Response, NodeKind::Speech) => {
            // Link only; the canvas edge is the sole record of this pair.
        }
    }

    Ok(insert_link(state, start_pin, end_pin))
}

/// Spawns a new node at the cursor and links the dragged pin to it.
///
/// An `expects_response` source grows a new response branch; a source with
/// no successor yet grows a linear speech continuation; anything else is
/// refused, since a node has at most one outgoing flow edge outside the
/// response-branch case.
pub fn drop_create(
    state: &mut State,
    start_pin: PinId,
    cursor: Position,
) -> Result<NodeId, Rejection> {
    let source_id = start_pin.node_id(PinRole::Output);
    let Some(source) = state.node(source_id) else {
        return Err(Rejection::UnknownNode { node_id: source_id });
    };
    let expects_response = source.expects_response();
    let has_successor = source.next_id().is_some();

    if expects_response {
        let new_id = add_node(state, DEFAULT_RESPONSE_TEXT, NodeKind::Response, cursor);
        if let Some(new) = state.node_mut(new_id) {
            new.record_prev(source_id);
        }
        if let Some(source) = state.node_mut(source_id) {
            source.push_response(new_id);
        }
        insert_link(state, start_pin, PinId::encode(new_id, PinRole::Input));
        return Ok(new_id);
    }

    if has_successor {
        return Err(Rejection::AlreadyLinked { node_id: source_id });
    }

    let new_id = add_node(state, DEFAULT_SPEECH_TEXT, NodeKind::Speech, cursor);
    if let Some(new) = state.node_mut(new_id) {
        new.record_prev(source_id);
    }
    if let Some(source) = state.node_mut(source_id) {
        source.set_next_id(Some(new_id));
    }
    insert_link(state, start_pin, PinId::encode(new_id, PinRole::Input));
    Ok(new_id)
}

/// Removes a node, every link touching it, and every neighbor reference to
/// it. The root node (id 0) is refused.
pub fn remove_node(state: &mut State, node_id: NodeId) -> Result<(), Rejection> {
    if node_id == ROOT_NODE_ID {
        return Err(Rejection::RootIsPermanent);
    }
    let Some(node) = state.nodes_mut().remove(&node_id) else {
        return Err(Rejection::UnknownNode { node_id });
    };

    let touching = state
        .links()
        .values()
        .filter(|link| link.touches(node_id))
        .map(Link::id)
        .collect::<Vec<_>>();
    for link_id in touching {
        state.links_mut().remove(&link_id);
    }

    let was_response = node.kind() == NodeKind::Response;
    for prev_id in node.prev_ids() {
        if let Some(prev) = state.node_mut(*prev_id) {
            if prev.next_id() == Some(node_id) {
                prev.set_next_id(None);
            }
            if was_response {
                prev.remove_response(node_id);
            }
        }
    }

    if let Some(next_id) = node.next_id() {
        if let Some(next) = state.node_mut(next_id) {
            next.forget_prev(node_id);
        }
    }

    for response_id in node.response_ids() {
        if let Some(response) = state.node_mut(*response_id) {
            response.forget_prev(node_id);
        }
    }

    Ok(())
}

/// Batch removal: each id is processed independently in one pass, skipping
/// rejections; deleting a node never cascades to its descendants. Returns
/// how many nodes were removed.
pub fn remove_nodes(state: &mut State, node_ids: &[NodeId]) -> usize {
    node_ids
        .iter()
        .filter(|node_id| remove_node(state, **node_id).is_ok())
        .count()
}

/// Toggles a vocabulary tag on a node; returns whether the tag is now
/// selected. Tags outside the vocabulary are refused so a selection can
/// never dangle.
pub fn toggle_callback(state: &mut State, node_id: NodeId, tag: &str) -> Result<bool, Rejection> {
    if !state.callbacks().contains(tag) {
        return Err(Rejection::UnknownCallback {
            tag: SmolStr::new(tag),
        });
    }
    let Some(node) = state.node_mut(node_id) else {
        return Err(Rejection::UnknownNode { node_id });
    };

    let selected = node.selected_callbacks_mut();
    if selected.remove(tag) {
        Ok(false)
    } else {
        selected.insert(SmolStr::new(tag));
        Ok(true)
    }
}

/// Removes a tag from the vocabulary and from every node's selection.
pub fn delete_callback_tag(state: &mut State, tag: &str) -> Result<(), Rejection> {
    if !state.callbacks_mut().remove(tag) {
        return Err(Rejection::UnknownCallback {
            tag: SmolStr::new(tag),
        });
    }
    for node in state.nodes_mut().values_mut() {
        node.selected_callbacks_mut().remove(tag);
    }
    Ok(())
}

fn insert_link(state: &mut State, start_pin: PinId, end_pin: PinId) -> LinkId {
    let link_id = state.issue_link_id();
    state
        .links_mut()
        .insert(link_id, Link::new(link_id, start_pin, end_pin));
    link_id
}
