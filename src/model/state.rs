// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use smol_str::SmolStr;

use super::ids::{LinkId, NodeId};
use super::link::Link;
use super::node::Node;

/// The full dialogue document the editor runs against.
///
/// Nodes and links are owned by value in the arenas; everything else refers
/// to them by id. Iteration order over the arenas carries no meaning beyond
/// rendering. A document is replaced wholesale on load and discarded
/// wholesale on "new file".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    nodes: BTreeMap<NodeId, Node>,
    links: BTreeMap<LinkId, Link>,
    last_node_id: Option<NodeId>,
    last_link_id: Option<LinkId>,
    callbacks: BTreeSet<SmolStr>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    pub fn link(&self, link_id: LinkId) -> Option<&Link> {
        self.links.get(&link_id)
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn links(&self) -> &BTreeMap<LinkId, Link> {
        &self.links
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut BTreeMap<NodeId, Node> {
        &mut self.nodes
    }

    pub(crate) fn links_mut(&mut self) -> &mut BTreeMap<LinkId, Link> {
        &mut self.links
    }

    /// The tag vocabulary nodes select callbacks from.
    ///
    /// Adding a tag is a direct mutation on this set; removal must go
    /// through `ops::delete_callback_tag` so node selections are cascaded.
    pub fn callbacks(&self) -> &BTreeSet<SmolStr> {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut BTreeSet<SmolStr> {
        &mut self.callbacks
    }

    /// Highest node id issued so far, `None` for a fresh document.
    pub fn last_issued_node_id(&self) -> Option<NodeId> {
        self.last_node_id
    }

    pub fn last_issued_link_id(&self) -> Option<LinkId> {
        self.last_link_id
    }

    pub(crate) fn issue_node_id(&mut self) -> NodeId {
        let next = NodeId::new(self.last_node_id.map_or(0, |id| id.value() + 1));
        self.last_node_id = Some(next);
        next
    }

    pub(crate) fn issue_link_id(&mut self) -> LinkId {
        let next = LinkId::new(self.last_link_id.map_or(0, |id| id.value() + 1));
        self.last_link_id = Some(next);
        next
    }

    pub(crate) fn restore_counters(
        &mut self,
        last_node_id: Option<NodeId>,
        last_link_id: Option<LinkId>,
    ) {
        self.last_node_id = last_node_id;
        self.last_link_id = last_link_id;
    }
}
