// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a dialogue graph, for info panels and link
//! maintenance in the presentation adapter.

use crate::model::{LinkId, NodeId, NodeKind, State};

pub fn node_count(state: &State) -> usize {
    state.nodes().len()
}

pub fn count_of_kind(state: &State, kind: NodeKind) -> usize {
    state
        .nodes()
        .values()
        .filter(|node| node.kind() == kind)
        .count()
}

/// Ids of every link that starts or ends at the node, in id order.
pub fn connected_link_ids(state: &State, node_id: NodeId) -> Vec<LinkId> {
    state
        .links()
        .values()
        .filter(|link| link.touches(node_id))
        .map(|link| link.id())
        .collect()
}

/// Flow targets of a node: its linear successor, or its response branches.
pub fn successors(state: &State, node_id: NodeId) -> Vec<NodeId> {
    let Some(node) = state.node(node_id) else {
        return Vec::new();
    };

    let responses = node.response_ids();
    if !responses.is_empty() {
        return responses.to_vec();
    }
    node.next_id().into_iter().collect()
}
