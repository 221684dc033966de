// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{LinkId, NodeId};
use super::pins::{PinId, PinRole};

/// A directed edge between two node pins, kept for rendering and export.
///
/// The start pin always carries the `Output` role and the end pin the
/// `Input` role; the mutator only constructs links whose endpoints decode
/// to live nodes in the same `State`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    id: LinkId,
    start_pin: PinId,
    end_pin: PinId,
}

impl Link {
    pub fn new(id: LinkId, start_pin: PinId, end_pin: PinId) -> Self {
        Self {
            id,
            start_pin,
            end_pin,
        }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn start_pin(&self) -> PinId {
        self.start_pin
    }

    pub fn end_pin(&self) -> PinId {
        self.end_pin
    }

    pub fn start_node_id(&self) -> NodeId {
        self.start_pin.node_id(PinRole::Output)
    }

    pub fn end_node_id(&self) -> NodeId {
        self.end_pin.node_id(PinRole::Input)
    }

    pub fn starts_at(&self, node_id: NodeId) -> bool {
        self.start_pin == PinId::encode(node_id, PinRole::Output)
    }

    pub fn ends_at(&self, node_id: NodeId) -> bool {
        self.end_pin == PinId::encode(node_id, PinRole::Input)
    }

    pub fn touches(&self, node_id: NodeId) -> bool {
        self.starts_at(node_id) || self.ends_at(node_id)
    }
}
