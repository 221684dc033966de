// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;

/// Which pin of a node a composite attribute id refers to.
///
/// The canvas labels every pin with one integer; the role picks the bit
/// offset the node id is shifted by, so the three pins of a node never
/// collide with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinRole {
    Input,
    StaticText,
    Output,
}

impl PinRole {
    pub const fn shift(self) -> u32 {
        match self {
            Self::Input => 8,
            Self::StaticText => 16,
            Self::Output => 24,
        }
    }
}

/// Composite attribute id: a node id shifted by its pin role.
///
/// Decoding requires knowing the role out-of-band; an arbitrary integer
/// does not self-describe which shift produced it. With the smallest shift
/// at 8 bits, node ids must stay at or below [`PinId::MAX_NODE_INDEX`]
/// before roles start colliding; that is the scale limit of the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(u32);

impl PinId {
    /// Highest node id the 8-bit `Input` shift can carry without colliding
    /// with the other roles.
    pub const MAX_NODE_INDEX: u32 = (1 << 8) - 1;

    pub const fn encode(node_id: NodeId, role: PinRole) -> Self {
        Self(node_id.value() << role.shift())
    }

    pub const fn node_id(self, role: PinRole) -> NodeId {
        NodeId::new(self.0 >> role.shift())
    }

    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}
