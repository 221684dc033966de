// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core dialogue graph data model.
//!
//! A `State` owns every node and link by value in id-keyed arenas;
//! everything else refers to entities by plain ids looked up through the
//! arenas, never by pointer.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod link;
pub mod node;
pub mod pins;
pub mod state;

pub use ids::{Id, LinkId, NodeId, ROOT_NODE_ID};
pub use link::Link;
pub use node::{Node, NodeBody, NodeKind, Position};
pub use pins::{PinId, PinRole};
pub use state::State;
