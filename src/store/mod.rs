// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for dialogue graphs on disk.
//!
//! The store module reads/writes the round-trippable snapshot format and
//! the one-way runtime export consumed by games.

pub mod snapshot;

pub use snapshot::{
    export_dialogue, export_to_vec, load_snapshot, save_snapshot, snapshot_to_vec,
    state_from_slice, StoreError, WriteDurability,
};
