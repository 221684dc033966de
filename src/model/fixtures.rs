// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use super::state::State;
use super::{NodeId, PinId, PinRole, Position, ROOT_NODE_ID};
use crate::ops;

fn output_pin(node_id: NodeId) -> PinId {
    PinId::encode(node_id, PinRole::Output)
}

/// Root speech followed by two linear speech nodes: `0 -> 1 -> 2`.
pub(crate) fn linear_conversation() -> State {
    let mut state = ops::new_document();
    let middle = ops::drop_create(&mut state, output_pin(ROOT_NODE_ID), Position::new(300.0, 400.0))
        .expect("fixture drop_create");
    ops::drop_create(&mut state, output_pin(middle), Position::new(450.0, 400.0))
        .expect("fixture drop_create");
    state
}

/// Root speech that expects responses and branches into two of them.
pub(crate) fn branching_conversation() -> State {
    let mut state = ops::new_document();
    state
        .node_mut(ROOT_NODE_ID)
        .expect("fixture root")
        .set_expects_response(true);
    ops::drop_create(&mut state, output_pin(ROOT_NODE_ID), Position::new(300.0, 300.0))
        .expect("fixture drop_create");
    ops::drop_create(&mut state, output_pin(ROOT_NODE_ID), Position::new(300.0, 500.0))
        .expect("fixture drop_create");
    state
}

/// Branching conversation with a small callback vocabulary, partly selected.
pub(crate) fn tagged_conversation() -> State {
    let mut state = branching_conversation();
    state.callbacks_mut().insert(SmolStr::new("quest_started"));
    state.callbacks_mut().insert(SmolStr::new("play_sting"));
    ops::toggle_callback(&mut state, ROOT_NODE_ID, "quest_started").expect("fixture toggle");
    state
}
