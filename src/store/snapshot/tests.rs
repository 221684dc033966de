// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{
    export_dialogue, export_to_vec, load_snapshot, save_snapshot, snapshot_to_vec,
    state_from_slice, StoreError, WriteDurability,
};
use crate::model::fixtures::{branching_conversation, linear_conversation, tagged_conversation};
use crate::model::{NodeId, PinRole, ROOT_NODE_ID};
use crate::ops;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("fabula-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[fixture]
fn tmp() -> TempDir {
    TempDir::new("snapshot")
}

#[rstest]
fn snapshot_file_round_trip_preserves_state(tmp: TempDir) {
    let state = tagged_conversation();
    let path = tmp.path().join("dialogue.json");

    save_snapshot(&state, &path, WriteDurability::default()).unwrap();
    let loaded = load_snapshot(&path).unwrap();

    assert_eq!(loaded, state);
}

#[rstest]
fn snapshot_keeps_counters_past_deleted_nodes(tmp: TempDir) {
    let mut state = linear_conversation();
    let last = state.last_issued_node_id().expect("issued ids");
    ops::remove_node(&mut state, last).unwrap();

    let path = tmp.path().join("dialogue.json");
    save_snapshot(&state, &path, WriteDurability::default()).unwrap();
    let mut loaded = load_snapshot(&path).unwrap();

    // Node 1 lost its successor above, it can grow a new one.
    let pin = crate::model::PinId::encode(NodeId::new(1), PinRole::Output);
    let reissued = ops::drop_create(&mut loaded, pin, crate::model::Position::default())
        .expect("drop_create after reload");
    assert!(reissued.value() > last.value());
}

#[test]
fn snapshot_bytes_use_camel_case_keys() {
    let state = branching_conversation();
    let bytes = snapshot_to_vec(&state).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert!(value.get("nodes").is_some());
    assert!(value.get("links").is_some());
    assert!(value.get("nextNodeId").is_some());
    assert!(value.get("nextLinkId").is_some());
    assert!(value.get("callbackVocabulary").is_some());

    let node = &value["nodes"][0];
    assert!(node.get("expectsResponse").is_some());
    assert!(node.get("selectedCallbacks").is_some());
    let link = &value["links"][0];
    assert!(link.get("startEndpoint").is_some());
    assert!(link.get("endEndpoint").is_some());
}

#[test]
fn empty_state_serializes_counters_as_minus_one() {
    let state = crate::model::State::new();
    let bytes = snapshot_to_vec(&state).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["nextNodeId"], serde_json::json!(-1));
    assert_eq!(value["nextLinkId"], serde_json::json!(-1));

    let loaded = state_from_slice(&bytes).unwrap();
    assert_eq!(loaded.last_issued_node_id(), None);
    assert_eq!(loaded.last_issued_link_id(), None);
}

#[test]
fn load_rejects_malformed_json() {
    let err = state_from_slice(b"{ not json").unwrap_err();
    assert!(matches!(err, StoreError::InvalidFile { .. }));
}

#[test]
fn load_rejects_missing_required_key() {
    // No "links" key.
    let bytes = br#"{
  "nodes": [],
  "nextNodeId": -1,
  "nextLinkId": -1,
  "callbackVocabulary": []
}"#;

    let err = state_from_slice(bytes).unwrap_err();
    assert!(matches!(err, StoreError::InvalidFile { .. }));
}

#[test]
fn load_ignores_unknown_keys() {
    let bytes = br#"{
  "nodes": [],
  "links": [],
  "nextNodeId": -1,
  "nextLinkId": -1,
  "callbackVocabulary": [],
  "editorVersion": "2.4.1"
}"#;

    let loaded = state_from_slice(bytes).unwrap();
    assert!(loaded.nodes().is_empty());
}

#[test]
fn export_omits_editor_only_fields_and_orders_by_id() {
    let state = tagged_conversation();
    let bytes = export_to_vec(&state).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let nodes = value.as_array().expect("export is a json array");
    assert_eq!(nodes.len(), state.nodes().len());

    let mut previous_id = -1_i64;
    for node in nodes {
        assert!(node.get("position").is_none());
        assert!(node.get("prevIds").is_none());
        assert!(node.get("id").is_some());
        assert!(node.get("kind").is_some());
        assert!(node.get("text").is_some());

        let id = node["id"].as_i64().expect("numeric id");
        assert!(id > previous_id);
        previous_id = id;
    }
}

#[rstest]
fn export_file_contains_selected_callbacks(tmp: TempDir) {
    let state = tagged_conversation();
    let path = tmp.path().join("runtime.json");

    export_dialogue(&state, &path, WriteDurability::Durable).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let root = value
        .as_array()
        .unwrap()
        .iter()
        .find(|node| node["id"] == serde_json::json!(ROOT_NODE_ID.value()))
        .expect("root node in export");
    assert_eq!(root["selectedCallbacks"], serde_json::json!(["quest_started"]));
}

#[rstest]
fn save_leaves_no_temp_files_behind(tmp: TempDir) {
    let state = linear_conversation();
    let path = tmp.path().join("dialogue.json");

    save_snapshot(&state, &path, WriteDurability::default()).unwrap();
    save_snapshot(&state, &path, WriteDurability::Durable).unwrap();

    let leftovers = std::fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with(".fabula.tmp.")
        })
        .count();
    assert_eq!(leftovers, 0);
}

#[rstest]
fn load_failure_leaves_caller_state_usable(tmp: TempDir) {
    let mut state = linear_conversation();
    let path = tmp.path().join("garbage.json");
    std::fs::write(&path, "not a snapshot").unwrap();

    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, StoreError::InvalidFile { .. }));

    // The old document keeps working after a failed load.
    let pin = crate::model::PinId::encode(NodeId::new(2), PinRole::Output);
    ops::drop_create(&mut state, pin, crate::model::Position::default()).unwrap();
    assert_eq!(state.nodes().len(), 4);
}

#[cfg(unix)]
#[rstest]
fn save_refuses_symlink_target(tmp: TempDir) {
    let state = linear_conversation();
    let target = tmp.path().join("real.json");
    std::fs::write(&target, "{}").unwrap();
    let link = tmp.path().join("alias.json");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let err = save_snapshot(&state, &link, WriteDurability::default()).unwrap_err();
    match err {
        StoreError::SymlinkRefused { path } => assert_eq!(path, link),
        other => panic!("expected SymlinkRefused, got: {other:?}"),
    }
}
