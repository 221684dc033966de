// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapshot and export serialization.
//!
//! The snapshot format round-trips the whole `State` including positions,
//! predecessor bookkeeping, and the id counters, so a reloaded document
//! never reuses an id issued before the save. The export format is the
//! flat array a game runtime walks at play time; it omits everything that
//! only matters to the editor.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::model::{
    Link, LinkId, Node, NodeBody, NodeId, NodeKind, PinId, Position, State,
};

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    /// The file is not a snapshot: malformed JSON or a required key is
    /// missing. The caller's in-memory state is untouched.
    InvalidFile {
        source: serde_json::Error,
    },
    Serialize {
        source: serde_json::Error,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::InvalidFile { source } => write!(f, "invalid snapshot file: {source}"),
            Self::Serialize { source } => write!(f, "cannot serialize state: {source}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidFile { source } => Some(source),
            Self::Serialize { source } => Some(source),
            Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotJson {
    nodes: Vec<SnapshotNodeJson>,
    links: Vec<SnapshotLinkJson>,
    /// Highest node id issued so far, `-1` when none was.
    next_node_id: i64,
    next_link_id: i64,
    callback_vocabulary: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotNodeJson {
    id: u32,
    kind: NodeKindJson,
    text: String,
    position: PositionJson,
    next_id: Option<u32>,
    #[serde(default)]
    prev_ids: Vec<u32>,
    #[serde(default)]
    response_ids: Vec<u32>,
    #[serde(default)]
    expects_response: bool,
    #[serde(default)]
    selected_callbacks: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotLinkJson {
    id: u32,
    start_endpoint: u32,
    end_endpoint: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PositionJson {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NodeKindJson {
    Speech,
    Response,
}

impl From<NodeKind> for NodeKindJson {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Speech => Self::Speech,
            NodeKind::Response => Self::Response,
        }
    }
}

impl From<NodeKindJson> for NodeKind {
    fn from(kind: NodeKindJson) -> Self {
        match kind {
            NodeKindJson::Speech => Self::Speech,
            NodeKindJson::Response => Self::Response,
        }
    }
}

/// Runtime-export shape: no positions, no predecessor bookkeeping, no
/// vocabulary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportNodeJson<'a> {
    id: u32,
    kind: NodeKindJson,
    text: &'a str,
    next_id: Option<u32>,
    response_ids: Vec<u32>,
    selected_callbacks: Vec<&'a str>,
}

fn state_to_snapshot(state: &State) -> SnapshotJson {
    let nodes = state
        .nodes()
        .values()
        .map(|node| SnapshotNodeJson {
            id: node.id().value(),
            kind: node.kind().into(),
            text: node.text().to_owned(),
            position: PositionJson {
                x: node.position().x,
                y: node.position().y,
            },
            next_id: node.next_id().map(NodeId::value),
            prev_ids: node.prev_ids().iter().map(|id| id.value()).collect(),
            response_ids: node.response_ids().iter().map(|id| id.value()).collect(),
            expects_response: node.expects_response(),
            selected_callbacks: node
                .selected_callbacks()
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
        .collect();

    let links = state
        .links()
        .values()
        .map(|link| SnapshotLinkJson {
            id: link.id().value(),
            start_endpoint: link.start_pin().raw(),
            end_endpoint: link.end_pin().raw(),
        })
        .collect();

    SnapshotJson {
        nodes,
        links,
        next_node_id: state
            .last_issued_node_id()
            .map_or(-1, |id| i64::from(id.value())),
        next_link_id: state
            .last_issued_link_id()
            .map_or(-1, |id| i64::from(id.value())),
        callback_vocabulary: state
            .callbacks()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

fn state_from_snapshot(snapshot: SnapshotJson) -> State {
    let mut state = State::new();

    for node_json in snapshot.nodes {
        let node_id = NodeId::new(node_json.id);
        let body = match NodeKind::from(node_json.kind) {
            NodeKind::Speech => NodeBody::Speech {
                response_ids: node_json
                    .response_ids
                    .into_iter()
                    .map(NodeId::new)
                    .collect(),
                expects_response: node_json.expects_response,
            },
            NodeKind::Response => NodeBody::Response,
        };

        let node = Node::from_parts(
            node_id,
            node_json.text,
            Position::new(node_json.position.x, node_json.position.y),
            node_json.next_id.map(NodeId::new),
            node_json
                .prev_ids
                .into_iter()
                .map(NodeId::new)
                .collect::<SmallVec<[NodeId; 2]>>(),
            node_json
                .selected_callbacks
                .into_iter()
                .map(SmolStr::new)
                .collect::<BTreeSet<SmolStr>>(),
            body,
        );
        state.nodes_mut().insert(node_id, node);
    }

    for link_json in snapshot.links {
        let link_id = LinkId::new(link_json.id);
        state.links_mut().insert(
            link_id,
            Link::new(
                link_id,
                PinId::from_raw(link_json.start_endpoint),
                PinId::from_raw(link_json.end_endpoint),
            ),
        );
    }

    state.restore_counters(
        u32::try_from(snapshot.next_node_id).ok().map(NodeId::new),
        u32::try_from(snapshot.next_link_id).ok().map(LinkId::new),
    );

    for tag in snapshot.callback_vocabulary {
        state.callbacks_mut().insert(SmolStr::new(tag));
    }

    state
}

pub fn snapshot_to_vec(state: &State) -> Result<Vec<u8>, StoreError> {
    let snapshot = state_to_snapshot(state);
    let mut bytes = serde_json::to_vec_pretty(&snapshot)
        .map_err(|source| StoreError::Serialize { source })?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn state_from_slice(bytes: &[u8]) -> Result<State, StoreError> {
    let snapshot: SnapshotJson =
        serde_json::from_slice(bytes).map_err(|source| StoreError::InvalidFile { source })?;
    Ok(state_from_snapshot(snapshot))
}

/// Runtime export, ascending by node id.
pub fn export_to_vec(state: &State) -> Result<Vec<u8>, StoreError> {
    let nodes = state
        .nodes()
        .values()
        .map(|node| ExportNodeJson {
            id: node.id().value(),
            kind: node.kind().into(),
            text: node.text(),
            next_id: node.next_id().map(NodeId::value),
            response_ids: node.response_ids().iter().map(|id| id.value()).collect(),
            selected_callbacks: node
                .selected_callbacks()
                .iter()
                .map(SmolStr::as_str)
                .collect(),
        })
        .collect::<Vec<_>>();

    let mut bytes =
        serde_json::to_vec_pretty(&nodes).map_err(|source| StoreError::Serialize { source })?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn save_snapshot(
    state: &State,
    path: &Path,
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let bytes = snapshot_to_vec(state)?;
    write_atomic(path, &bytes, durability)
}

pub fn load_snapshot(path: &Path) -> Result<State, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    state_from_slice(&bytes)
}

pub fn export_dialogue(
    state: &State,
    path: &Path,
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let bytes = export_to_vec(state)?;
    write_atomic(path, &bytes, durability)
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".fabula.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
