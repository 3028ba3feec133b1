//! Daily rule rotation with per-group bookkeeping persisted as JSON.
//!
//! Each registered group draws rules without repetition until every rule has
//! been shown, then starts over. The store file maps the group id (as a
//! string) to `{ "id", "used", "unused" }`.

use crate::corpus::{Corpus, Rule};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error returned when the group store cannot be read or written.
#[derive(Debug, Error)]
pub enum RotationError {
    #[error("failed to access group store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid group store JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Rotation state of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupState {
    pub id: i64,
    #[serde(default)]
    pub used: Vec<u32>,
    #[serde(default)]
    pub unused: Vec<u32>,
}

/// A rule drawn for a group, with the rotation progress after the draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPick {
    pub rule: Rule,
    pub used_count: usize,
    pub unused_count: usize,
}

/// JSON-backed store of group rotation state.
#[derive(Debug)]
pub struct GroupStore {
    path: PathBuf,
    groups: BTreeMap<String, GroupState>,
}

impl GroupStore {
    /// Open the store at `path`, creating an empty one if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RotationError> {
        let path = path.into();

        if !path.exists() {
            let store = Self {
                path,
                groups: BTreeMap::new(),
            };
            store.save()?;
            tracing::info!("Created empty group store at {}", store.path.display());
            return Ok(store);
        }

        let json = std::fs::read_to_string(&path).map_err(|source| RotationError::Io {
            path: path.clone(),
            source,
        })?;
        let groups = serde_json::from_str(&json).map_err(|source| RotationError::Parse {
            path: path.clone(),
            source,
        })?;

        Ok(Self { path, groups })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Registered groups, ordered by their string key.
    pub fn groups(&self) -> impl Iterator<Item = &GroupState> {
        self.groups.values()
    }

    pub fn get(&self, id: i64) -> Option<&GroupState> {
        self.groups.get(&id.to_string())
    }

    /// Register a group. Existing groups are left untouched.
    ///
    /// Returns `true` if the group was newly added.
    pub fn add_group(&mut self, id: i64, corpus: &Corpus) -> Result<bool, RotationError> {
        let key = id.to_string();
        if self.groups.contains_key(&key) {
            return Ok(false);
        }

        self.groups.insert(
            key,
            GroupState {
                id,
                used: Vec::new(),
                unused: corpus.numbers(),
            },
        );
        self.save()?;
        tracing::info!("Registered group {} for daily rules", id);
        Ok(true)
    }

    /// Unregister a group. Returns `true` if it existed.
    pub fn remove_group(&mut self, id: i64) -> Result<bool, RotationError> {
        if self.groups.remove(&id.to_string()).is_none() {
            return Ok(false);
        }
        self.save()?;
        tracing::info!("Removed group {} from daily rules", id);
        Ok(true)
    }

    /// Draw the next rule for group `id`.
    ///
    /// Unknown groups get `None`. When every rule has been used the rotation
    /// restarts from the used list (or from the corpus if both lists are
    /// empty). The draw is persisted even if the drawn number is no longer in
    /// the corpus, in which case `None` is returned.
    pub fn daily_rule<R: Rng + ?Sized>(
        &mut self,
        id: i64,
        corpus: &Corpus,
        rng: &mut R,
    ) -> Result<Option<DailyPick>, RotationError> {
        let Some(group) = self.groups.get_mut(&id.to_string()) else {
            tracing::debug!("Group {} is not registered for daily rules", id);
            return Ok(None);
        };

        if group.unused.is_empty() {
            if group.used.is_empty() {
                group.unused = corpus.numbers();
            } else {
                group.unused = std::mem::take(&mut group.used);
            }
            tracing::info!("Group {} finished a rotation, starting over", id);
        }

        let Some(&number) = group.unused.choose(rng) else {
            // Empty corpus: nothing to draw.
            return Ok(None);
        };

        if let Some(index) = group.unused.iter().position(|&n| n == number) {
            group.unused.remove(index);
        }
        group.used.push(number);
        let (used_count, unused_count) = (group.used.len(), group.unused.len());

        self.save()?;

        let Some(rule) = corpus.get(number) else {
            tracing::warn!("Group {} drew rule {} which is not in the corpus", id, number);
            return Ok(None);
        };

        Ok(Some(DailyPick {
            rule: rule.clone(),
            used_count,
            unused_count,
        }))
    }

    /// Write the store atomically: temp file in the same directory, then rename.
    fn save(&self) -> Result<(), RotationError> {
        let io_err = |source| RotationError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&self.groups).map_err(|source| {
            RotationError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}
