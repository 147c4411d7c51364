use std::fs;
use std::path::{Path, PathBuf};

use life_core::model::LifeCollections;
use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::error::StoreError;

/// Exported row files recognised inside a snapshot root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Pillars,
    Values,
    Goals,
    Projects,
    Tasks,
    Habits,
    HabitLogs,
    ValueGoalConnections,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 8] = [
        CollectionKind::Pillars,
        CollectionKind::Values,
        CollectionKind::Goals,
        CollectionKind::Projects,
        CollectionKind::Tasks,
        CollectionKind::Habits,
        CollectionKind::HabitLogs,
        CollectionKind::ValueGoalConnections,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            CollectionKind::Pillars => "pillars.json",
            CollectionKind::Values => "values.json",
            CollectionKind::Goals => "goals.json",
            CollectionKind::Projects => "projects.json",
            CollectionKind::Tasks => "tasks.json",
            CollectionKind::Habits => "habits.json",
            CollectionKind::HabitLogs => "habit_logs.json",
            CollectionKind::ValueGoalConnections => "value_goal_connections.json",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|kind| kind.file_name().eq_ignore_ascii_case(name))
    }
}

/// One collection file, already validated into typed rows.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    pub path: PathBuf,
    pub kind: CollectionKind,
    pub rows: LifeCollections,
}

impl SnapshotFile {
    pub fn load(path: impl AsRef<Path>, kind: CollectionKind) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let rows = parse_rows(&path, kind, &raw)?;
        Ok(Self { path, kind, rows })
    }
}

fn parse_rows(path: &Path, kind: CollectionKind, raw: &str) -> Result<LifeCollections, StoreError> {
    fn rows<T: DeserializeOwned>(path: &Path, raw: &str) -> Result<Vec<T>, StoreError> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(raw).map_err(|source| StoreError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    let mut collections = LifeCollections::default();
    match kind {
        CollectionKind::Pillars => collections.pillars = rows(path, raw)?,
        CollectionKind::Values => collections.values = rows(path, raw)?,
        CollectionKind::Goals => collections.goals = rows(path, raw)?,
        CollectionKind::Projects => collections.projects = rows(path, raw)?,
        CollectionKind::Tasks => collections.tasks = rows(path, raw)?,
        CollectionKind::Habits => collections.habits = rows(path, raw)?,
        CollectionKind::HabitLogs => collections.habit_logs = rows(path, raw)?,
        CollectionKind::ValueGoalConnections => collections.value_goal_connections = rows(path, raw)?,
    }
    Ok(collections)
}

/// Loads every recognised collection file under `root`, in file-name order.
/// A root may also point straight at a single collection file.
pub fn scan_root(root: &Path) -> Result<Vec<SnapshotFile>, StoreError> {
    if !root.exists() {
        return Err(StoreError::MissingRoot(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(kind) = CollectionKind::from_path(entry.path()) else {
            tracing::trace!(path = %entry.path().display(), "skipping unrecognised file");
            continue;
        };
        files.push(SnapshotFile::load(entry.path(), kind)?);
    }
    Ok(files)
}
