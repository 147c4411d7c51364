use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use life_core::{
    analytics::{self, HabitAnalytics},
    compute_dashboard,
    hierarchy::{self, HierarchyTree},
    model::LifeCollections,
    pipeline::{self, PipelineStats},
    streak, Dashboard, EngineConfig, Rollup, RollupCounts,
};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::session::Session;
use crate::snapshot::{self, SnapshotFile};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub user_id: String,
    pub dashboard: Dashboard,
}

/// In-memory cache of exported row collections, answering per-user queries by
/// running the aggregation engine over the cached rows.
pub struct LifeStore {
    roots: Vec<PathBuf>,
    seed: LifeCollections,
    files: RwLock<Vec<SnapshotFile>>,
    config: EngineConfig,
    stale: Arc<AtomicBool>,
    watcher: Option<RecommendedWatcher>,
}

pub struct LifeStoreBuilder {
    roots: Vec<PathBuf>,
    seed: LifeCollections,
    config: EngineConfig,
}

impl LifeStoreBuilder {
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            seed: LifeCollections::default(),
            config: EngineConfig::default(),
        }
    }

    pub fn add_root(mut self, path: impl AsRef<Path>) -> Self {
        Self::push_unique(&mut self.roots, path.as_ref().to_path_buf());
        self
    }

    /// Rows that did not come from a snapshot root, e.g. fetched elsewhere. They
    /// precede anything loaded from disk and survive reloads.
    pub fn with_collections(mut self, collections: LifeCollections) -> Self {
        self.seed.merge(collections);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<LifeStore> {
        let store = LifeStore {
            roots: self.roots,
            seed: self.seed,
            files: RwLock::new(Vec::new()),
            config: self.config,
            stale: Arc::new(AtomicBool::new(false)),
            watcher: None,
        };
        store.reload_all()?;
        Ok(store)
    }

    fn push_unique(vec: &mut Vec<PathBuf>, path: PathBuf) {
        if !vec.contains(&path) {
            vec.push(path);
        }
    }
}

impl Default for LifeStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeStore {
    pub fn builder() -> LifeStoreBuilder {
        LifeStoreBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[instrument(skip(self), fields(roots = self.roots.len()))]
    pub fn reload_all(&self) -> Result<()> {
        // cleared before scanning so a change seen mid-load is not lost
        self.stale.store(false, Ordering::SeqCst);
        let mut loaded = Vec::new();
        for root in &self.roots {
            match snapshot::scan_root(root) {
                Ok(files) => loaded.extend(files),
                Err(err) => {
                    self.mark_stale();
                    return Err(err.into());
                }
            }
        }
        let rows: usize = loaded.iter().map(|file| file.rows.row_count()).sum();
        tracing::info!(files = loaded.len(), rows, "snapshot loaded");
        *self.files.write() = loaded;
        Ok(())
    }

    /// Reloads when the watcher has seen a change since the last load.
    pub fn refresh_if_stale(&self) -> Result<bool> {
        if !self.stale.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.reload_all()?;
        Ok(true)
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    pub fn mark_stale(&self) {
        self.stale.store(true, Ordering::SeqCst);
    }

    pub fn loaded_files(&self) -> Vec<PathBuf> {
        self.files.read().iter().map(|file| file.path.clone()).collect()
    }

    /// The session user's rows, seed first, then files in load order. A pending
    /// reload is applied before the rows are read.
    pub fn collections(&self, session: &Session) -> Result<LifeCollections> {
        self.refresh_if_stale()?;
        let mut all = self.seed.clone();
        for file in self.files.read().iter() {
            all.merge(file.rows.clone());
        }
        Ok(session.scope(&all))
    }

    pub fn hierarchy(&self, session: &Session) -> Result<HierarchyTree> {
        Ok(hierarchy::build_hierarchy(
            &self.collections(session)?,
            self.config.value_goal_linking,
        ))
    }

    pub fn rollup(&self, session: &Session) -> Result<RollupCounts> {
        Ok(self.hierarchy(session)?.rollup())
    }

    pub fn pipeline(&self, session: &Session, pillar_id: &str) -> Result<PipelineStats> {
        let tree = self.hierarchy(session)?;
        let pillar = tree
            .pillar(pillar_id)
            .ok_or_else(|| anyhow!("pillar `{pillar_id}` not loaded"))?;
        Ok(pipeline::pipeline_stats(pillar))
    }

    pub fn habit_analytics(&self, session: &Session, today: NaiveDate) -> Result<HabitAnalytics> {
        let collections = self.collections(session)?;
        Ok(analytics::analyze_habits(
            &collections.habits,
            &collections.habit_logs,
            today,
            &self.config,
        ))
    }

    pub fn current_streak(&self, session: &Session, habit_id: &str, today: NaiveDate) -> Result<u32> {
        let collections = self.collections(session)?;
        let habit = collections
            .habits
            .iter()
            .find(|habit| habit.id == habit_id)
            .ok_or_else(|| anyhow!("habit `{habit_id}` not loaded"))?;
        Ok(streak::current_streak(habit.habit_type, &collections.logs_for(habit_id), today))
    }

    #[instrument(skip(self, session), fields(user = %session.user_id))]
    pub fn dashboard_snapshot(&self, session: &Session, today: NaiveDate) -> Result<DashboardSnapshot> {
        let dashboard = compute_dashboard(&self.collections(session)?, today, &self.config);
        if !dashboard.tree.unattached.is_empty() {
            tracing::warn!(
                unattached = dashboard.tree.unattached.len(),
                "some rows reference a missing parent"
            );
        }
        Ok(DashboardSnapshot {
            user_id: session.user_id.clone(),
            dashboard,
        })
    }

    pub fn watch(&mut self) -> Result<()> {
        if self.watcher.is_some() {
            return Ok(());
        }
        let stale = Arc::clone(&self.stale);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    tracing::debug!(?event, "snapshot change detected");
                    stale.store(true, Ordering::SeqCst);
                }
                Err(err) => tracing::warn!(%err, "snapshot watcher error"),
            }
        })?;
        for root in &self.roots {
            watcher.watch(root, Self::watch_mode(root))?;
        }
        self.watcher = Some(watcher);
        Ok(())
    }
}

impl LifeStore {
    fn watch_mode(path: &Path) -> RecursiveMode {
        if path.is_file() {
            RecursiveMode::NonRecursive
        } else {
            RecursiveMode::Recursive
        }
    }
}
