use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use life_core::{EngineConfig, ValueGoalLinking};
use life_store::{DashboardSnapshot, LifeStore, Session};
use tracing::{debug, info, warn};

const WATCH_POLL: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub(crate) roots: Vec<PathBuf>,
    pub(crate) user_id: Option<String>,
    pub(crate) engine: EngineConfig,
    pub(crate) today: Option<NaiveDate>,
    pub(crate) watch: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the `LIFEOS_*` settings through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(root) = lookup("LIFEOS_ROOT") {
            config.push_root(PathBuf::from(root));
        }
        if let Some(list) = lookup("LIFEOS_ROOTS") {
            for path in std::env::split_paths(&list) {
                config.push_root(path);
            }
        }
        config.user_id = lookup("LIFEOS_USER_ID")
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        if let Some(linking) = lookup("LIFEOS_VALUE_GOAL_LINKING") {
            let linking: ValueGoalLinking = linking.parse().map_err(|err: String| anyhow!(err))?;
            config.engine = config.engine.with_linking(linking);
        }
        if let Some(days) = lookup("LIFEOS_TREND_DAYS") {
            match days.trim().parse::<u32>() {
                Ok(value) if value > 0 => config.engine = config.engine.with_trend_window(value),
                _ => warn!(value = %days, "ignoring invalid LIFEOS_TREND_DAYS"),
            }
        }
        if let Some(today) = lookup("LIFEOS_TODAY") {
            let date = NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d")
                .with_context(|| format!("LIFEOS_TODAY `{today}` is not a YYYY-MM-DD date"))?;
            config.today = Some(date);
        }
        if let Some(watch) = lookup("LIFEOS_WATCH") {
            config.watch = matches!(watch.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(config)
    }

    pub(crate) fn push_root(&mut self, path: PathBuf) {
        if !self.roots.contains(&path) {
            info!(path = %path.display(), "registering snapshot root");
            self.roots.push(path);
        }
    }

    pub(crate) fn session(&self) -> Result<Session> {
        self.user_id
            .as_deref()
            .map(Session::new)
            .context("LIFEOS_USER_ID must name the user whose rows are reported")
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

pub fn build_store(config: &AppConfig) -> Result<LifeStore> {
    let mut builder = LifeStore::builder().with_config(config.engine.clone());
    for root in &config.roots {
        builder = builder.add_root(root);
    }
    builder.build().context("unable to load snapshot roots")
}

pub fn render(snapshot: &DashboardSnapshot, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, snapshot)?;
    writeln!(out)?;
    Ok(())
}

pub fn run(config: AppConfig) -> Result<()> {
    if config.roots.is_empty() {
        warn!("no snapshot roots configured; reporting an empty dashboard");
    }
    let session = config.session()?;
    let mut store = build_store(&config)?;
    let stdout = std::io::stdout();

    let snapshot = store.dashboard_snapshot(&session, config.today())?;
    render(&snapshot, &mut stdout.lock())?;

    if !config.watch {
        return Ok(());
    }

    store.watch()?;
    info!("watching snapshot roots for changes");
    loop {
        std::thread::sleep(WATCH_POLL);
        if !store.is_stale() {
            continue;
        }
        debug!("snapshot changed, recomputing dashboard");
        let snapshot = store.dashboard_snapshot(&session, config.today())?;
        render(&snapshot, &mut stdout.lock())?;
    }
}
