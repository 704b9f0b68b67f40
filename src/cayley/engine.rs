use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

use crate::{
    error::{GroupError, Result},
    generators::GeneratorSet,
    permutation::Perm,
};

use super::{
    histogram::Histogram,
    path::Path,
    table::{BuildConfig, CayleyTable},
    ShortestPath,
};

/// A [`CayleyTable`] that is built on request and then shared read-only.
///
/// Queries made before [`CayleyEngine::build`] completes fail with
/// [`GroupError::EngineNotReady`]. Building twice is a no-op.
///
/// ```no_run
/// # use kiss::{cayley::{CayleyEngine, ShortestPath}, permutation::Perm};
/// let engine = CayleyEngine::icosahedral()?;
/// engine.build()?;
/// assert_eq!(engine.distance(&Perm::id())?, 0);
/// # Ok::<(), kiss::error::GroupError>(())
/// ```
#[derive(Debug)]
pub struct CayleyEngine {
    generators: Arc<GeneratorSet>,
    config: BuildConfig,
    table: OnceLock<CayleyTable>,
    build_lock: Mutex<()>,
}

impl CayleyEngine {
    pub fn new(generators: GeneratorSet) -> Self {
        Self::with_config(generators, BuildConfig::default())
    }

    pub fn with_config(generators: GeneratorSet, config: BuildConfig) -> Self {
        CayleyEngine {
            generators: Arc::new(generators),
            config,
            table: OnceLock::new(),
            build_lock: Mutex::new(()),
        }
    }

    pub fn icosahedral() -> Result<Self> {
        Ok(Self::new(GeneratorSet::icosahedral()?))
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.table.get().is_some()
    }

    /// Builds the table unless it already exists.
    ///
    /// Concurrent callers wait for the first build instead of starting their
    /// own. A failed build leaves the engine unready.
    pub fn build(&self) -> Result<&CayleyTable> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(table) = self.table.get() {
            debug!("distance table built by another caller");
            return Ok(table);
        }
        let table = CayleyTable::build(self.generators.clone(), &self.config)?;
        Ok(self.table.get_or_init(|| table))
    }

    pub fn table(&self) -> Result<&CayleyTable> {
        self.table.get().ok_or(GroupError::EngineNotReady)
    }

    pub fn histogram(&self) -> Result<&Histogram> {
        self.table().map(CayleyTable::histogram)
    }
}

impl ShortestPath for CayleyEngine {
    fn generators(&self) -> &GeneratorSet {
        &self.generators
    }

    fn shortest_path(&self, target: &Perm) -> Result<Path> {
        self.table()?.shortest_path(target)
    }
}
