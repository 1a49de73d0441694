//! Session pool and progress tracking
//!
//! At startup a fixed-size random subset of the catalog is drawn without
//! replacement and shuffled; that is the only randomization point in the
//! process lifetime. The pool shrinks monotonically as exercises are
//! solved and never regains a retired id.

mod timer;

pub use timer::SessionTimer;

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;
use std::time::Instant;
use tracing::info;

use crate::catalog::{Catalog, Exercise, ExerciseId};
use crate::config::SessionConfig;
use crate::error::{Error, Result};

/// One session: the sampled pool, the active exercise, and the countdown.
pub struct Session {
    catalog: Catalog,
    pool: Vec<ExerciseId>,
    active: Option<ExerciseId>,
    timer: SessionTimer,
}

impl Session {
    /// Draw the visible pool from the catalog.
    ///
    /// Sampling is without replacement, then the draw order is shuffled.
    /// Deterministic given `config.seed`.
    pub fn sample(catalog: Catalog, config: &SessionConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut pool: Vec<ExerciseId> = catalog
            .entries()
            .choose_multiple(&mut rng, config.pool_size)
            .map(|e| e.id)
            .collect();
        pool.shuffle(&mut rng);

        info!("session pool: {:?}", pool);

        Session {
            catalog,
            pool,
            active: None,
            timer: SessionTimer::new(config.countdown),
        }
    }

    /// Ids visible this session, in display order.
    pub fn pool(&self) -> &[ExerciseId] {
        &self.pool
    }

    /// The active exercise, if any.
    pub fn active(&self) -> Option<ExerciseId> {
        self.active
    }

    /// The session countdown.
    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    /// Mutable access for the event loop's tick handler.
    pub fn timer_mut(&mut self) -> &mut SessionTimer {
        &mut self.timer
    }

    /// Whether an id is still visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.pool.iter().any(|e| *e == id)
    }

    /// Whether every exercise has been solved.
    pub fn is_complete(&self) -> bool {
        self.pool.is_empty()
    }

    /// Activate an exercise and lazily start the countdown.
    ///
    /// Fails if the countdown has expired or the id is not in this
    /// session's pool (unknown, or already retired).
    pub fn activate(&mut self, id: &str, now: Instant) -> Result<&'static Exercise> {
        if self.timer.is_expired() {
            return Err(Error::Session(
                "session time expired - cannot load exercises".to_string(),
            ));
        }
        if !self.catalog.contains(id) {
            return Err(Error::Catalog(format!("unknown exercise '{}'", id)));
        }
        if !self.is_visible(id) {
            return Err(Error::Session(format!(
                "exercise '{}' is not available in this session",
                id
            )));
        }

        let exercise = self.catalog.get(id)?;
        self.active = Some(exercise.id);
        self.timer.start(now);
        Ok(exercise)
    }

    /// Deactivate without retiring (new file, open file).
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Retire the active exercise: remove it from the pool permanently.
    ///
    /// Returns the retired id, or `None` if no exercise was active.
    pub fn retire_active(&mut self) -> Option<ExerciseId> {
        let id = self.active.take()?;
        self.pool.retain(|e| *e != id);
        info!("exercise '{}' retired; {} remaining", id, self.pool.len());
        Some(id)
    }
}
