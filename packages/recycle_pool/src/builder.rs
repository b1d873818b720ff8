use std::any::type_name;
use std::fmt;

use crate::{BuildError, CullPolicy, Factory, PoolConfig, RecyclePool};

/// Builder for creating an instance of [`RecyclePool`].
///
/// Without further configuration, the pool starts empty, grows by one instance at a time, has
/// no hard limit and never culls.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use recycle_pool::{CullPolicy, Recyclable, RecyclePool, infallible};
///
/// #[derive(Default)]
/// struct Enemy {
///     spawned: bool,
/// }
///
/// impl Recyclable for Enemy {
///     fn set_active(&mut self, active: bool) {
///         self.spawned = active;
///     }
/// }
///
/// let pool = RecyclePool::builder(infallible(Enemy::default))
///     .preallocate(16)
///     .grow_batch_size(4)
///     .hard_limit(64)
///     .cull(CullPolicy::new(16, Duration::from_secs(10)))
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.idle_count(), 16);
/// ```
#[must_use]
pub struct RecyclePoolBuilder<F> {
    factory: F,
    config: PoolConfig,
}

impl<F> fmt::Debug for RecyclePoolBuilder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<F> RecyclePoolBuilder<F>
where
    F: Factory,
{
    pub(crate) fn new(factory: F) -> Self {
        Self {
            factory,
            config: PoolConfig::default(),
        }
    }

    /// Sets how many instances the pool constructs when it is built.
    ///
    /// If a hard limit is also set, at most that many instances are preallocated.
    pub fn preallocate(mut self, count: usize) -> Self {
        self.config.preallocate_count = count;
        self
    }

    /// Sets how many instances the pool constructs when an acquire finds the idle store empty.
    ///
    /// Must be at least 1. Defaults to 1.
    pub fn grow_batch_size(mut self, count: usize) -> Self {
        self.config.grow_batch_size = count;
        self
    }

    /// Caps the number of instances that may be on loan at the same time, and the number of
    /// instances the idle store may hold.
    ///
    /// Once `limit` instances are on loan, [`RecyclePool::acquire()`] returns `None` until one is
    /// released.
    pub fn hard_limit(mut self, limit: usize) -> Self {
        self.config.hard_limit = Some(limit);
        self
    }

    /// Enables culling of excess idle instances via [`RecyclePool::cull()`].
    pub fn cull(mut self, policy: CullPolicy) -> Self {
        self.config.cull = Some(policy);
        self
    }

    /// Validates the configuration, preallocates the configured number of instances and returns
    /// the pool.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ZeroGrowBatchSize`] if the grow batch size is zero,
    /// [`BuildError::CullTargetAboveHardLimit`] if the culling floor is above the hard limit and
    /// [`BuildError::Preallocation`] if the factory fails while preallocating.
    pub fn build(self) -> Result<RecyclePool<F>, BuildError<F::Error>> {
        if self.config.grow_batch_size == 0 {
            return Err(BuildError::ZeroGrowBatchSize);
        }

        if let (Some(hard_limit), Some(cull)) = (self.config.hard_limit, self.config.cull) {
            if cull.target_idle_count() > hard_limit {
                return Err(BuildError::CullTargetAboveHardLimit {
                    target_idle_count: cull.target_idle_count(),
                    hard_limit,
                });
            }
        }

        RecyclePool::new_inner(self.factory, self.config).map_err(BuildError::Preallocation)
    }
}
