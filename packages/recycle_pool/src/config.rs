use std::time::Duration;

/// The capacity policy of a [`RecyclePool`][crate::RecyclePool].
///
/// The configuration is assembled through [`RecyclePoolBuilder`][crate::RecyclePoolBuilder] and
/// cannot be changed after the pool has been built. Inspect it via
/// [`RecyclePool::config()`][crate::RecyclePool::config].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct PoolConfig {
    pub(crate) preallocate_count: usize,
    pub(crate) grow_batch_size: usize,
    pub(crate) hard_limit: Option<usize>,
    pub(crate) cull: Option<CullPolicy>,
}

impl PoolConfig {
    /// How many instances the pool constructs up front, before any hard limit clamp is applied.
    #[must_use]
    pub fn preallocate_count(&self) -> usize {
        self.preallocate_count
    }

    /// How many instances the pool constructs when an acquire finds the idle store empty.
    #[must_use]
    pub fn grow_batch_size(&self) -> usize {
        self.grow_batch_size
    }

    /// The maximum number of instances that may be on loan at the same time, and the maximum
    /// size of the idle store. `None` if the pool is unbounded.
    #[must_use]
    pub fn hard_limit(&self) -> Option<usize> {
        self.hard_limit
    }

    /// The culling policy, or `None` if culling is disabled.
    #[must_use]
    pub fn cull(&self) -> Option<CullPolicy> {
        self.cull
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            preallocate_count: 0,
            grow_batch_size: 1,
            hard_limit: None,
            cull: None,
        }
    }
}

/// Governs how [`RecyclePool::cull()`][crate::RecyclePool::cull] shrinks the idle store.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use recycle_pool::CullPolicy;
///
/// let policy = CullPolicy::new(4, Duration::from_secs(30));
///
/// assert_eq!(policy.target_idle_count(), 4);
/// assert_eq!(policy.interval(), Duration::from_secs(30));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CullPolicy {
    target_idle_count: usize,
    interval: Duration,
}

impl CullPolicy {
    /// Creates a policy that trims the idle store down to `target_idle_count` instances, at most
    /// once per `interval`.
    #[must_use]
    pub fn new(target_idle_count: usize, interval: Duration) -> Self {
        Self {
            target_idle_count,
            interval,
        }
    }

    /// Culling never reduces the idle store below this many instances.
    #[must_use]
    pub fn target_idle_count(&self) -> usize {
        self.target_idle_count
    }

    /// The minimum time between two cull passes that destroy instances.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_without_culling() {
        let config = PoolConfig::default();

        assert_eq!(config.preallocate_count(), 0);
        assert_eq!(config.grow_batch_size(), 1);
        assert_eq!(config.hard_limit(), None);
        assert_eq!(config.cull(), None);
    }
}
