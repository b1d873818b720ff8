use std::any::type_name;
use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::metrics::{
    ACQUIRED, CULLED_INSTANCES, EXHAUSTED, GROWN_INSTANCES, OVER_RELEASED, OVERFLOW_DROPPED,
    RELEASED,
};
use crate::{Factory, PoolConfig, Recyclable, RecyclePoolBuilder};

/// A bounded pool of reusable instances of one [`Recyclable`] type.
///
/// Instances are handed out by value through [`acquire()`][Self::acquire] and handed back through
/// [`release()`][Self::release]. While an instance is on loan the caller owns it outright; the
/// pool only keeps count of how many instances are out.
///
/// # Capacity policy
///
/// * **Preallocation**: the pool constructs a configured number of instances when it is built.
/// * **Growth**: when an acquire finds the idle store empty, the pool asks its [`Factory`] for a
///   batch of new instances.
/// * **Hard limit**: if configured, at most this many instances can be on loan at once and the
///   idle store never holds more than this many instances. Preallocation and growth are clamped
///   to the remaining room in the idle store.
/// * **Culling**: if configured, [`cull()`][Self::cull] destroys idle instances in excess of a
///   target count, at most once per interval.
///
/// None of these policies report errors. Exhaustion surfaces as `None` from `acquire()`, an
/// idle store overflow surfaces as [`Released::Dropped`] from `release()` and releasing more
/// instances than were acquired surfaces as [`Released::OverReleased`].
///
/// # Reuse order
///
/// The idle store is a stack: the most recently released instance is the next one acquired.
///
/// # Thread safety
///
/// The pool is a plain owned value and all operations require `&mut self`. Use
/// [`SharedRecyclePool`][crate::SharedRecyclePool] to share one pool between threads.
///
/// # Examples
///
/// ```
/// use recycle_pool::{Recyclable, RecyclePool, infallible};
///
/// #[derive(Default)]
/// struct Bullet {
///     active: bool,
/// }
///
/// impl Recyclable for Bullet {
///     fn set_active(&mut self, active: bool) {
///         self.active = active;
///     }
/// }
///
/// let mut pool = RecyclePool::builder(infallible(Bullet::default))
///     .preallocate(2)
///     .hard_limit(2)
///     .build()
///     .unwrap();
///
/// let a = pool.acquire().unwrap().unwrap();
/// let b = pool.acquire().unwrap().unwrap();
/// assert!(a.active && b.active);
///
/// // The pool is exhausted until something comes back.
/// assert!(pool.acquire().unwrap().is_none());
///
/// pool.release(a);
/// assert_eq!(pool.outstanding_count(), 1);
/// assert!(pool.acquire().unwrap().is_some());
/// # drop(b);
/// ```
pub struct RecyclePool<F>
where
    F: Factory,
{
    factory: F,
    config: PoolConfig,

    /// Instances not on loan, used as a stack.
    idle: Vec<F::Item>,

    outstanding_count: usize,

    /// When the last cull pass that destroyed instances happened. `None` until the first one,
    /// which means the first cull is due immediately.
    last_cull: Option<Instant>,
}

/// What [`RecyclePool::release()`] did with the instance it was given.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Released {
    /// The instance was deactivated and stored for reuse.
    Pooled,

    /// The idle store was already at the hard limit, so the instance was dropped. The
    /// outstanding count is left as it was.
    Dropped,

    /// The instance was deactivated and stored for reuse, but no instances were on loan. The
    /// outstanding count stays at zero.
    ///
    /// This means the caller released more instances than it acquired.
    OverReleased,
}

impl<F> RecyclePool<F>
where
    F: Factory,
{
    /// Starts building a new [`RecyclePool`] that constructs its instances via `factory`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycle_pool::{Recyclable, RecyclePool, infallible};
    ///
    /// #[derive(Default)]
    /// struct Orb {
    ///     glowing: bool,
    /// }
    ///
    /// impl Recyclable for Orb {
    ///     fn set_active(&mut self, active: bool) {
    ///         self.glowing = active;
    ///     }
    /// }
    ///
    /// let pool = RecyclePool::builder(infallible(Orb::default)).build().unwrap();
    ///
    /// assert_eq!(pool.idle_count(), 0);
    /// assert_eq!(pool.outstanding_count(), 0);
    /// ```
    pub fn builder(factory: F) -> RecyclePoolBuilder<F> {
        RecyclePoolBuilder::new(factory)
    }

    pub(crate) fn new_inner(factory: F, config: PoolConfig) -> Result<Self, F::Error> {
        let mut pool = Self {
            factory,
            config,
            idle: Vec::new(),
            outstanding_count: 0,
            last_cull: None,
        };

        let count = pool.clamp_to_headroom(config.preallocate_count);
        pool.idle.reserve(count);
        pool.construct_idle(count)?;

        debug!(
            item_type = type_name::<F::Item>(),
            preallocated = count,
            "recycle pool built"
        );

        Ok(pool)
    }

    /// Hands out an instance, constructing new ones if the idle store is empty.
    ///
    /// The returned instance has been activated and its
    /// [`on_acquire()`][Recyclable::on_acquire] hook has run.
    ///
    /// Returns `Ok(None)` if the hard limit of instances on loan has been reached. This does not
    /// modify the pool in any way.
    ///
    /// # Errors
    ///
    /// Returns the factory's error if the idle store was empty and constructing a new instance
    /// failed. Instances constructed before the failure remain in the idle store.
    pub fn acquire(&mut self) -> Result<Option<F::Item>, F::Error> {
        if self.is_exhausted() {
            EXHAUSTED.with(|e| e.observe_once());
            trace!(
                outstanding_count = self.outstanding_count,
                "acquire refused at hard limit"
            );
            return Ok(None);
        }

        if self.idle.is_empty() && self.grow()? == 0 {
            EXHAUSTED.with(|e| e.observe_once());
            trace!("acquire refused, no room to grow");
            return Ok(None);
        }

        let Some(mut item) = self.idle.pop() else {
            return Ok(None);
        };

        item.set_active(true);
        item.on_acquire();

        // Counted after the hooks, a panicking hook must not leave a phantom loan behind.
        self.outstanding_count = self.outstanding_count.saturating_add(1);

        ACQUIRED.with(|e| e.observe_once());
        trace!(
            outstanding_count = self.outstanding_count,
            idle_count = self.idle.len(),
            "instance acquired"
        );

        Ok(Some(item))
    }

    /// Takes back an instance previously handed out by [`acquire()`][Self::acquire].
    ///
    /// The instance's [`on_release()`][Recyclable::on_release] hook runs, then it is deactivated
    /// and stored for reuse. If a hard limit is configured and the idle store already holds that
    /// many instances, the instance is dropped instead without running any hooks and without
    /// reducing the outstanding count.
    ///
    /// Releasing an instance that did not come from this pool is not detected. Releasing more
    /// instances than were acquired never drives the outstanding count below zero and is reported
    /// as [`Released::OverReleased`].
    pub fn release(&mut self, mut item: F::Item) -> Released {
        if self.is_idle_full() {
            OVERFLOW_DROPPED.with(|e| e.observe_once());
            debug!(
                idle_count = self.idle.len(),
                "idle store full, dropping released instance"
            );

            drop(item);
            return Released::Dropped;
        }

        // Counted before the hooks, a panicking hook must not leave an ended loan behind.
        let was_on_loan = self.release_loan();

        item.on_release();
        item.set_active(false);
        self.idle.push(item);

        RELEASED.with(|e| e.observe_once());
        trace!(
            outstanding_count = self.outstanding_count,
            idle_count = self.idle.len(),
            "instance released"
        );

        if was_on_loan {
            Released::Pooled
        } else {
            Released::OverReleased
        }
    }

    /// Destroys idle instances in excess of the cull target, if culling is enabled and the cull
    /// interval has elapsed since the last cull pass.
    ///
    /// `now` comes from the caller's tick source. The pool does not schedule culling on its own;
    /// call this on a regular tick.
    ///
    /// Returns the number of instances destroyed. A pass that destroys nothing does not restart
    /// the cull interval. Instances on loan are never affected.
    pub fn cull(&mut self, now: Instant) -> usize {
        let Some(policy) = self.config.cull else {
            return 0;
        };

        let excess = self.idle.len().saturating_sub(policy.target_idle_count());

        if excess == 0 || !self.is_cull_due(policy.interval(), now) {
            return 0;
        }

        // The most recently released instances sit at the end of the stack and go first.
        self.idle.truncate(policy.target_idle_count());
        self.last_cull = Some(now);

        CULLED_INSTANCES.with(|e| e.observe(excess));
        debug!(
            culled = excess,
            idle_count = self.idle.len(),
            "culled idle instances"
        );

        excess
    }

    /// Destroys every idle instance immediately, regardless of the cull policy.
    ///
    /// Returns the number of instances destroyed. The outstanding count is unaffected.
    pub fn clear_idle(&mut self) -> usize {
        let count = self.idle.len();
        self.idle.clear();

        debug!(cleared = count, "cleared idle instances");

        count
    }

    /// The number of instances stored in the pool, ready to be acquired.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// The number of instances currently on loan.
    #[must_use]
    pub fn outstanding_count(&self) -> usize {
        self.outstanding_count
    }

    /// The number of live instances belonging to the pool, idle or on loan.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.idle.len().saturating_add(self.outstanding_count)
    }

    /// Whether the hard limit of instances on loan has been reached, in which case
    /// [`acquire()`][Self::acquire] returns `None`.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.config
            .hard_limit
            .is_some_and(|limit| self.outstanding_count >= limit)
    }

    /// When the last cull pass that destroyed instances happened, if ever.
    #[must_use]
    pub fn last_cull(&self) -> Option<Instant> {
        self.last_cull
    }

    /// The configuration the pool was built with.
    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    fn is_idle_full(&self) -> bool {
        self.config
            .hard_limit
            .is_some_and(|limit| self.idle.len() >= limit)
    }

    fn is_cull_due(&self, interval: Duration, now: Instant) -> bool {
        self.last_cull
            .is_none_or(|last| now.saturating_duration_since(last) >= interval)
    }

    /// Limits `wanted` to the room left in the idle store under the hard limit.
    fn clamp_to_headroom(&self, wanted: usize) -> usize {
        self.config.hard_limit.map_or(wanted, |limit| {
            wanted.min(limit.saturating_sub(self.idle.len()))
        })
    }

    /// Ends one loan. Returns `false` if no instances were on loan.
    fn release_loan(&mut self) -> bool {
        if self.outstanding_count == 0 {
            OVER_RELEASED.with(|e| e.observe_once());
            debug!("released more instances than were acquired");
            return false;
        }

        self.outstanding_count = self.outstanding_count.saturating_sub(1);
        true
    }

    /// Replenishes the empty idle store with one batch. Returns how many instances were added.
    fn grow(&mut self) -> Result<usize, F::Error> {
        let count = self.clamp_to_headroom(self.config.grow_batch_size);

        if count == 0 {
            return Ok(0);
        }

        self.construct_idle(count)?;

        GROWN_INSTANCES.with(|e| e.observe(count));
        debug!(grown = count, "grew idle store");

        Ok(count)
    }

    fn construct_idle(&mut self, count: usize) -> Result<(), F::Error> {
        for _ in 0..count {
            let mut item = self.factory.construct()?;
            item.set_active(false);
            self.idle.push(item);
        }

        Ok(())
    }
}

impl<F> fmt::Debug for RecyclePool<F>
where
    F: Factory,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("config", &self.config)
            .field("idle_count", &self.idle.len())
            .field("outstanding_count", &self.outstanding_count)
            .field("last_cull", &self.last_cull)
            .finish_non_exhaustive()
    }
}
