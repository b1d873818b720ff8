use std::any::type_name;
use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::{Factory, PoolConfig, RecyclePool, Released};

/// A thread-safe handle to a [`RecyclePool`].
///
/// All clones of the handle refer to the same pool. Every operation locks the whole pool for
/// its duration; the pool never blocks waiting for an instance to come back, so the lock is only
/// ever held briefly.
///
/// Acquired instances are wrapped in a [`Recycled`] guard that releases the instance back into
/// the pool when dropped.
///
/// # Thread safety
///
/// The handle is `Send` and `Sync` if both the factory and the pooled type are `Send`.
///
/// # Examples
///
/// ```
/// use std::thread;
///
/// use recycle_pool::{Recyclable, RecyclePool, SharedRecyclePool, infallible};
///
/// #[derive(Default)]
/// struct Buffer {
///     in_use: bool,
///     bytes: Vec<u8>,
/// }
///
/// impl Recyclable for Buffer {
///     fn set_active(&mut self, active: bool) {
///         self.in_use = active;
///     }
///
///     fn on_release(&mut self) {
///         self.bytes.clear();
///     }
/// }
///
/// let pool = SharedRecyclePool::from(
///     RecyclePool::builder(infallible(Buffer::default))
///         .preallocate(4)
///         .hard_limit(4)
///         .build()
///         .unwrap(),
/// );
///
/// let worker_pool = pool.clone();
/// thread::spawn(move || {
///     let mut buffer = worker_pool.acquire().unwrap().unwrap();
///     buffer.bytes.extend_from_slice(b"hello");
///     // Dropping the guard hands the buffer back to the pool.
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(pool.idle_count(), 4);
/// assert_eq!(pool.outstanding_count(), 0);
/// ```
pub struct SharedRecyclePool<F>
where
    F: Factory,
{
    inner: Arc<Mutex<RecyclePool<F>>>,
}

impl<F> SharedRecyclePool<F>
where
    F: Factory,
{
    /// Hands out an instance wrapped in a guard that releases it back into the pool on drop.
    ///
    /// Returns `Ok(None)` if the hard limit of instances on loan has been reached.
    ///
    /// # Errors
    ///
    /// Returns the factory's error if the idle store was empty and constructing a new instance
    /// failed.
    pub fn acquire(&self) -> Result<Option<Recycled<F>>, F::Error> {
        let item = self.inner.lock().acquire()?;

        Ok(item.map(|item| Recycled {
            item: ManuallyDrop::new(item),
            pool: Arc::clone(&self.inner),
        }))
    }

    /// Destroys idle instances in excess of the cull target if a cull is due.
    ///
    /// See [`RecyclePool::cull()`].
    pub fn cull(&self, now: Instant) -> usize {
        self.inner.lock().cull(now)
    }

    /// Destroys every idle instance immediately.
    ///
    /// See [`RecyclePool::clear_idle()`].
    pub fn clear_idle(&self) -> usize {
        self.inner.lock().clear_idle()
    }

    /// The number of instances stored in the pool, ready to be acquired.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.inner.lock().idle_count()
    }

    /// The number of instances currently on loan.
    #[must_use]
    pub fn outstanding_count(&self) -> usize {
        self.inner.lock().outstanding_count()
    }

    /// The number of live instances belonging to the pool, idle or on loan.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.inner.lock().total_count()
    }

    /// Whether the hard limit of instances on loan has been reached.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.inner.lock().is_exhausted()
    }

    /// When the last cull pass that destroyed instances happened, if ever.
    #[must_use]
    pub fn last_cull(&self) -> Option<Instant> {
        self.inner.lock().last_cull()
    }

    /// The configuration the pool was built with.
    #[must_use]
    pub fn config(&self) -> PoolConfig {
        *self.inner.lock().config()
    }
}

impl<F> From<RecyclePool<F>> for SharedRecyclePool<F>
where
    F: Factory,
{
    fn from(pool: RecyclePool<F>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }
}

impl<F> Clone for SharedRecyclePool<F>
where
    F: Factory,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F> fmt::Debug for SharedRecyclePool<F>
where
    F: Factory,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("inner", &*self.inner.lock())
            .finish()
    }
}

/// An instance on loan from a [`SharedRecyclePool`].
///
/// Dereferences to the pooled instance. Dropping the guard releases the instance back into the
/// pool; use [`release()`][Self::release] instead to learn whether it was stored or dropped.
pub struct Recycled<F>
where
    F: Factory,
{
    // Only ever moved out by `Drop` or by `release()`, which suppresses `Drop`.
    item: ManuallyDrop<F::Item>,
    pool: Arc<Mutex<RecyclePool<F>>>,
}

impl<F> Recycled<F>
where
    F: Factory,
{
    /// Releases the instance back into the pool it came from.
    pub fn release(self) -> Released {
        let mut this = ManuallyDrop::new(self);

        // SAFETY: `this` is never dropped, so the item is moved out exactly once.
        let item = unsafe { ManuallyDrop::take(&mut this.item) };

        // SAFETY: `this` is never dropped, so the pool handle is moved out exactly once.
        let pool = unsafe { ptr::read(&this.pool) };

        pool.lock().release(item)
    }
}

impl<F> Deref for Recycled<F>
where
    F: Factory,
{
    type Target = F::Item;

    fn deref(&self) -> &Self::Target {
        &self.item
    }
}

impl<F> DerefMut for Recycled<F>
where
    F: Factory,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.item
    }
}

impl<F> Drop for Recycled<F>
where
    F: Factory,
{
    fn drop(&mut self) {
        // SAFETY: We are in `drop()`, so nothing can observe the item after it is moved out.
        let item = unsafe { ManuallyDrop::take(&mut self.item) };

        self.pool.lock().release(item);
    }
}

impl<F> fmt::Debug for Recycled<F>
where
    F: Factory,
    F::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("item", &*self.item)
            .finish_non_exhaustive()
    }
}
