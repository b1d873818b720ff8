//! Metrics for recycle pools.
//!
//! Events are shared by every pool on the thread; they describe the aggregate behavior of the
//! pooling policy rather than any single pool.

use nm::{Event, Magnitude};

/// Histogram buckets for the number of instances constructed by one growth step.
const GROWN_INSTANCES_BUCKETS: &[Magnitude] = &[0, 1, 2, 4, 8, 16, 32, 64, 128];

/// Histogram buckets for the number of idle instances destroyed by one cull pass.
const CULLED_INSTANCES_BUCKETS: &[Magnitude] = &[0, 1, 2, 4, 8, 16, 32, 64, 128, 256, 1024];

thread_local! {
    /// An instance was handed out to a caller.
    pub(crate) static ACQUIRED: Event = Event::builder()
        .name("recycle_pool_acquired")
        .build();

    /// An acquire returned nothing because the pool was at its hard limit.
    pub(crate) static EXHAUSTED: Event = Event::builder()
        .name("recycle_pool_exhausted")
        .build();

    /// An instance was handed back and stored for reuse.
    pub(crate) static RELEASED: Event = Event::builder()
        .name("recycle_pool_released")
        .build();

    /// An instance was handed back while no instances were on loan.
    pub(crate) static OVER_RELEASED: Event = Event::builder()
        .name("recycle_pool_over_released")
        .build();

    /// An instance was handed back into a full idle store and dropped.
    pub(crate) static OVERFLOW_DROPPED: Event = Event::builder()
        .name("recycle_pool_overflow_dropped")
        .build();

    /// The idle store was replenished by the factory.
    ///
    /// The magnitude is the number of instances constructed.
    pub(crate) static GROWN_INSTANCES: Event = Event::builder()
        .name("recycle_pool_grown_instances")
        .histogram(GROWN_INSTANCES_BUCKETS)
        .build();

    /// A cull pass destroyed idle instances.
    ///
    /// The magnitude is the number of instances destroyed.
    pub(crate) static CULLED_INSTANCES: Event = Event::builder()
        .name("recycle_pool_culled_instances")
        .histogram(CULLED_INSTANCES_BUCKETS)
        .build();
}
