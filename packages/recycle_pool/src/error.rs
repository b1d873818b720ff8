use thiserror::Error;

/// Errors that can occur when building a [`RecyclePool`][crate::RecyclePool].
///
/// `E` is the error type of the pool's [`Factory`][crate::Factory].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError<E> {
    /// The pool was configured to grow by zero instances, which would leave an empty pool
    /// unable to ever hand out an instance.
    #[error("grow batch size must be at least 1")]
    ZeroGrowBatchSize,

    /// The culling floor is above the hard limit, so the idle store can never exceed it and
    /// culling would never act.
    #[error(
        "cull target idle count {target_idle_count} exceeds the hard limit of {hard_limit} instances"
    )]
    CullTargetAboveHardLimit {
        /// The configured culling floor.
        target_idle_count: usize,

        /// The configured hard limit.
        hard_limit: usize,
    },

    /// The factory failed while constructing the preallocated instances.
    #[error("factory failed to construct a preallocated instance")]
    Preallocation(#[source] E),
}
