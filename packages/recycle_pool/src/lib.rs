#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A bounded object pool that hands out pre-constructed instances of one type and takes them back
//! for reuse instead of destroying and recreating them.
//!
//! This crate provides [`RecyclePool`], which owns the instances that are not on loan and keeps
//! count of the ones that are. The pool enforces a capacity policy:
//!
//! - **Preallocation**: instances constructed up front when the pool is built.
//! - **On-demand growth**: a batch of new instances whenever an acquire finds the pool empty.
//! - **Hard limit**: an optional cap on instances on loan and on instances kept idle.
//! - **Culling**: optional trimming of idle instances down to a target count, at most once per
//!   interval, driven by the caller's tick.
//!
//! How instances are constructed is up to a caller-supplied [`Factory`]. What it means for an
//! instance to be active is up to the pooled type, which implements [`Recyclable`] to receive the
//! activation toggle and the acquire/release lifecycle hooks.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//!
//! use recycle_pool::{CullPolicy, Recyclable, RecyclePool, infallible};
//!
//! #[derive(Default)]
//! struct Explosion {
//!     visible: bool,
//!     frame: u32,
//! }
//!
//! impl Recyclable for Explosion {
//!     fn set_active(&mut self, active: bool) {
//!         self.visible = active;
//!     }
//!
//!     fn on_acquire(&mut self) {
//!         self.frame = 0;
//!     }
//! }
//!
//! let mut pool = RecyclePool::builder(infallible(Explosion::default))
//!     .preallocate(8)
//!     .grow_batch_size(4)
//!     .hard_limit(32)
//!     .cull(CullPolicy::new(8, Duration::from_secs(30)))
//!     .build()
//!     .unwrap();
//!
//! // `None` would mean 32 explosions are already on screen.
//! let boom = pool.acquire().unwrap().expect("pool has room");
//! assert!(boom.visible);
//!
//! pool.release(boom);
//!
//! // Call on a regular tick to trim idle instances accumulated during busy periods.
//! pool.cull(Instant::now());
//! ```
//!
//! # Capacity signals
//!
//! The pool never treats its capacity policy as an error:
//!
//! - [`RecyclePool::acquire()`] returns `Ok(None)` when the hard limit of instances on loan has
//!   been reached.
//! - [`RecyclePool::release()`] returns [`Released::Dropped`] when the idle store is full and the
//!   instance was dropped instead of stored.
//! - [`RecyclePool::release()`] returns [`Released::OverReleased`] when no instances were on loan;
//!   the outstanding count stays at zero.
//!
//! Errors only come from the factory and are passed through unchanged.
//!
//! # Sharing between threads
//!
//! [`RecyclePool`] is a single-owner value. Wrap it in a [`SharedRecyclePool`] to share it between
//! threads; acquired instances are then returned as [`Recycled`] guards that release the instance
//! back into the pool when dropped.
//!
//! # Metrics
//!
//! The pool reports `recycle_pool_*` events through the [`nm`] metrics crate and emits `tracing`
//! diagnostics at `debug` and `trace` level.

mod builder;
mod config;
mod error;
mod factory;
mod metrics;
mod pool;
mod recyclable;
mod shared;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use factory::*;
pub use pool::*;
pub use recyclable::*;
pub use shared::*;
