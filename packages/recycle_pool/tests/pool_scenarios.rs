//! Integration tests for the `recycle_pool` package.
//!
//! These tests drive the pool through the public API the way a game loop would: acquire on
//! demand, release when done and cull on a tick.

use std::convert::Infallible;
use std::time::{Duration, Instant};

use recycle_pool::{
    CullPolicy, Factory, Recyclable, RecyclePool, Released, SharedRecyclePool, infallible,
};

#[derive(Debug)]
struct Projectile {
    serial: u32,
    visible: bool,
    flights: u32,
}

impl Recyclable for Projectile {
    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }

    fn on_acquire(&mut self) {
        self.flights = self.flights.saturating_add(1);
    }
}

fn projectiles() -> impl Factory<Item = Projectile, Error = Infallible> + Send {
    let mut next_serial = 0_u32;

    infallible(move || {
        next_serial = next_serial.wrapping_add(1);

        Projectile {
            serial: next_serial,
            visible: true,
            flights: 0,
        }
    })
}

#[test]
fn bounded_pool_serves_until_limit_then_recovers() {
    let mut pool = RecyclePool::builder(projectiles())
        .preallocate(5)
        .hard_limit(5)
        .build()
        .unwrap();

    let mut in_flight = Vec::new();
    while let Some(projectile) = pool.acquire().unwrap() {
        in_flight.push(projectile);
    }

    assert_eq!(in_flight.len(), 5);
    assert_eq!(pool.outstanding_count(), 5);
    assert_eq!(pool.idle_count(), 0);

    let landed = in_flight.pop().unwrap();
    let landed_serial = landed.serial;
    assert_eq!(pool.release(landed), Released::Pooled);

    let relaunched = pool.acquire().unwrap().unwrap();
    assert_eq!(relaunched.serial, landed_serial);
    assert_eq!(relaunched.flights, 2);
}

#[test]
fn unbounded_pool_grows_in_batches() {
    let mut pool = RecyclePool::builder(projectiles())
        .grow_batch_size(2)
        .build()
        .unwrap();

    let first = pool.acquire().unwrap().unwrap();
    assert_eq!(pool.idle_count(), 1);

    let second = pool.acquire().unwrap().unwrap();
    assert_eq!(pool.idle_count(), 0);

    let third = pool.acquire().unwrap().unwrap();
    assert_eq!(pool.idle_count(), 1);
    assert_eq!(pool.outstanding_count(), 3);

    let mut serials = [first.serial, second.serial, third.serial];
    serials.sort_unstable();
    assert!(serials.windows(2).all(|pair| pair[0] != pair[1]));
}

#[test]
fn outstanding_never_exceeds_limit_under_churn() {
    let mut pool = RecyclePool::builder(projectiles())
        .preallocate(2)
        .grow_batch_size(3)
        .hard_limit(4)
        .build()
        .unwrap();

    let mut held = Vec::new();
    let mut dropped = 0_usize;

    for round in 0..200_u32 {
        if round % 3 == 0 {
            if let Some(projectile) = held.pop() {
                if pool.release(projectile) == Released::Dropped {
                    dropped = dropped.saturating_add(1);
                }
            }
        } else if let Some(projectile) = pool.acquire().unwrap() {
            held.push(projectile);
        }

        assert!(pool.outstanding_count() <= 4);
        assert!(pool.idle_count() <= 4);

        // A projectile dropped because the idle store was full still counts as on loan.
        assert_eq!(pool.outstanding_count(), held.len().saturating_add(dropped));
    }
}

#[test]
fn reacquired_instance_is_reactivated() {
    let mut pool = RecyclePool::builder(projectiles())
        .preallocate(1)
        .build()
        .unwrap();

    let projectile = pool.acquire().unwrap().unwrap();
    assert!(projectile.visible);

    pool.release(projectile);

    let projectile = pool.acquire().unwrap().unwrap();
    assert!(projectile.visible);
    assert_eq!(projectile.flights, 2);
}

#[test]
fn cull_on_tick_trims_burst_back_to_target() {
    let mut pool = RecyclePool::builder(projectiles())
        .cull(CullPolicy::new(2, Duration::from_secs(10)))
        .build()
        .unwrap();

    // A burst of activity leaves many idle instances behind.
    let burst = (0..6)
        .map(|_| pool.acquire().unwrap().unwrap())
        .collect::<Vec<_>>();
    for projectile in burst {
        pool.release(projectile);
    }
    assert_eq!(pool.idle_count(), 6);

    let start = Instant::now();
    let mut culled = Vec::new();

    for second in 0..=20 {
        culled.push(pool.cull(start + Duration::from_secs(second)));
        assert!(pool.idle_count() >= 2);
    }

    assert_eq!(culled.first(), Some(&4));
    assert_eq!(culled.iter().sum::<usize>(), 4);
    assert_eq!(pool.idle_count(), 2);
    assert_eq!(pool.last_cull(), Some(start));
}

#[test]
fn shared_pool_guards_return_instances() {
    let pool = SharedRecyclePool::from(
        RecyclePool::builder(projectiles())
            .preallocate(3)
            .hard_limit(3)
            .build()
            .unwrap(),
    );

    let guards = (0..3)
        .map(|_| pool.acquire().unwrap().unwrap())
        .collect::<Vec<_>>();

    assert!(pool.acquire().unwrap().is_none());

    drop(guards);

    assert_eq!(pool.outstanding_count(), 0);
    assert_eq!(pool.idle_count(), 3);
}

#[test]
fn independent_pools_do_not_share_state() {
    let mut first = RecyclePool::builder(projectiles())
        .preallocate(2)
        .build()
        .unwrap();
    let second = RecyclePool::builder(projectiles())
        .preallocate(2)
        .build()
        .unwrap();

    let _projectile = first.acquire().unwrap().unwrap();

    assert_eq!(first.outstanding_count(), 1);
    assert_eq!(second.outstanding_count(), 0);
    assert_eq!(second.idle_count(), 2);
}
