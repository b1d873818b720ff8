//! Example that demonstrates the basic acquire, release and cull cycle of a `RecyclePool`.

use std::time::{Duration, Instant};

use recycle_pool::{CullPolicy, Recyclable, RecyclePool, infallible};

#[derive(Default)]
struct Spark {
    visible: bool,
    ttl_frames: u32,
}

impl Recyclable for Spark {
    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }

    fn on_acquire(&mut self) {
        self.ttl_frames = 3;
    }
}

fn main() {
    let mut pool = RecyclePool::builder(infallible(Spark::default))
        .preallocate(4)
        .grow_batch_size(4)
        .hard_limit(12)
        .cull(CullPolicy::new(4, Duration::from_millis(50)))
        .build()
        .expect("configuration is valid and construction cannot fail");

    let start = Instant::now();
    let mut live = Vec::new();

    for frame in 0_u32..20 {
        // Spawn a burst of sparks in the first few frames.
        if frame < 4 {
            for _ in 0..3 {
                match pool.acquire() {
                    Ok(Some(spark)) => live.push(spark),
                    Ok(None) => println!("frame {frame}: spark budget exhausted"),
                    Err(never) => match never {},
                }
            }
        }

        // Age the sparks and hand expired ones back to the pool.
        for spark in &mut live {
            spark.ttl_frames = spark.ttl_frames.saturating_sub(1);
        }
        let (expired, alive): (Vec<_>, Vec<_>) =
            live.drain(..).partition(|spark| spark.ttl_frames == 0);
        live = alive;
        for spark in expired {
            pool.release(spark);
        }

        let now = start + Duration::from_millis(16) * frame;
        let culled = pool.cull(now);

        println!(
            "frame {frame:>2}: live {:>2}, idle {:>2}, culled {culled}",
            pool.outstanding_count(),
            pool.idle_count()
        );
    }
}
