/// A type whose instances can be handed out by a [`RecyclePool`][crate::RecyclePool] and taken
/// back for reuse.
///
/// The pool toggles the activation state of an instance whenever ownership crosses the pool
/// boundary and notifies the instance through the lifecycle hooks. What "active" means is up to
/// the implementing type: visibility in a scene, membership in a simulation, an open flag on a
/// buffer. The pool never interprets it.
///
/// # Ordering
///
/// * On acquire, the pool calls [`set_active(true)`][Self::set_active] and then
///   [`on_acquire()`][Self::on_acquire], so the hook observes an active instance.
/// * On release, the pool calls [`on_release()`][Self::on_release] and then
///   [`set_active(false)`][Self::set_active], so the hook observes the instance as the caller
///   left it.
///
/// Freshly constructed instances are deactivated before they are stored.
///
/// # Panics
///
/// The pool does not catch panics raised by these methods. A panicking hook propagates to the
/// caller of the pool operation and the instance being processed is dropped during unwinding.
///
/// # Examples
///
/// ```
/// use recycle_pool::Recyclable;
///
/// struct Bullet {
///     visible: bool,
///     fired: u32,
/// }
///
/// impl Recyclable for Bullet {
///     fn set_active(&mut self, active: bool) {
///         self.visible = active;
///     }
///
///     fn on_acquire(&mut self) {
///         self.fired = self.fired.wrapping_add(1);
///     }
/// }
/// ```
pub trait Recyclable {
    /// Enables or disables the instance.
    fn set_active(&mut self, active: bool);

    /// Called after the instance has been activated and before it is handed to the caller.
    fn on_acquire(&mut self) {}

    /// Called when the instance is handed back, before it is deactivated and stored.
    fn on_release(&mut self) {}
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Lamp {
        lit: bool,
    }

    impl Recyclable for Lamp {
        fn set_active(&mut self, active: bool) {
            self.lit = active;
        }
    }

    #[test]
    fn default_hooks_leave_instance_untouched() {
        let mut lamp = Lamp::default();
        lamp.set_active(true);

        lamp.on_acquire();
        assert!(lamp.lit);

        lamp.on_release();
        assert!(lamp.lit);
    }
}
