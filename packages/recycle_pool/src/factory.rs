use std::any::type_name;
use std::convert::Infallible;
use std::fmt;

use crate::Recyclable;

/// Constructs new instances for a [`RecyclePool`][crate::RecyclePool].
///
/// The pool calls the factory during preallocation and whenever an acquire finds the idle store
/// empty. The factory is expected to return a fully initialized instance; the pool deactivates
/// it before storing it.
///
/// Any `FnMut() -> Result<T, E>` closure is a factory. Infallible constructors can be adapted
/// via [`infallible()`].
///
/// # Examples
///
/// ```
/// use recycle_pool::{Factory, Recyclable};
///
/// struct Particle {
///     alive: bool,
/// }
///
/// impl Recyclable for Particle {
///     fn set_active(&mut self, active: bool) {
///         self.alive = active;
///     }
/// }
///
/// struct ParticleFactory {
///     budget: usize,
/// }
///
/// impl Factory for ParticleFactory {
///     type Item = Particle;
///     type Error = &'static str;
///
///     fn construct(&mut self) -> Result<Particle, Self::Error> {
///         self.budget = self.budget.checked_sub(1).ok_or("particle budget spent")?;
///         Ok(Particle { alive: false })
///     }
/// }
/// ```
pub trait Factory {
    /// The pooled type.
    type Item: Recyclable;

    /// The error returned when an instance cannot be constructed.
    type Error;

    /// Constructs one new instance.
    ///
    /// # Errors
    ///
    /// Returns the factory's own error if the instance could not be constructed. The pool passes
    /// this error through to its caller unchanged.
    fn construct(&mut self) -> Result<Self::Item, Self::Error>;
}

impl<F, T, E> Factory for F
where
    F: FnMut() -> Result<T, E>,
    T: Recyclable,
{
    type Item = T;
    type Error = E;

    fn construct(&mut self) -> Result<T, E> {
        self()
    }
}

/// Adapts a constructor that cannot fail into a [`Factory`] whose error type is
/// [`Infallible`].
///
/// # Examples
///
/// ```
/// use recycle_pool::{Recyclable, RecyclePool, infallible};
///
/// #[derive(Default)]
/// struct Crate {
///     visible: bool,
/// }
///
/// impl Recyclable for Crate {
///     fn set_active(&mut self, active: bool) {
///         self.visible = active;
///     }
/// }
///
/// let pool = RecyclePool::builder(infallible(Crate::default))
///     .preallocate(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.idle_count(), 3);
/// ```
pub fn infallible<F, T>(constructor: F) -> InfallibleFactory<F>
where
    F: FnMut() -> T,
    T: Recyclable,
{
    InfallibleFactory { constructor }
}

/// A [`Factory`] wrapping a constructor that cannot fail.
///
/// Created by [`infallible()`].
pub struct InfallibleFactory<F> {
    constructor: F,
}

impl<F, T> Factory for InfallibleFactory<F>
where
    F: FnMut() -> T,
    T: Recyclable,
{
    type Item = T;
    type Error = Infallible;

    fn construct(&mut self) -> Result<T, Infallible> {
        Ok((self.constructor)())
    }
}

impl<F> fmt::Debug for InfallibleFactory<F> {
    #[cfg_attr(test, mutants::skip)] // No API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>()).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Token(u32);

    impl Recyclable for Token {
        fn set_active(&mut self, _active: bool) {}
    }

    #[test]
    fn closure_is_a_factory() {
        let mut next = 0;
        let mut factory = || -> Result<Token, String> {
            next += 1;
            Ok(Token(next))
        };

        assert_eq!(factory.construct(), Ok(Token(1)));
        assert_eq!(factory.construct(), Ok(Token(2)));
    }

    #[test]
    fn closure_errors_pass_through() {
        let mut factory = || -> Result<Token, &'static str> { Err("out of sprites") };

        assert_eq!(factory.construct(), Err("out of sprites"));
    }

    #[test]
    fn infallible_wraps_plain_constructor() {
        let mut factory = infallible(|| Token(7));

        assert_eq!(factory.construct(), Ok(Token(7)));
    }
}
