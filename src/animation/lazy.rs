use std::ops::{Add, Sub};
use std::rc::Rc;

use crate::animation::property::Value;
use crate::foundation::core::{Rgb, Vec2};
use crate::foundation::error::SceneResult;
use crate::foundation::math::Transform;

/// Deferred read of live state.
///
/// A `Lazy` records how to reach a value from a live root (usually a shared handle such as a
/// `TransformRef`) and only performs the reads when [`Lazy::evaluate`] is called. Mutations to
/// the root between capture and evaluation are therefore observed.
///
/// ```
/// use svgreel::prelude::*;
///
/// let t = TransformRef::default();
/// let right = Lazy::root(t.clone()).map(|t| t.translation()) + Vec2::new(100.0, 0.0);
/// t.set_translation(Vec2::new(0.0, 75.0));
/// assert_eq!(right.evaluate().unwrap(), Vec2::new(100.0, 75.0));
/// ```
pub struct Lazy<T> {
    eval: Rc<dyn Fn() -> SceneResult<T>>,
}

impl<T> Clone for Lazy<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T> std::fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Lazy(..)")
    }
}

impl<T: 'static> Lazy<T> {
    /// Chain starting at an arbitrary fallible read.
    pub fn new(eval: impl Fn() -> SceneResult<T> + 'static) -> Self {
        Self {
            eval: Rc::new(eval),
        }
    }

    /// Chain whose root is a live handle; each evaluation reads through a fresh clone of it.
    pub fn root(root: T) -> Self
    where
        T: Clone,
    {
        Self::new(move || Ok(root.clone()))
    }

    /// Chain that always yields `value`.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Self::root(value)
    }

    /// Walk the chain from the live root.
    pub fn evaluate(&self) -> SceneResult<T> {
        (self.eval)()
    }

    /// Append an infallible access.
    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> Lazy<U> {
        let inner = self.clone();
        Lazy::new(move || inner.evaluate().map(&f))
    }

    /// Append a fallible access or call.
    pub fn try_map<U: 'static>(&self, f: impl Fn(T) -> SceneResult<U> + 'static) -> Lazy<U> {
        let inner = self.clone();
        Lazy::new(move || f(inner.evaluate()?))
    }

    /// Evaluate two chains together.
    pub fn zip<U: 'static>(&self, other: &Lazy<U>) -> Lazy<(T, U)> {
        let a = self.clone();
        let b = other.clone();
        Lazy::new(move || Ok((a.evaluate()?, b.evaluate()?)))
    }
}

impl<T> Add<T> for Lazy<T>
where
    T: Add<Output = T> + Clone + 'static,
{
    type Output = Lazy<T>;

    fn add(self, rhs: T) -> Lazy<T> {
        self.map(move |v| v + rhs.clone())
    }
}

impl<T> Sub<T> for Lazy<T>
where
    T: Sub<Output = T> + Clone + 'static,
{
    type Output = Lazy<T>;

    fn sub(self, rhs: T) -> Lazy<T> {
        self.map(move |v| v - rhs.clone())
    }
}

/// Animation argument that is either known now or read when the animation initializes.
#[derive(Clone, Debug)]
pub enum Arg<T> {
    /// Value fixed at capture time.
    Now(T),
    /// Value read from live state on resolution.
    Lazy(Lazy<T>),
}

impl<T: Clone + 'static> Arg<T> {
    /// Current value of the argument.
    pub fn resolve(&self) -> SceneResult<T> {
        match self {
            Self::Now(v) => Ok(v.clone()),
            Self::Lazy(l) => l.evaluate(),
        }
    }

    /// Transform the argument without forcing a lazy one.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Arg<U> {
        match self {
            Self::Now(v) => Arg::Now(f(v)),
            Self::Lazy(l) => Arg::Lazy(l.map(f)),
        }
    }

    /// Erase the argument into a property [`Value`].
    pub fn into_value(self) -> Arg<Value>
    where
        T: Into<Value>,
    {
        self.map(Into::into)
    }

    /// Return `true` when the argument reads live state.
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

impl<T> From<Lazy<T>> for Arg<T> {
    fn from(l: Lazy<T>) -> Self {
        Self::Lazy(l)
    }
}

macro_rules! impl_arg_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg<$ty> {
                fn from(v: $ty) -> Self {
                    Self::Now(v)
                }
            }
        )*
    };
}

impl_arg_from!(f64, Vec2, Rgb, Transform, Value);

#[cfg(test)]
#[path = "../../tests/unit/animation/lazy.rs"]
mod tests;
