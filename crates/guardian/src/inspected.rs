use std::borrow::Cow;
use std::fmt;

use guardian_resolve::Shape;

/// An expression captured for a guard clause: how to evaluate it, and what
/// it looks like.
///
/// Usually built by [`expr!`](crate::expr). The closure is only called by
/// the check, and the shape is only produced if the check fails.
pub struct Inspected<'a, T> {
    eval: Box<dyn Fn() -> T + 'a>,
    shape: ShapeSource,
}

enum ShapeSource {
    /// Built on demand by a macro-generated function.
    Deferred(fn() -> Shape),
    Owned(Shape),
}

impl<'a, T> Inspected<'a, T> {
    pub fn new(eval: impl Fn() -> T + 'a, shape: fn() -> Shape) -> Self {
        Inspected {
            eval: Box::new(eval),
            shape: ShapeSource::Deferred(shape),
        }
    }

    /// Capture with an already-built shape, e.g. a compiled closure body.
    pub fn with_shape(eval: impl Fn() -> T + 'a, shape: Shape) -> Self {
        Inspected {
            eval: Box::new(eval),
            shape: ShapeSource::Owned(shape),
        }
    }

    pub fn evaluate(&self) -> T {
        (self.eval)()
    }

    pub fn shape(&self) -> Cow<'_, Shape> {
        match &self.shape {
            ShapeSource::Deferred(build) => Cow::Owned(build()),
            ShapeSource::Owned(shape) => Cow::Borrowed(shape),
        }
    }
}

impl<T> fmt::Debug for Inspected<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.shape {
            ShapeSource::Deferred(_) => "deferred",
            ShapeSource::Owned(_) => "owned",
        };
        f.debug_struct("Inspected")
            .field("shape", &source)
            .finish_non_exhaustive()
    }
}
