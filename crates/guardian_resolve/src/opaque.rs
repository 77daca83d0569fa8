use crate::{NameResolver, Resolution, Shape};

/// A resolver for builds that cannot inspect expressions at all.
///
/// Every shape is [`Resolution::Unsupported`], so failures carry the
/// sentinel parameter name.
#[derive(Copy, Clone, Debug, Default)]
pub struct OpaqueResolver;

impl NameResolver for OpaqueResolver {
    fn resolve(&self, shape: &Shape) -> Resolution {
        tracing::trace!(shape = shape.describe(), "opaque resolver");
        Resolution::Unsupported
    }
}
