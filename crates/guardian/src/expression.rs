use crate::error::GuardError;
use crate::guard::Guard;
use crate::inspected::Inspected;

/// The public name resolver.
///
/// ```text
/// assert_eq!(Expression::parse(&expr!(thing.nested.get_value()))?, Some("thing.nested.value".into()));
/// assert_eq!(Expression::parse(&expr!(thing.items[0]))?, None);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Expression;

impl Expression {
    /// Resolve the dotted name of `expr` with the default resolver.
    ///
    /// A missing expression fails with `NullArgument("expression")`; an
    /// expression that cannot be named is `Ok(None)`.
    pub fn parse<'e, 'a: 'e, V: 'e>(
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<Option<String>, GuardError> {
        Guard::global().parse(expr)
    }
}
