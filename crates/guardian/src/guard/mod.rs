//! The guard clauses.
//!
//! Every expression check follows the same steps:
//!
//! 1. A missing expression fails with `NullArgument("expression")`.
//! 2. In strict mode, an expression the resolver cannot name fails with
//!    `UnsupportedExpression` before it is evaluated.
//! 3. The expression is evaluated once and the predicate applied.
//! 4. Only on failure is the expression named; unnamed expressions report
//!    [`Parameter::Unknown`].

use std::borrow::Borrow;

use guardian_resolve::{NameResolver, Resolution};
use uuid::Uuid;

use crate::config::{config, GuardConfig};
use crate::error::{GuardError, Parameter};
use crate::inspected::Inspected;
use crate::uri::{Uri, UriKind};
use crate::value::{Integer, NullElements, Nullable, RangeConstraint, Sequence};
use crate::DefaultResolver;

/// Name reported when the expression itself is missing.
const EXPRESSION: &str = "expression";

/// Name reported when a value check is given no parameter name.
const PARAMETER_NAME: &str = "parameter_name";

/// Name reported when a member check is given no property name.
const PROPERTY_NAME: &str = "property_name";

/// Guard clauses bound to a configuration and a name resolver.
#[derive(Clone, Debug, Default)]
pub struct Guard<R = DefaultResolver> {
    config: GuardConfig,
    resolver: R,
}

impl Guard<DefaultResolver> {
    pub fn new(config: GuardConfig) -> Self {
        Guard {
            config,
            resolver: DefaultResolver::default(),
        }
    }

    /// A guard using the process-wide [`config`].
    pub fn global() -> Self {
        Self::new(config())
    }
}

/// An expression that passed the pre-evaluation checks.
struct Subject<'e, 'a, V> {
    expr: &'e Inspected<'a, V>,
    /// Set when strict mode already resolved the name.
    resolution: Option<Resolution>,
}

impl<R: NameResolver> Guard<R> {
    pub fn with_resolver(config: GuardConfig, resolver: R) -> Self {
        Guard { config, resolver }
    }

    pub fn config(&self) -> GuardConfig {
        self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Fails when the expression evaluates to null.
    pub fn null<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Nullable + 'e,
    {
        let subject = self.subject(expr.into())?;
        if subject.expr.evaluate().is_null() {
            return self.fail(subject, |parameter| GuardError::NullArgument { parameter });
        }
        Ok(())
    }

    /// Fails when the sequence has no elements.
    pub fn empty<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Sequence + 'e,
    {
        let subject = self.subject(expr.into())?;
        if !subject.expr.evaluate().has_elements() {
            return self.fail(subject, |parameter| GuardError::EmptyArgument { parameter });
        }
        Ok(())
    }

    /// Fails when the value is null or has no elements.
    pub fn null_or_empty<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Nullable + 'e,
        V::Value: Sequence,
    {
        let subject = self.subject(expr.into())?;
        let value = subject.expr.evaluate();
        match value.value() {
            None => self.fail(subject, |parameter| GuardError::NullArgument { parameter }),
            Some(sequence) if !sequence.has_elements() => {
                self.fail(subject, |parameter| GuardError::EmptyArgument { parameter })
            }
            Some(_) => Ok(()),
        }
    }

    /// Fails when the value is null, has no elements, or has a null element.
    pub fn null_or_empty_or_null_elements<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Nullable + 'e,
        V::Value: Sequence + NullElements,
    {
        let subject = self.subject(expr.into())?;
        let value = subject.expr.evaluate();
        match value.value() {
            None => self.fail(subject, |parameter| GuardError::NullArgument { parameter }),
            Some(sequence) if !sequence.has_elements() => {
                self.fail(subject, |parameter| GuardError::EmptyArgument { parameter })
            }
            Some(sequence) if sequence.contains_null() => {
                self.fail(subject, |parameter| GuardError::ContainsNullElements { parameter })
            }
            Some(_) => Ok(()),
        }
    }

    /// Fails when the value is greater than zero.
    pub fn positive<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Integer + 'e,
    {
        self.range(expr.into(), RangeConstraint::Positive)
    }

    /// Fails when the value is zero or greater.
    pub fn positive_or_zero<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Integer + 'e,
    {
        self.range(expr.into(), RangeConstraint::PositiveOrZero)
    }

    /// Fails when the value is less than zero.
    pub fn negative<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Integer + 'e,
    {
        self.range(expr.into(), RangeConstraint::Negative)
    }

    /// Fails when the value is zero or less.
    pub fn negative_or_zero<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Integer + 'e,
    {
        self.range(expr.into(), RangeConstraint::NegativeOrZero)
    }

    /// Fails when the URI is null or relative.
    pub fn null_or_relative<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Nullable<Value = Uri> + 'e,
    {
        self.uri(expr.into(), UriKind::Relative)
    }

    /// Fails when the URI is null or absolute.
    pub fn null_or_absolute<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Nullable<Value = Uri> + 'e,
    {
        self.uri(expr.into(), UriKind::Absolute)
    }

    /// Fails when the UUID is nil.
    pub fn empty_guid<'e, 'a: 'e, V>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Borrow<Uuid> + 'e,
    {
        let subject = self.subject(expr.into())?;
        let value = subject.expr.evaluate();
        let uuid: &Uuid = value.borrow();
        if uuid.is_nil() {
            return self.fail(subject, |parameter| GuardError::EmptyArgument { parameter });
        }
        Ok(())
    }

    /// Name an expression without checking it.
    ///
    /// Returns `Ok(None)` for expressions the resolver cannot name, in
    /// strict mode too.
    pub fn parse<'e, 'a: 'e, V: 'e>(
        &self,
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<Option<String>, GuardError> {
        let expr = expr.into().ok_or_else(missing_expression)?;
        let resolution = self.resolver.resolve(&expr.shape());
        Ok(resolution.into_path().map(|path| path.to_string()))
    }

    fn range<'e, 'a: 'e, V: Integer + 'e>(
        &self,
        expr: Option<&'e Inspected<'a, V>>,
        constraint: RangeConstraint,
    ) -> Result<(), GuardError> {
        let subject = self.subject(expr)?;
        let actual = subject.expr.evaluate().widen();
        if constraint.rejects(actual) {
            return self.fail(subject, |parameter| GuardError::OutOfRange {
                parameter,
                actual,
                constraint,
            });
        }
        Ok(())
    }

    /// `rejected` is the kind the check refuses.
    fn uri<'e, 'a: 'e, V: Nullable<Value = Uri> + 'e>(
        &self,
        expr: Option<&'e Inspected<'a, V>>,
        rejected: UriKind,
    ) -> Result<(), GuardError> {
        let subject = self.subject(expr)?;
        let value = subject.expr.evaluate();
        match value.value() {
            None => self.fail(subject, |parameter| GuardError::NullArgument { parameter }),
            Some(uri) if uri.kind() == rejected => {
                self.fail(subject, |parameter| GuardError::InvalidUriKind {
                    parameter,
                    found: rejected,
                })
            }
            Some(_) => Ok(()),
        }
    }

    fn subject<'e, 'a, V>(
        &self,
        expr: Option<&'e Inspected<'a, V>>,
    ) -> Result<Subject<'e, 'a, V>, GuardError> {
        let expr = expr.ok_or_else(missing_expression)?;
        if !self.config.strict {
            return Ok(Subject {
                expr,
                resolution: None,
            });
        }
        let resolution = self.resolver.resolve(&expr.shape());
        if !resolution.is_supported() {
            tracing::debug!("strict mode rejected an unsupported expression");
            return Err(GuardError::UnsupportedExpression);
        }
        Ok(Subject {
            expr,
            resolution: Some(resolution),
        })
    }

    fn fail<V>(
        &self,
        subject: Subject<'_, '_, V>,
        error: impl FnOnce(Parameter) -> GuardError,
    ) -> Result<(), GuardError> {
        let resolution = subject
            .resolution
            .unwrap_or_else(|| self.resolver.resolve(&subject.expr.shape()));
        let error = error(Parameter::from(resolution));
        tracing::debug!(kind = ?error.kind(), %error, "guard failed");
        Err(error)
    }

    /// Fails when `value` is null. No name resolution is involved.
    pub fn null_value<N: Nullable + ?Sized>(&self, value: &N, name: &str) -> Result<(), GuardError> {
        let parameter = value_name(name, PARAMETER_NAME)?;
        if value.is_null() {
            return fail_value(GuardError::NullArgument { parameter });
        }
        Ok(())
    }

    /// Fails when `value` is null, reporting `name.property`.
    pub fn null_member<N: Nullable + ?Sized>(
        &self,
        value: &N,
        name: &str,
        property: &str,
    ) -> Result<(), GuardError> {
        let parameter = value_name(name, PARAMETER_NAME)?;
        let property = value_name(property, PROPERTY_NAME)?;
        if value.is_null() {
            return fail_value(GuardError::NullArgument {
                parameter: Parameter::named(format!("{parameter}.{property}")),
            });
        }
        Ok(())
    }

    /// Fails when `value` is null or has no elements.
    pub fn null_or_empty_value<N>(&self, value: &N, name: &str) -> Result<(), GuardError>
    where
        N: Nullable + ?Sized,
        N::Value: Sequence,
    {
        let parameter = value_name(name, PARAMETER_NAME)?;
        match value.value() {
            None => fail_value(GuardError::NullArgument { parameter }),
            Some(sequence) if !sequence.has_elements() => {
                fail_value(GuardError::EmptyArgument { parameter })
            }
            Some(_) => Ok(()),
        }
    }

    /// Fails when `value` is null, has no elements, or has a null element.
    pub fn null_or_empty_or_null_elements_value<N>(
        &self,
        value: &N,
        name: &str,
    ) -> Result<(), GuardError>
    where
        N: Nullable + ?Sized,
        N::Value: Sequence + NullElements,
    {
        let parameter = value_name(name, PARAMETER_NAME)?;
        match value.value() {
            None => fail_value(GuardError::NullArgument { parameter }),
            Some(sequence) if !sequence.has_elements() => {
                fail_value(GuardError::EmptyArgument { parameter })
            }
            Some(sequence) if sequence.contains_null() => {
                fail_value(GuardError::ContainsNullElements { parameter })
            }
            Some(_) => Ok(()),
        }
    }
}

fn missing_expression() -> GuardError {
    tracing::debug!("guard called without an expression");
    GuardError::NullArgument {
        parameter: Parameter::named(EXPRESSION),
    }
}

/// A caller-supplied name; empty counts as missing and blames `argument`.
fn value_name(name: &str, argument: &str) -> Result<Parameter, GuardError> {
    if name.is_empty() {
        return fail_value(GuardError::NullArgument {
            parameter: Parameter::named(argument),
        });
    }
    Ok(Parameter::named(name))
}

fn fail_value<T>(error: GuardError) -> Result<T, GuardError> {
    tracing::debug!(kind = ?error.kind(), %error, "guard failed");
    Err(error)
}

/// Guard clauses using the process-wide configuration and the default
/// resolver.
///
/// ```text
/// Against::null(&expr!(&thing.nested.field))?;
/// Against::positive(&expr!(thing.delta))?;
/// Against::null_value(&name, "name")?;
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Against;

macro_rules! delegate_expression_checks {
    ($($(#[$doc:meta])* $name:ident where V: $bound:path;)*) => {
        impl Against {
            $(
                $(#[$doc])*
                pub fn $name<'e, 'a: 'e, V>(
                    expr: impl Into<Option<&'e Inspected<'a, V>>>,
                ) -> Result<(), GuardError>
                where
                    V: $bound + 'e,
                {
                    Guard::global().$name(expr)
                }
            )*
        }
    };
}

delegate_expression_checks! {
    /// See [`Guard::null`].
    null where V: Nullable;
    /// See [`Guard::empty`].
    empty where V: Sequence;
    /// See [`Guard::positive`].
    positive where V: Integer;
    /// See [`Guard::positive_or_zero`].
    positive_or_zero where V: Integer;
    /// See [`Guard::negative`].
    negative where V: Integer;
    /// See [`Guard::negative_or_zero`].
    negative_or_zero where V: Integer;
    /// See [`Guard::null_or_relative`].
    null_or_relative where V: Nullable<Value = Uri>;
    /// See [`Guard::null_or_absolute`].
    null_or_absolute where V: Nullable<Value = Uri>;
    /// See [`Guard::empty_guid`].
    empty_guid where V: Borrow<Uuid>;
}

impl Against {
    /// See [`Guard::null_or_empty`].
    pub fn null_or_empty<'e, 'a: 'e, V>(
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Nullable + 'e,
        V::Value: Sequence,
    {
        Guard::global().null_or_empty(expr)
    }

    /// See [`Guard::null_or_empty_or_null_elements`].
    pub fn null_or_empty_or_null_elements<'e, 'a: 'e, V>(
        expr: impl Into<Option<&'e Inspected<'a, V>>>,
    ) -> Result<(), GuardError>
    where
        V: Nullable + 'e,
        V::Value: Sequence + NullElements,
    {
        Guard::global().null_or_empty_or_null_elements(expr)
    }

    /// See [`Guard::null_value`].
    pub fn null_value<N: Nullable + ?Sized>(value: &N, name: &str) -> Result<(), GuardError> {
        Guard::global().null_value(value, name)
    }

    /// See [`Guard::null_member`].
    pub fn null_member<N: Nullable + ?Sized>(
        value: &N,
        name: &str,
        property: &str,
    ) -> Result<(), GuardError> {
        Guard::global().null_member(value, name, property)
    }

    /// See [`Guard::null_or_empty_value`].
    pub fn null_or_empty_value<N>(value: &N, name: &str) -> Result<(), GuardError>
    where
        N: Nullable + ?Sized,
        N::Value: Sequence,
    {
        Guard::global().null_or_empty_value(value, name)
    }

    /// See [`Guard::null_or_empty_or_null_elements_value`].
    pub fn null_or_empty_or_null_elements_value<N>(value: &N, name: &str) -> Result<(), GuardError>
    where
        N: Nullable + ?Sized,
        N::Value: Sequence + NullElements,
    {
        Guard::global().null_or_empty_or_null_elements_value(value, name)
    }
}
