//! Generic SQL dialect.

use super::{Dialect, Placeholders};
use crate::compiler::CompileOptions;
use crate::fragment::NoCustom;
use crate::value::SqlValue;

/// A generic SQL dialect using ANSI SQL standards.
///
/// `?` placeholders, double-quoted identifiers, no custom segments.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    type Custom = NoCustom;
    type Context = Placeholders;

    fn name(&self) -> &'static str {
        "generic"
    }

    fn context(&self, options: &CompileOptions) -> Placeholders {
        Placeholders::new(options)
    }

    fn placeholder(&self, ctx: &mut Placeholders, value: &SqlValue) -> String {
        ctx.allocate(value, |_| String::from("?"))
    }

    fn on_custom(
        &self,
        _ctx: &mut Placeholders,
        _custom: &NoCustom,
        _without_transform: bool,
    ) -> (String, Vec<SqlValue>) {
        unreachable!("`NoCustom` has no values")
    }
}
