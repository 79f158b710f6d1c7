//! Compiled parameter list with its type side channel.
//!
//! [`ParamList`] keeps the positional values exactly as the compiler
//! produced them. Wire types travel next to them, index-aligned, so a
//! driver can pass both to its bind step without the values changing shape.

use std::ops::Deref;
use std::sync::Arc;

use oxide_sql_core::SqlValue;
use tracing::debug;

use crate::types::WireType;

/// Positional parameters, optionally annotated with wire types.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamList {
    values: Vec<SqlValue>,
    types: Option<Arc<[Option<WireType>]>>,
}

impl ParamList {
    /// Wraps values without type metadata.
    #[must_use]
    pub const fn new(values: Vec<SqlValue>) -> Self {
        Self {
            values,
            types: None,
        }
    }

    /// Returns the values in binding order.
    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Consumes the list and returns the values.
    #[must_use]
    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }

    /// Attaches type metadata.
    ///
    /// Metadata is aligned to the values (padded with `None` or cut to
    /// length). Nothing is attached when every entry is `None`, and metadata
    /// that is already attached is never replaced. Returns whether the
    /// metadata was attached.
    pub fn attach_param_types(&mut self, metadata: &[Option<WireType>]) -> bool {
        if !metadata.iter().any(Option::is_some) {
            return false;
        }
        if self.types.is_some() {
            debug!("parameter types already attached, keeping the first set");
            return false;
        }
        let aligned: Arc<[Option<WireType>]> = (0..self.values.len())
            .map(|i| metadata.get(i).cloned().flatten())
            .collect();
        self.types = Some(aligned);
        true
    }

    /// Returns the attached metadata, one entry per value.
    #[must_use]
    pub fn param_types(&self) -> Option<&[Option<WireType>]> {
        self.types.as_deref()
    }

    /// Returns the wire type of the value at `index`, if known.
    #[must_use]
    pub fn param_type(&self, index: usize) -> Option<&WireType> {
        self.types.as_ref()?.get(index)?.as_ref()
    }
}

impl Deref for ParamList {
    type Target = [SqlValue];

    fn deref(&self) -> &[SqlValue] {
        &self.values
    }
}

impl From<Vec<SqlValue>> for ParamList {
    fn from(values: Vec<SqlValue>) -> Self {
        Self::new(values)
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a SqlValue;
    type IntoIter = std::slice::Iter<'a, SqlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Attaches type metadata to `params`. See [`ParamList::attach_param_types`].
pub fn attach_param_types_metadata(params: &mut ParamList, metadata: &[Option<WireType>]) -> bool {
    params.attach_param_types(metadata)
}

/// Reads the type metadata of `params`, if any was attached.
#[must_use]
pub fn param_type_metadata(params: &ParamList) -> Option<&[Option<WireType>]> {
    params.param_types()
}
