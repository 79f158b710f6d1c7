//! Per-compile parameter state.

use oxide_sql_core::{CompileOptions, Placeholders, SqlValue};
use tracing::trace;

use crate::infer::infer_type;
use crate::types::WireType;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Empty,
    Inferred(WireType),
    Explicit(WireType),
}

impl Slot {
    fn wire_type(self) -> Option<WireType> {
        match self {
            Self::Empty => None,
            Self::Inferred(ty) | Self::Explicit(ty) => Some(ty),
        }
    }
}

/// Placeholder counter and type collector for one compile call.
///
/// Created fresh by every compile and dropped before it returns. Explicit
/// types always win over inferred ones for the same position, whichever
/// was recorded first.
#[derive(Debug)]
pub struct ParamContext {
    placeholders: Placeholders,
    slots: Vec<Slot>,
}

impl ParamContext {
    /// Creates an empty context honoring the options' placeholder override.
    #[must_use]
    pub fn new(options: &CompileOptions) -> Self {
        Self {
            placeholders: Placeholders::new(options),
            slots: vec![],
        }
    }

    /// Allocates the next position, renders its placeholder and records the
    /// inferred type of `value`.
    ///
    /// `default` renders the placeholder from the 1-based position unless
    /// the caller supplied an override.
    pub fn allocate(&mut self, value: &SqlValue, default: impl FnOnce(usize) -> String) -> String {
        let sql = self.placeholders.allocate(value, default);
        let position = self.position();
        self.reserve(position);
        match infer_type(value) {
            Ok(ty) => self.record_inferred(position, ty),
            Err(error) => trace!(position, %error, "no inferred parameter type"),
        }
        sql
    }

    /// Returns the 1-based position of the last allocated placeholder.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.placeholders.count()
    }

    /// Records an inferred type unless the position has an explicit one.
    pub fn record_inferred(&mut self, position: usize, ty: WireType) {
        let Some(slot) = self.slot_mut(position) else {
            return;
        };
        if !matches!(slot, Slot::Explicit(_)) {
            *slot = Slot::Inferred(ty);
        }
    }

    /// Records an explicit type, replacing anything recorded before.
    pub fn record_explicit(&mut self, position: usize, ty: WireType) {
        if let Some(slot) = self.slot_mut(position) {
            *slot = Slot::Explicit(ty);
        }
    }

    /// Returns true when any position has a type.
    #[must_use]
    pub fn has_types(&self) -> bool {
        self.slots.iter().any(|slot| *slot != Slot::Empty)
    }

    /// Consumes the context and returns the collected types by position.
    #[must_use]
    pub fn into_types(self) -> Vec<Option<WireType>> {
        self.slots.into_iter().map(Slot::wire_type).collect()
    }

    // Grows the slots so every position up to `position` has one.
    fn reserve(&mut self, position: usize) {
        if self.slots.len() < position {
            self.slots.resize(position, Slot::Empty);
        }
    }

    // Positions are 1-based; position 0 never holds a type.
    fn slot_mut(&mut self, position: usize) -> Option<&mut Slot> {
        let index = position.checked_sub(1)?;
        self.reserve(position);
        self.slots.get_mut(index)
    }
}
