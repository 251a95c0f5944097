//! Null-reference and bounds fault detection on array-like containers.
//!
//! Every read and every write path performs the same two checks, in
//! order: the reference must be present (else a null-dereference fault)
//! and the index must fall in `[0, len)` (else an out-of-bounds fault).
//! There is no unchecked fast path, and a fault fires before any side
//! effect of the access is observable.

use crate::fault::Fault;

/// A nullable, sized, bounds-checked container reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayRef<T> {
    cells: Option<Vec<T>>,
}

impl<T: Clone> ArrayRef<T> {
    /// An absent (null) reference. Any access faults.
    #[must_use]
    pub const fn null() -> Self {
        Self { cells: None }
    }

    /// A present reference to `len` cells, each initialized to `fill`.
    /// A zero-length container is valid and faults on any index.
    #[must_use]
    pub fn alloc(len: usize, fill: T) -> Self {
        Self {
            cells: Some(vec![fill; len]),
        }
    }

    /// True when the reference is absent.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.cells.is_none()
    }

    /// Length of the referenced container; faults on a null reference.
    pub fn length(&self) -> Result<usize, Fault> {
        match &self.cells {
            Some(cells) => Ok(cells.len()),
            None => Err(Fault::null_dereference()),
        }
    }

    /// Checked read at `index`.
    pub fn get(&self, index: usize) -> Result<T, Fault> {
        let cells = self.cells.as_ref().ok_or_else(Fault::null_dereference)?;
        cells
            .get(index)
            .cloned()
            .ok_or_else(|| Fault::out_of_bounds(index, cells.len()))
    }

    /// Checked write at `index`. The store happens only after both
    /// checks pass.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), Fault> {
        let cells = self.cells.as_mut().ok_or_else(Fault::null_dereference)?;
        let len = cells.len();
        match cells.get_mut(index) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Fault::out_of_bounds(index, len)),
        }
    }
}
