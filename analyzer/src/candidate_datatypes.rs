//! The set of types that an expression could resolve to before
//! overload resolution narrows the set to one.
//!
//! The list is ordered and duplicate-tolerant. It is populated by the
//! semantic pass that resolves expressions; this crate reads and copies
//! the lists but never removes entries.

use ferroplc_dsl::common::TypeDescriptor;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateDatatypes {
    candidates: Vec<TypeDescriptor>,
}

impl CandidateDatatypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, descriptor: TypeDescriptor) {
        self.candidates.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TypeDescriptor> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.candidates.iter()
    }

    /// Returns the index of the first candidate equal to the descriptor.
    /// Duplicates are permitted and the first match by list order wins.
    pub fn position_of(&self, descriptor: &TypeDescriptor) -> Option<usize> {
        self.candidates
            .iter()
            .position(|candidate| candidate == descriptor)
    }

    /// Appends every candidate from the other list, in order, after the
    /// candidates already in this list. Existing entries are never
    /// replaced or reordered.
    pub fn append_from(&mut self, other: &CandidateDatatypes) {
        self.candidates.extend(other.candidates.iter().cloned());
    }
}
