//! Structural equality for IR trees.
//!
//! `structure_eq` compares trees by shape: the `kindName` of every node and
//! the arrangement of children. It ignores "surface" fields that a
//! render-then-reparse cycle is allowed to change.
//!
//! # Ignored Fields
//!
//! - `text` - pre-rendered output, reformatted by the generator
//! - names, operators and literal payloads
//! - flags such as `questionDotToken` or `declarationKind`
//!
//! # Compared
//!
//! - `kindName` at every position
//! - child count and order

use super::Node;

/// Trait for structural equality comparison.
///
/// Unlike `PartialEq`, this ignores surface fields that may differ between
/// the original source and regenerated output.
pub trait StructureEq {
    /// Compare two values for structural equality.
    fn structure_eq(&self, other: &Self) -> bool;
}

impl StructureEq for Node {
    fn structure_eq(&self, other: &Self) -> bool {
        self.kind_name() == other.kind_name()
            && vec_structure_eq(&self.children(), &other.children())
    }
}

impl<T: StructureEq + ?Sized> StructureEq for &T {
    fn structure_eq(&self, other: &Self) -> bool {
        (**self).structure_eq(*other)
    }
}

impl<T: StructureEq + ?Sized> StructureEq for Box<T> {
    fn structure_eq(&self, other: &Self) -> bool {
        self.as_ref().structure_eq(other.as_ref())
    }
}

/// Helper for comparing slices.
pub fn vec_structure_eq<T: StructureEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structure_eq(y))
}

/// Helper for comparing optional values.
pub fn option_structure_eq<T: StructureEq>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.structure_eq(b),
        _ => false,
    }
}
