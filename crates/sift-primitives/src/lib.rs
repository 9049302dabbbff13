//! Value-kind vocabulary shared by the criterion core and its callers.
//!
//! Every criterion advertises the set of kinds it can match, and every shape
//! declares the set of kinds it accepts. Both are expressed with the
//! registry-driven types in this crate.

#[macro_use]
mod macros;

use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ValueKind
///
/// Canonical runtime value kind.
/// The discriminant doubles as the bit position inside `ValueKinds`.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ValueKind {
    Null = 0,
    Bool = 1,
    Number = 2,
    Text = 3,
    List = 4,
    Record = 5,
}

impl ValueKind {
    /// Return the full metadata descriptor for one value kind.
    #[must_use]
    pub const fn metadata(self) -> ValueKindMetadata {
        value_kind_registry!(metadata_from_registry, self)
    }

    /// Stable lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }

    /// Return whether values of this kind can bound a range.
    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        self.metadata().supports_ordering
    }

    /// Return whether parity criteria apply to this kind.
    #[must_use]
    pub const fn supports_parity(self) -> bool {
        self.metadata().supports_parity
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// ValueKindMetadata
///
/// Capability metadata for one value kind.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ValueKindMetadata {
    pub label: &'static str,
    pub supports_ordering: bool,
    pub supports_parity: bool,
}

/// Ordered list of all value kinds in registry order.
pub const ALL_VALUE_KINDS: [ValueKind; 6] = value_kind_registry!(all_kinds_from_registry);

///
/// ValueKinds
///
/// Small copyable set of value kinds.
/// Serializes as a list of kind labels.
///

#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(from = "Vec<ValueKind>", into = "Vec<ValueKind>")]
pub struct ValueKinds(u8);

impl ValueKinds {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b11_1111);
    pub const SCALARS: Self = Self(0b00_1111);
    pub const ORDERED: Self = Self(ValueKind::Number.bit() | ValueKind::Text.bit());

    #[must_use]
    pub const fn only(kind: ValueKind) -> Self {
        Self(kind.bit())
    }

    #[must_use]
    pub const fn with(self, kind: ValueKind) -> Self {
        Self(self.0 | kind.bit())
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[must_use]
    pub const fn contains(self, kind: ValueKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns `true` when every kind in `other` is also in `self`.
    #[must_use]
    pub const fn covers(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Every kind whose registry entry has `capability`.
    pub fn supporting(capability: impl Fn(ValueKind) -> bool) -> Self {
        ALL_VALUE_KINDS
            .into_iter()
            .filter(|kind| capability(*kind))
            .collect()
    }

    /// Iterate kinds in registry order.
    pub fn iter(self) -> impl Iterator<Item = ValueKind> {
        ALL_VALUE_KINDS
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<ValueKind> for ValueKinds {
    fn from_iter<I: IntoIterator<Item = ValueKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl From<ValueKind> for ValueKinds {
    fn from(kind: ValueKind) -> Self {
        Self::only(kind)
    }
}

impl From<Vec<ValueKind>> for ValueKinds {
    fn from(kinds: Vec<ValueKind>) -> Self {
        kinds.into_iter().collect()
    }
}

impl From<ValueKinds> for Vec<ValueKind> {
    fn from(kinds: ValueKinds) -> Self {
        kinds.iter().collect()
    }
}

impl fmt::Debug for ValueKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for ValueKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }

        for (index, kind) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            f.write_str(kind.label())?;
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_matches_discriminants() {
        for (index, kind) in ALL_VALUE_KINDS.iter().enumerate() {
            assert_eq!(*kind as usize, index);
        }
    }

    #[test]
    fn only_number_and_text_are_ordered() {
        assert_eq!(
            ValueKinds::supporting(ValueKind::supports_ordering),
            ValueKinds::ORDERED
        );
    }

    #[test]
    fn only_numbers_have_parity() {
        assert_eq!(
            ValueKinds::supporting(ValueKind::supports_parity),
            ValueKinds::only(ValueKind::Number)
        );
    }

    #[test]
    fn scalars_exclude_containers() {
        assert!(ValueKinds::SCALARS.contains(ValueKind::Text));
        assert!(!ValueKinds::SCALARS.contains(ValueKind::List));
        assert!(!ValueKinds::SCALARS.contains(ValueKind::Record));
        assert!(ValueKinds::ALL.covers(ValueKinds::SCALARS));
    }

    #[test]
    fn set_operations() {
        let numbers = ValueKinds::only(ValueKind::Number);
        let text = ValueKinds::only(ValueKind::Text);

        assert_eq!(numbers.union(text), ValueKinds::ORDERED);
        assert!(numbers.intersection(text).is_empty());
        assert_eq!(ValueKinds::ORDERED.len(), 2);
        assert_eq!(ValueKinds::ORDERED.to_string(), "number|text");
        assert_eq!(ValueKinds::EMPTY.to_string(), "none");
    }

    #[test]
    fn serializes_as_label_list() {
        let kinds = ValueKinds::only(ValueKind::Null).with(ValueKind::Text);
        let json = serde_json::to_string(&kinds).unwrap();
        assert_eq!(json, r#"["null","text"]"#);

        let back: ValueKinds = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kinds);
    }
}
