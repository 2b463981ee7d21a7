//! Common ID Types
//!
//! Type-safe wrappers over the store's `SERIAL` primary keys.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type ProductId = Id<markers::Product>;
/// let id = ProductId::new(7);
/// assert_eq!(id.value(), 7);
/// ```
pub struct Id<T> {
    value: i32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw row id
    pub const fn new(value: i32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying integer
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Row ids handed out by the store are always positive
    pub const fn is_positive(&self) -> bool {
        self.value > 0
    }
}

// derive では `T: Clone` 等の境界が付いてしまうため手動実装
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i32> for Id<T> {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i32 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i32::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Category IDs
    pub struct Category;

    /// Marker for Product IDs
    pub struct Product;

    /// Marker for ProductVariant IDs
    pub struct Variant;

    /// Marker for VariantImage IDs
    pub struct Image;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type CategoryId = Id<markers::Category>;
pub type ProductId = Id<markers::Product>;
pub type VariantId = Id<markers::Variant>;
pub type ImageId = Id<markers::Image>;
