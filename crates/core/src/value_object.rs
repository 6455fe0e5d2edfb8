//! Value object trait: equality by value, not identity.
//!
//! A value object has no identity of its own. A `Material` (a material type
//! paired with a quantity) is one: two materials holding the same type and the
//! same quantity are interchangeable.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity, compared field by field
/// - **Entity**: has identity, compared by id (see [`crate::Entity`])
///
/// Value objects are immutable; to "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Stock {
///     material: MaterialTypeId,
///     quantity: i64,
/// }
///
/// impl ValueObject for Stock {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
