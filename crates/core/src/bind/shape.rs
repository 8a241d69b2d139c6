//! Shape categories of bindable types.

/// Container flavour of a sequence shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// `Vec<T>`.
    Array,
    /// Any other single-type-parameter collection (`VecDeque`, sets, ...).
    Collection,
}

/// The binding category of a type, resolved from the type itself.
///
/// Sequences and maps dispatch on the shape of their element types: a
/// sequence of literals reads the positional run after its switch, a sequence
/// of objects reads a `;`-separated list of embedded command lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `bool`: presence/turn of a switch.
    Boolean,
    /// `Option<T>`: `None` when the switch is absent.
    Optional(Box<Shape>),
    /// Anything parsed from a single string.
    Literal {
        /// Rust type name.
        type_name: &'static str,
    },
    /// An array or collection.
    Sequence {
        /// Container flavour.
        container: Container,
        /// Element shape.
        element: Box<Shape>,
    },
    /// A map from literal keys to values of any shape.
    Map {
        /// Key shape.
        key: Box<Shape>,
        /// Value shape.
        value: Box<Shape>,
    },
    /// A nested object with its own schema.
    Object {
        /// Rust type name.
        type_name: &'static str,
    },
}

impl Shape {
    /// `true` for shapes coercible from one string (`Literal` and `Boolean`).
    pub fn is_literal(&self) -> bool {
        matches!(self, Shape::Literal { .. } | Shape::Boolean)
    }

    /// `true` for nested objects.
    pub fn is_object(&self) -> bool {
        matches!(self, Shape::Object { .. })
    }
}
