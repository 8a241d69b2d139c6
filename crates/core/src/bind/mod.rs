//! Type-directed binding of a [`SwitchIndex`] onto Rust values.
//!
//! Every bindable type implements [`Bind`], which reports the type's
//! [`Shape`] and knows how to produce a value of that type from a [`Slot`]
//! of the index. Binding is recursive: nested objects and maps re-enter the
//! tokenizer and build a fresh index from their embedded command line.
//!
//! Object types describe their members once through [`Bindable::schema`];
//! the [`Binder`] caches each schema the first time the type is bound.

/// Collection, map, and optional bindings.
mod collection;
/// Custom per-type converters.
mod convert;
/// Literal coercion.
pub mod literal;
/// Object schemas.
pub mod object;
/// Shape categories.
pub mod shape;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub use literal::{Literal, parse_enum};
pub use object::{Bindable, Hook, Member, ObjectSchema};
pub use shape::{Container, Shape};

use crate::error::{Result, SwitchError};
use crate::index::{DEFAULT_NAMESPACE, SwitchIndex};
use crate::options::NameComparison;
use convert::Converters;

/// Where a raw value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    /// A switch looked up by alias key in a namespace.
    Named {
        /// Name or `|`-separated alias list.
        key: &'a str,
        /// Namespace of the switch.
        namespace: usize,
    },
    /// A positional value.
    Positional(usize),
    /// Text already in hand: a sequence item or an object-list segment.
    Text {
        /// The raw text.
        text: &'a str,
        /// Label of the enclosing slot, used in error messages.
        owner: &'a str,
    },
}

impl<'a> Slot<'a> {
    /// Slot for switch `key` in `namespace`.
    pub fn named(key: &'a str, namespace: usize) -> Self {
        Slot::Named { key, namespace }
    }

    /// The raw string behind this slot, if any.
    pub fn raw<'s>(self, index: &'s SwitchIndex) -> Option<&'s str>
    where
        'a: 's,
    {
        match self {
            Slot::Named { key, namespace } => index.value_of(key, namespace),
            Slot::Positional(i) => index.positional_at(i),
            Slot::Text { text, .. } => Some(text),
        }
    }

    /// Whether the slot exists at all (a bare flag exists without a value).
    pub fn is_present(self, index: &SwitchIndex) -> bool {
        match self {
            Slot::Named { key, namespace } => index.contains(key, namespace),
            Slot::Positional(i) => index.positional_at(i).is_some(),
            Slot::Text { .. } => true,
        }
    }

    /// Items of a literal sequence bound from this slot.
    ///
    /// A switch contributes the positional run that follows it; a positional
    /// value or in-hand text is tokenized as an embedded command line. An
    /// absent positional slot has no items.
    pub fn items(self, index: &SwitchIndex) -> Result<Vec<String>> {
        match self {
            Slot::Named { key, namespace } => {
                Ok(index.suffix_of(key, namespace).map(str::to_string).collect())
            }
            _ => match self.raw(index) {
                Some(text) => crate::grammar::tokenize(text),
                None => Ok(Vec::new()),
            },
        }
    }

    /// Human-readable name used in error messages.
    pub fn label(self) -> String {
        match self {
            Slot::Named { key, .. } => key.to_string(),
            Slot::Positional(i) => format!("#{i}"),
            Slot::Text { owner, .. } => owner.to_string(),
        }
    }
}

/// A type that can be produced from a slot of a [`SwitchIndex`].
///
/// Implemented for primitives, `String`, common `FromStr` types, `Option`,
/// sequences, maps, and every [`Bindable`] object. User enums and `FromStr`
/// types opt in with [`literal_enum!`](crate::literal_enum) and
/// [`literal_from_str!`](crate::literal_from_str).
pub trait Bind: Default + Sized + 'static {
    /// Binding category of the type.
    fn shape() -> Shape;

    /// Bind the value of schema member `key`.
    ///
    /// Differs from slot binding only for `bool` (switch presence) and
    /// `Option` (absence yields `None`).
    fn bind_member(
        binder: &Binder,
        index: &SwitchIndex,
        key: &str,
        namespace: usize,
        current: Self,
    ) -> Result<Self> {
        binder.slot(index, Slot::named(key, namespace), current)
    }

    /// Bind from `slot`, falling back to `current` where the rules allow it.
    fn bind_slot(binder: &Binder, index: &SwitchIndex, slot: Slot<'_>, current: Self)
    -> Result<Self>;
}

/// Binds indexes onto typed values.
///
/// Holds the custom converter registry and the per-type schema cache. A
/// binder is `Send + Sync`; one instance can serve any number of binds.
#[derive(Default)]
pub struct Binder {
    converters: Converters,
    schemas: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Binder {
    /// Binder without custom converters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter for exactly `T`.
    ///
    /// The converter receives the slot's raw value (`None` when absent) and
    /// takes precedence over every built-in rule for `T`, at any depth.
    #[must_use]
    pub fn with_converter<T, F>(mut self, convert: F) -> Self
    where
        T: Bind,
        F: Fn(Option<&str>) -> Result<T> + Send + Sync + 'static,
    {
        self.converters.insert(convert);
        self
    }

    /// Bind `index` onto a fresh `T`.
    pub fn bind<T: Bindable>(&self, index: &SwitchIndex) -> Result<T> {
        self.bind_onto(index, T::default())
    }

    /// Bind `index` onto `target`, keeping its values for absent switches.
    pub fn bind_onto<T: Bindable>(&self, index: &SwitchIndex, target: T) -> Result<T> {
        let schema = self.schema::<T>();
        object::bind_object(self, index, &schema, target)
    }

    /// Bind a single switch as `T`.
    pub fn named<T: Bind>(&self, index: &SwitchIndex, key: &str, namespace: usize) -> Result<T> {
        self.member(index, key, namespace, T::default())
    }

    /// Bind a single positional value as `T`.
    pub fn positional<T: Bind>(&self, index: &SwitchIndex, position: usize) -> Result<T> {
        self.slot(index, Slot::Positional(position), T::default())
    }

    /// Member binding with converter override.
    pub fn member<T: Bind>(
        &self,
        index: &SwitchIndex,
        key: &str,
        namespace: usize,
        current: T,
    ) -> Result<T> {
        match self.converters.get::<T>() {
            Some(convert) => convert(index.value_of(key, namespace)),
            None => T::bind_member(self, index, key, namespace, current),
        }
    }

    /// Slot binding with converter override.
    pub fn slot<T: Bind>(&self, index: &SwitchIndex, slot: Slot<'_>, current: T) -> Result<T> {
        match self.converters.get::<T>() {
            Some(convert) => convert(slot.raw(index)),
            None => T::bind_slot(self, index, slot, current),
        }
    }

    pub(crate) fn schema<T: Bindable>(&self) -> Arc<ObjectSchema<T>> {
        let id = TypeId::of::<T>();
        let mut cache = self
            .schemas
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(hit) = cache.get(&id).and_then(|s| Arc::clone(s).downcast().ok()) {
            return hit;
        }
        tracing::trace!(schema = std::any::type_name::<T>(), "building schema");
        let schema = Arc::new(T::schema());
        cache.insert(id, Arc::clone(&schema) as Arc<dyn Any + Send + Sync>);
        schema
    }
}

/// Index `args` and bind them onto a fresh `T`.
pub fn from_args<T: Bindable, S: AsRef<str>>(args: &[S]) -> Result<T> {
    SwitchIndex::parse(args)?.bind()
}

/// Hook names match namespace-1 switches regardless of the index's policy.
pub(crate) fn default_namespace_has(index: &SwitchIndex, name: &str) -> bool {
    index
        .named_in(DEFAULT_NAMESPACE)
        .any(|n| NameComparison::CaseInsensitive.matches(&n.name, name))
}

pub(crate) fn unsupported<T: 'static>(slot: Slot<'_>) -> SwitchError {
    SwitchError::unsupported(&slot.label(), std::any::type_name::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(args: &[&str]) -> SwitchIndex {
        SwitchIndex::parse(args).unwrap()
    }

    #[test]
    fn slot_raw_values() {
        let ix = index(&["pos", "-a:1", "-b"]);
        assert_eq!(Slot::named("a", 1).raw(&ix), Some("1"));
        assert_eq!(Slot::named("b", 1).raw(&ix), None);
        assert!(Slot::named("b", 1).is_present(&ix));
        assert!(!Slot::named("c", 1).is_present(&ix));
        assert_eq!(Slot::Positional(0).raw(&ix), Some("pos"));
        assert_eq!(Slot::Positional(1).raw(&ix), None);
    }

    #[test]
    fn slot_items() {
        let ix = index(&["-n", "1", "2", "\"3 4\""]);
        assert_eq!(Slot::named("n", 1).items(&ix).unwrap(), ["1", "2", "\"3 4\""]);
        assert_eq!(Slot::Positional(2).items(&ix).unwrap(), ["3 4"]);
        assert!(Slot::Positional(9).items(&ix).unwrap().is_empty());
        assert!(matches!(
            Slot::Text { text: "  ", owner: "x" }.items(&ix),
            Err(SwitchError::EmptyInput)
        ));
    }

    #[test]
    fn slot_labels() {
        assert_eq!(Slot::named("o|out", 1).label(), "o|out");
        assert_eq!(Slot::Positional(3).label(), "#3");
        assert_eq!(Slot::Text { text: "x", owner: "nums" }.label(), "nums");
    }

    #[test]
    fn named_and_positional_entry_points() {
        let ix = index(&["42", "-port:8080", "-tags", "a", "b"]);
        let binder = Binder::new();
        assert_eq!(binder.named::<u16>(&ix, "port", 1).unwrap(), 8080);
        assert_eq!(binder.positional::<i64>(&ix, 0).unwrap(), 42);
        assert_eq!(binder.named::<Vec<String>>(&ix, "tags", 1).unwrap(), ["a", "b"]);
        assert_eq!(binder.named::<Option<u16>>(&ix, "missing", 1).unwrap(), None);
        assert_eq!(binder.named::<u16>(&ix, "missing", 1).unwrap(), 0);
    }

    #[test]
    fn converter_short_circuits_builtin_rules() {
        let ix = index(&["-port:eighty"]);
        let binder = Binder::new().with_converter::<u16, _>(|raw| match raw {
            Some("eighty") => Ok(80),
            other => Err(SwitchError::invalid("port", format!("unknown {other:?}"))),
        });
        assert_eq!(binder.named::<u16>(&ix, "port", 1).unwrap(), 80);
        assert!(Binder::new().named::<u16>(&ix, "port", 1).is_err());
    }

    #[test]
    fn binder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Binder>();
    }
}
