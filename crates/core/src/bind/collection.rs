use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

use crate::bind::{Bind, Binder, Container, Shape, Slot, unsupported};
use crate::error::{Result, SwitchError};
use crate::grammar::MAP_PAIR_SEPARATORS;
use crate::index::{DEFAULT_NAMESPACE, SwitchIndex};

/// Separator between the embedded command lines of an object list.
const SEGMENT_SEPARATOR: char = ';';

impl<T: Bind> Bind for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }

    fn bind_member(
        binder: &Binder,
        index: &SwitchIndex,
        key: &str,
        namespace: usize,
        _current: Self,
    ) -> Result<Self> {
        if !index.contains(key, namespace) {
            return Ok(None);
        }
        binder.member(index, key, namespace, T::default()).map(Some)
    }

    fn bind_slot(binder: &Binder, index: &SwitchIndex, slot: Slot<'_>, _current: Self) -> Result<Self> {
        if !slot.is_present(index) {
            return Ok(None);
        }
        binder.slot(index, slot, T::default()).map(Some)
    }
}

/// Elements of a sequence, dispatched on the element shape.
fn bind_elements<T: Bind>(binder: &Binder, index: &SwitchIndex, slot: Slot<'_>) -> Result<Vec<T>> {
    let owner = slot.label();
    let element = T::shape();
    if element.is_literal() {
        let items = slot.items(index)?;
        tracing::trace!(slot = %owner, items = items.len(), "binding literal sequence");
        return items
            .iter()
            .map(|item| binder.slot(index, Slot::Text { text: item, owner: &owner }, T::default()))
            .collect();
    }
    if element.is_object() {
        let Some(raw) = slot.raw(index) else {
            return Ok(Vec::new());
        };
        let segments: Vec<&str> = raw
            .split(SEGMENT_SEPARATOR)
            .filter(|s| !s.trim().is_empty())
            .collect();
        tracing::trace!(slot = %owner, segments = segments.len(), "binding object list");
        return segments
            .into_iter()
            .map(|text| binder.slot(index, Slot::Text { text, owner: &owner }, T::default()))
            .collect();
    }
    Err(unsupported::<T>(slot))
}

macro_rules! sequence_bind {
    ($coll:ident, $container:ident $(, $bound:ident)*) => {
        impl<T: Bind $(+ $bound)*> Bind for $coll<T> {
            fn shape() -> Shape {
                Shape::Sequence {
                    container: Container::$container,
                    element: Box::new(T::shape()),
                }
            }

            fn bind_slot(
                binder: &Binder,
                index: &SwitchIndex,
                slot: Slot<'_>,
                _current: Self,
            ) -> Result<Self> {
                Ok(bind_elements::<T>(binder, index, slot)?.into_iter().collect())
            }
        }
    };
}

sequence_bind!(Vec, Array);
sequence_bind!(VecDeque, Collection);
sequence_bind!(BTreeSet, Collection, Ord);
sequence_bind!(HashSet, Collection, Eq, Hash);

/// Entries of a map source: a sub-command-line of `key=value` pairs.
fn bind_entries<K: Bind, V: Bind>(
    binder: &Binder,
    index: &SwitchIndex,
    slot: Slot<'_>,
) -> Result<Vec<(K, V)>> {
    if !K::shape().is_literal() {
        return Err(unsupported::<K>(slot));
    }
    let owner = slot.label();
    let raw = match slot.raw(index) {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => {
            return Err(SwitchError::invalid(
                owner,
                "a map needs a non-empty `key=value` source",
            ));
        }
    };
    let sub = index.parse_pairs(raw, MAP_PAIR_SEPARATORS)?;
    tracing::trace!(slot = %owner, entries = sub.named_in(DEFAULT_NAMESPACE).count(), "binding map");
    sub.named_in(DEFAULT_NAMESPACE)
        .map(|entry| -> Result<(K, V)> {
            let key = binder.slot(&sub, Slot::Text { text: &entry.name, owner: &owner }, K::default())?;
            let value = binder.slot(&sub, Slot::named(&entry.name, DEFAULT_NAMESPACE), V::default())?;
            Ok((key, value))
        })
        .collect()
}

impl<K: Bind + Eq + Hash, V: Bind> Bind for HashMap<K, V> {
    fn shape() -> Shape {
        Shape::Map {
            key: Box::new(K::shape()),
            value: Box::new(V::shape()),
        }
    }

    fn bind_slot(binder: &Binder, index: &SwitchIndex, slot: Slot<'_>, _current: Self) -> Result<Self> {
        Ok(bind_entries::<K, V>(binder, index, slot)?.into_iter().collect())
    }
}

impl<K: Bind + Ord, V: Bind> Bind for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Map {
            key: Box::new(K::shape()),
            value: Box::new(V::shape()),
        }
    }

    fn bind_slot(binder: &Binder, index: &SwitchIndex, slot: Slot<'_>, _current: Self) -> Result<Self> {
        Ok(bind_entries::<K, V>(binder, index, slot)?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(args: &[&str]) -> SwitchIndex {
        SwitchIndex::parse(args).unwrap()
    }

    #[test]
    fn literal_sequences_read_the_trailing_run() {
        let ix = index(&["-nums", "1", "2", "3", "-other"]);
        let b = Binder::new();
        assert_eq!(b.named::<Vec<i32>>(&ix, "nums", 1).unwrap(), [1, 2, 3]);
        assert_eq!(
            b.named::<VecDeque<i32>>(&ix, "nums", 1).unwrap(),
            VecDeque::from([1, 2, 3])
        );
        assert!(b.named::<Vec<i32>>(&ix, "other", 1).unwrap().is_empty());
        assert!(b.named::<BTreeSet<u8>>(&ix, "missing", 1).unwrap().is_empty());
    }

    #[test]
    fn bad_item_aborts_the_sequence() {
        let ix = index(&["-nums", "1", "x"]);
        let err = Binder::new().named::<Vec<i32>>(&ix, "nums", 1).unwrap_err();
        assert!(matches!(err, SwitchError::Conversion { ref member, .. } if member == "nums"));
    }

    #[test]
    fn positional_sequence_tokenizes_its_slot() {
        let ix = index(&["1 2 3"]);
        let set: HashSet<u32> = Binder::new().positional(&ix, 0).unwrap();
        assert_eq!(set, HashSet::from([1, 2, 3]));
        let none: Vec<u32> = Binder::new().positional(&ix, 5).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn maps_bind_pairs() {
        let ix = index(&["-env:a=1 b=2"]);
        let map: HashMap<String, i32> = Binder::new().named(&ix, "env", 1).unwrap();
        assert_eq!(map, HashMap::from([("a".into(), 1), ("b".into(), 2)]));
    }

    #[test]
    fn repeated_map_keys_keep_the_last_binding() {
        let ix = index(&["-env:-A=1 b:2 a=3"]);
        let map: BTreeMap<String, u8> = Binder::new().named(&ix, "env", 1).unwrap();
        assert_eq!(map, BTreeMap::from([("a".into(), 3), ("b".into(), 2)]));
    }

    #[test]
    fn empty_map_source_is_invalid() {
        let ix = index(&["-env:", "-flag"]);
        let b = Binder::new();
        for key in ["env", "flag", "missing"] {
            let err = b.named::<HashMap<String, i32>>(&ix, key, 1).unwrap_err();
            assert!(matches!(err, SwitchError::InvalidArgument { .. }), "{key}: {err}");
        }
    }

    #[test]
    fn map_keys_must_be_literals() {
        let ix = index(&["-m:a=1"]);
        let err = Binder::new()
            .named::<BTreeMap<Vec<String>, i32>>(&ix, "m", 1)
            .unwrap_err();
        assert!(matches!(err, SwitchError::UnsupportedType { .. }));
    }

    #[test]
    fn nested_sequences_are_unsupported() {
        let ix = index(&["-grid", "1"]);
        let err = Binder::new().named::<Vec<Vec<i32>>>(&ix, "grid", 1).unwrap_err();
        assert!(matches!(err, SwitchError::UnsupportedType { ref member, .. } if member == "grid"));
    }

    #[test]
    fn option_distinguishes_absent_from_default() {
        let ix = index(&["-level:3", "-bare"]);
        let b = Binder::new();
        assert_eq!(b.named::<Option<u8>>(&ix, "level", 1).unwrap(), Some(3));
        assert_eq!(b.named::<Option<u8>>(&ix, "bare", 1).unwrap(), Some(0));
        assert_eq!(b.named::<Option<u8>>(&ix, "nope", 1).unwrap(), None);
        assert_eq!(b.positional::<Option<u8>>(&ix, 0).unwrap(), None);
    }
}
