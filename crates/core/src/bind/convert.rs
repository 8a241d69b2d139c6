use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::error::Result;

type ConvertFn<T> = Box<dyn Fn(Option<&str>) -> Result<T> + Send + Sync>;

/// Converters keyed by the exact target type.
#[derive(Default)]
pub(crate) struct Converters {
    by_type: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Converters {
    pub(crate) fn insert<T, F>(&mut self, convert: F)
    where
        T: 'static,
        F: Fn(Option<&str>) -> Result<T> + Send + Sync + 'static,
    {
        let boxed: ConvertFn<T> = Box::new(convert);
        self.by_type.insert(TypeId::of::<T>(), Box::new(boxed));
    }

    pub(crate) fn get<T: 'static>(&self) -> Option<&ConvertFn<T>> {
        self.by_type.get(&TypeId::of::<T>())?.downcast_ref()
    }
}
