//! Fixtures shared by the integration tests.

#![allow(dead_code, reason = "Each test binary uses a different subset")]

use guardian::{Uri, Uuid};

#[derive(Debug, Default)]
pub struct NestedThing {
    pub field: Option<String>,
    pub value: Option<i32>,
}

impl NestedThing {
    pub fn get_property(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct Thing {
    pub field: Option<String>,
    pub count: i32,
    pub delta: i64,
    pub nested_thing: NestedThing,
    pub nullable_nested_thing: Option<NestedThing>,
    pub thing_array: Vec<Thing>,
    pub items: Vec<Option<String>>,
    pub maybe_items: Option<Vec<Option<String>>>,
    pub uri: Option<Uri>,
    pub id: Uuid,
}

impl Thing {
    pub fn get_property(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn get_nullable_nested_thing(&self) -> Option<&NestedThing> {
        self.nullable_nested_thing.as_ref()
    }

    #[allow(non_snake_case, reason = "Mixed-case accessor spelling")]
    pub fn Get_property(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn method(&self) -> i32 {
        self.count
    }

    pub fn generic<T: Default>(&self) -> T {
        T::default()
    }
}

pub fn get_len<T>(items: &[T]) -> i64 {
    i64::try_from(items.len()).unwrap_or(i64::MAX)
}

pub struct GenericType<T> {
    pub property: T,
}

impl<T> GenericType<T> {
    pub fn get_property(&self) -> &T {
        &self.property
    }
}
