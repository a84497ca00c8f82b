use crate::error::SchemaError;
use crate::value::{Array, Map, Value, ValueRef, value_type_id};
use crate::{Archivist, Reflect};

/// Compares two values structurally.
///
/// Objects are equal when they have the same concrete type and all schema
/// fields are equal. Sequences compare element by element, maps by key
/// lookup. Floats compare bitwise.
pub fn values_equal(a: &dyn Value, b: &dyn Value, cx: &Archivist) -> Result<bool, SchemaError> {
    let equal = match (a.value_ref(), b.value_ref()) {
        (ValueRef::Null, ValueRef::Null) => true,
        (ValueRef::Scalar(a), ValueRef::Scalar(b)) => a.scalar_eq(b),
        (ValueRef::Text(a), ValueRef::Text(b)) => {
            value_type_id(a) == value_type_id(b) && a.text() == b.text()
        }
        (ValueRef::Enum(a), ValueRef::Enum(b)) => {
            value_type_id(a) == value_type_id(b) && a.variant_index() == b.variant_index()
        }
        (ValueRef::Object(a), ValueRef::Object(b)) => objects_equal(a, b, cx)?,
        (ValueRef::Array(a), ValueRef::Array(b)) => sequences_equal(a, b, cx)?,
        (ValueRef::List(a), ValueRef::List(b)) => sequences_equal(a, b, cx)?,
        (ValueRef::Map(a), ValueRef::Map(b)) => maps_equal(a, b, cx)?,
        _ => false,
    };
    Ok(equal)
}

fn objects_equal(a: &dyn Reflect, b: &dyn Reflect, cx: &Archivist) -> Result<bool, SchemaError> {
    if value_type_id(a) != value_type_id(b) {
        return Ok(false);
    }
    let schema = a.schema(cx)?;
    for field in schema.fields() {
        if !values_equal(field.get(a)?, field.get(b)?, cx)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn sequences_equal(a: &dyn Array, b: &dyn Array, cx: &Archivist) -> Result<bool, SchemaError> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for index in 0..a.len() {
        match (a.get(index), b.get(index)) {
            (Some(a), Some(b)) => {
                if !values_equal(a, b, cx)? {
                    return Ok(false);
                }
            }
            _ => return Ok(false),
        }
    }
    Ok(true)
}

fn maps_equal(a: &dyn Map, b: &dyn Map, cx: &Archivist) -> Result<bool, SchemaError> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (key, value) in a.entries() {
        match b.get(key) {
            Some(other) => {
                if !values_equal(value, other, cx)? {
                    return Ok(false);
                }
            }
            None => return Ok(false),
        }
    }
    Ok(true)
}
