use serde_json::{Map, Value};

/// Closed set of shapes the template merge distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Object,
    Array,
    Scalar,
}

impl ValueShape {
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            _ => Self::Scalar,
        }
    }
}

/// Merges `overrides` into `target` in place.
///
/// Precedence:
/// - object into object: recursive per key, keys missing in `target` are inserted;
/// - array override: only its first element counts, merged into the first
///   element of a target array (or replacing a non-array target); an empty
///   override array leaves the target unchanged;
/// - anything else: the override replaces the target.
pub fn merge_value(target: &mut Value, overrides: &Value) {
    match (ValueShape::of(target), ValueShape::of(overrides)) {
        (ValueShape::Object, ValueShape::Object) => {
            if let (Value::Object(target_map), Value::Object(override_map)) = (target, overrides) {
                merge_object(target_map, override_map);
            }
        }
        (target_shape, ValueShape::Array) => {
            let Some(first) = overrides.as_array().and_then(|items| items.first()) else {
                return;
            };
            match (target_shape, target) {
                (ValueShape::Array, Value::Array(items)) if !items.is_empty() => {
                    merge_value(&mut items[0], first);
                }
                (ValueShape::Array, Value::Array(items)) => items.push(first.clone()),
                (_, slot) => *slot = first.clone(),
            }
        }
        _ => *target = overrides.clone(),
    }
}

fn merge_object(target: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        match target.get_mut(key) {
            Some(slot) => merge_value(slot, value),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}
