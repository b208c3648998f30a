//! Structural classification of composite values.

use crate::map::ToonMap;
use crate::Value;

/// The shape a composite value takes for encoding purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<'a> {
    /// A mapping (or a list the encoder has nowhere else to put).
    Object,
    /// A non-empty list of objects that share the same scalar-only key set.
    /// `columns` is the canonical (sorted) column order.
    Tabular { columns: Vec<&'a str> },
    /// Any other sequential list.
    RegularList,
}

/// Classifies a non-empty list, returning [`Shape::Tabular`] when every
/// element is an object, all elements share the same key set, and every
/// field value is a scalar.
#[must_use]
pub fn classify_list(items: &[Value]) -> Shape<'_> {
    if items.is_empty() {
        return Shape::RegularList;
    }
    let first = match items[0].as_object() {
        Some(map) => map,
        None => return Shape::RegularList,
    };
    if !all_scalar_fields(first) {
        return Shape::RegularList;
    }
    let columns = first.sorted_keys();

    for item in &items[1..] {
        let Some(map) = item.as_object() else {
            return Shape::RegularList;
        };
        if !all_scalar_fields(map) {
            return Shape::RegularList;
        }
        if map.sorted_keys() != columns {
            return Shape::RegularList;
        }
    }

    Shape::Tabular { columns }
}

fn all_scalar_fields(map: &ToonMap) -> bool {
    map.values().all(is_scalar)
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::List(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tabular_row() -> impl Strategy<Value = Value> {
        (any::<i32>(), "[a-zA-Z0-9]{1,8}", any::<bool>()).prop_map(|(qty, sku, active)| {
            let mut map = ToonMap::new();
            map.insert("qty".to_string(), Value::Int(qty as i64));
            map.insert("sku".to_string(), Value::Str(sku));
            map.insert("active".to_string(), Value::Bool(active));
            Value::Object(map)
        })
    }

    proptest! {
        #[test]
        fn classifier_safety(rows in prop::collection::vec(tabular_row(), 1..8)) {
            if let Shape::Tabular { columns } = classify_list(&rows) {
                for item in &rows {
                    let map = item.as_object().expect("tabular element is an object");
                    for col in &columns {
                        let field = map.get(col).expect("declared column must be present");
                        prop_assert!(!matches!(field, Value::List(_) | Value::Object(_)));
                    }
                }
            }
        }

        #[test]
        fn missing_key_falls_back_to_regular(
            base in prop::collection::vec(tabular_row(), 2..6),
        ) {
            // Dropping one field from a single row must never still
            // report Tabular for the whole list.
            let mut rows = base;
            if let Value::Object(map) = &mut rows[0] {
                let key = map.keys().next().cloned();
                if let Some(key) = key {
                    let mut trimmed = ToonMap::new();
                    for (k, v) in map.iter() {
                        if *k != key {
                            trimmed.insert(k.clone(), v.clone());
                        }
                    }
                    rows[0] = Value::Object(trimmed);
                }
            }
            prop_assert!(matches!(classify_list(&rows), Shape::RegularList));
        }
    }
}
