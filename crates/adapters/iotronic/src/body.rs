//! Wire body decoding — lists arrive either bare or wrapped in an object.

use serde_json::Value;

use crate::error::IotronicError;

/// Pull the record array out of a list response.
///
/// Accepts a bare array, or an object carrying the array under one of
/// `keys`. An object with a single array-valued field is accepted too.
/// An empty or `null` body is an empty list.
pub(crate) fn list_items<'a>(
    body: &'a Value,
    keys: &[&str],
    path: &str,
) -> Result<&'a [Value], IotronicError> {
    if let Some(items) = body.as_array() {
        return Ok(items);
    }
    if body.is_null() {
        return Ok(&[]);
    }
    let Some(object) = body.as_object() else {
        return Err(IotronicError::Body {
            path: path.to_string(),
            reason: "expected a JSON array or object".to_string(),
        });
    };
    if let Some(items) = keys
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array))
    {
        return Ok(items);
    }
    let mut arrays = object.values().filter_map(Value::as_array);
    match (arrays.next(), arrays.next()) {
        (Some(items), None) => Ok(items),
        _ => Err(IotronicError::Body {
            path: path.to_string(),
            reason: format!("no list under any of {keys:?}"),
        }),
    }
}

/// Convert every record with `convert`, skipping the ones it rejects.
pub(crate) fn convert_all<T>(
    items: &[Value],
    path: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| {
            let converted = convert(item);
            if converted.is_none() {
                tracing::debug!(path, record = %item, "skipping record without identifier");
            }
            converted
        })
        .collect()
}
