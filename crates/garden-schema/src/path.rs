//! Dot-path access into decoded JSON objects

use serde_json::Value;

/// Convert `visualProperties.colors` into the JSON pointer `/visualProperties/colors`
pub fn to_pointer(path: &str) -> String {
    path.split('.')
        .map(|part| part.replace('~', "~0").replace('/', "~1"))
        .fold(String::new(), |mut acc, part| {
            acc.push('/');
            acc.push_str(&part);
            acc
        })
}

/// Look up a possibly nested property. Returns `None` when any segment is missing.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    root.pointer(&to_pointer(path))
}

/// Overwrite an existing property. Returns false when the path does not resolve.
pub fn assign(root: &mut Value, path: &str, value: Value) -> bool {
    match root.pointer_mut(&to_pointer(path)) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// Insert a top-level property only if it is absent or null
pub fn insert_default(root: &mut Value, key: &str, value: Value) {
    if let Some(obj) = root.as_object_mut() {
        let slot = obj.entry(key.to_string()).or_insert(Value::Null);
        if slot.is_null() {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pointer_conversion() {
        assert_eq!(to_pointer("name"), "/name");
        assert_eq!(to_pointer("visualProperties.colors"), "/visualProperties/colors");
        assert_eq!(to_pointer("a/b"), "/a~1b");
    }

    #[test]
    fn test_lookup_nested() {
        let value = json!({ "soundProperties": { "baseFrequency": 220.5 } });
        assert_eq!(
            lookup(&value, "soundProperties.baseFrequency"),
            Some(&json!(220.5))
        );
        assert_eq!(lookup(&value, "soundProperties.reverbMix"), None);
        assert_eq!(lookup(&value, "visualProperties.colors"), None);
    }

    #[test]
    fn test_assign_existing_only() {
        let mut value = json!({ "visualProperties": { "arcCount": "5" } });
        assert!(assign(&mut value, "visualProperties.arcCount", json!(5)));
        assert_eq!(value["visualProperties"]["arcCount"], json!(5));
        assert!(!assign(&mut value, "soundProperties.durationSeconds", json!(30)));
    }

    #[test]
    fn test_insert_default_keeps_present_values() {
        let mut value = json!({ "stemStyle": "curved", "petalShape": null });
        insert_default(&mut value, "stemStyle", json!("straight"));
        insert_default(&mut value, "petalShape", json!("round"));
        insert_default(&mut value, "leafPattern", json!("basal"));
        assert_eq!(value["stemStyle"], json!("curved"));
        assert_eq!(value["petalShape"], json!("round"));
        assert_eq!(value["leafPattern"], json!("basal"));
    }
}
