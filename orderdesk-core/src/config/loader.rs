use std::collections::HashMap;
use std::io;
use std::path::Path;

use serde_yaml::Value;

use super::value::ConfigValue;
use super::ConfigError;

pub(crate) type Values = HashMap<String, ConfigValue>;

/// Merge the YAML file at `path` into `values`. A missing file is skipped.
pub(crate) fn merge_file(path: &Path, values: &mut Values) -> Result<(), ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => merge_str(&content, values),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigError::Load(format!("{}: {e}", path.display()))),
    }
}

/// Merge a YAML document into `values`, keyed by dotted path
/// (`database.pool.size`). Nulls are skipped so defaults still apply.
pub(crate) fn merge_str(content: &str, values: &mut Values) -> Result<(), ConfigError> {
    let root: Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;

    let mut pending: Vec<(String, &Value)> = vec![(String::new(), &root)];
    while let Some((key, node)) = pending.pop() {
        let leaf = match node {
            Value::Null => continue,
            Value::Tagged(tagged) => {
                pending.push((key, &tagged.value));
                continue;
            }
            Value::Mapping(map) => {
                for (name, child) in map {
                    let name = scalar_text(name).ok_or_else(|| {
                        ConfigError::Load(format!("non-scalar key under '{key}'"))
                    })?;
                    let path = if key.is_empty() {
                        name
                    } else {
                        format!("{key}.{name}")
                    };
                    pending.push((path, child));
                }
                continue;
            }
            _ if key.is_empty() => {
                return Err(ConfigError::Load("document root must be a mapping".into()))
            }
            Value::Sequence(items) => ConfigValue::List(
                items
                    .iter()
                    .map(|item| {
                        scalar_text(item).ok_or_else(|| {
                            ConfigError::Load(format!("'{key}' may only list scalar values"))
                        })
                    })
                    .collect::<Result<_, _>>()?,
            ),
            Value::Bool(b) => ConfigValue::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(ConfigValue::Int)
                .unwrap_or_else(|| ConfigValue::Text(n.to_string())),
            Value::String(s) => ConfigValue::Text(s.clone()),
        };
        values.insert(key, leaf);
    }
    Ok(())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_keys_are_dotted() {
        let mut values = Values::new();
        merge_str("a:\n  b:\n    c: 3\n  flag: true\n", &mut values).unwrap();
        assert_eq!(values["a.b.c"], ConfigValue::Int(3));
        assert_eq!(values["a.flag"], ConfigValue::Bool(true));
    }

    #[test]
    fn lists_and_nulls() {
        let mut values = Values::new();
        merge_str("origins: [a, 2]\nunset: ~\n", &mut values).unwrap();
        assert_eq!(values["origins"], ConfigValue::List(vec!["a".into(), "2".into()]));
        assert!(!values.contains_key("unset"));
    }

    #[test]
    fn rejects_nested_lists_and_scalar_roots() {
        let mut values = Values::new();
        assert!(merge_str("origins:\n  - a: 1\n", &mut values).is_err());
        assert!(merge_str("just a string", &mut values).is_err());
        assert!(merge_str("", &mut values).is_ok());
    }
}
