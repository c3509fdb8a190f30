use super::ConfigError;

/// A configuration leaf.
///
/// YAML scalars keep their type; anything that arrives from the environment
/// is `Text` and is parsed on read. Sequences hold their entries as text.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Text(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        ConfigValue::List(value)
    }
}

/// Types a [`ConfigValue`] can be read as.
pub trait FromConfigValue: Sized {
    /// Type name reported in [`ConfigError::TypeMismatch`].
    const EXPECTED: &'static str;

    /// `None` when the value has the wrong shape.
    fn parse(value: &ConfigValue) -> Option<Self>;

    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        Self::parse(value).ok_or_else(|| ConfigError::TypeMismatch {
            key: key.to_string(),
            expected: Self::EXPECTED,
        })
    }
}

impl FromConfigValue for String {
    const EXPECTED: &'static str = "string";

    fn parse(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Text(s) => Some(s.clone()),
            ConfigValue::Int(i) => Some(i.to_string()),
            ConfigValue::Bool(b) => Some(b.to_string()),
            ConfigValue::List(_) => None,
        }
    }
}

impl FromConfigValue for bool {
    const EXPECTED: &'static str = "bool";

    fn parse(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FromConfigValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn parse(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Int(i) => Some(*i),
            ConfigValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromConfigValue for u16 {
    const EXPECTED: &'static str = "port number (0-65535)";

    fn parse(value: &ConfigValue) -> Option<Self> {
        i64::parse(value).and_then(|i| u16::try_from(i).ok())
    }
}

impl FromConfigValue for u32 {
    const EXPECTED: &'static str = "non-negative integer";

    fn parse(value: &ConfigValue) -> Option<Self> {
        i64::parse(value).and_then(|i| u32::try_from(i).ok())
    }
}

impl FromConfigValue for u64 {
    const EXPECTED: &'static str = "non-negative integer";

    fn parse(value: &ConfigValue) -> Option<Self> {
        i64::parse(value).and_then(|i| u64::try_from(i).ok())
    }
}

/// A YAML list, or a comma-separated string such as `CORS_ORIGINS=a,b`.
/// Blank entries are dropped.
impl FromConfigValue for Vec<String> {
    const EXPECTED: &'static str = "list of strings";

    fn parse(value: &ConfigValue) -> Option<Self> {
        let entries: Vec<String> = match value {
            ConfigValue::List(items) => items.clone(),
            ConfigValue::Text(s) => s.split(',').map(str::to_string).collect(),
            _ => return None,
        };
        Some(
            entries
                .iter()
                .map(|entry| entry.trim())
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}
