//! Per-configuration feature flags, as found in a generated `config.h`.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;

use crate::errors::{VarsError, VarsResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlagValue {
    /// `#define NAME "text"`, stored without the quotes
    Str(String),
    Int(i64),
    /// Anything else, kept as written
    Token(String),
}

impl FlagValue {
    pub fn parse(raw: &str) -> FlagValue {
        if raw.starts_with('"') && raw.ends_with('"') {
            let inner = raw.get(1..raw.len().saturating_sub(1)).unwrap_or_default();
            return FlagValue::Str(inner.to_string());
        }

        match raw.parse::<i64>() {
            Ok(i) => FlagValue::Int(i),
            Err(_) => FlagValue::Token(raw.to_string()),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Str(s) | FlagValue::Token(s) => !s.is_empty(),
            FlagValue::Int(i) => *i != 0,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Str(s) => write!(f, "\"{s}\""),
            FlagValue::Int(i) => write!(f, "{i}"),
            FlagValue::Token(t) => write!(f, "{t}"),
        }
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        FlagValue::Int(value)
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Int(value as i64)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Str(value.to_string())
    }
}

/// Immutable-once-loaded mapping of flag name to value for one configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    values: IndexMap<String, FlagValue>,
}

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every `#define NAME VALUE` line. The line must split on single spaces into exactly
    /// the directive, a name and a (possibly space-containing) value; anything else is ignored.
    pub fn parse_config_header<S: AsRef<str>>(text: S) -> Flags {
        let mut flags = Flags::new();

        for line in text.as_ref().lines() {
            let mut parts = line.trim_end().splitn(3, ' ');
            let (Some("#define"), Some(name), Some(value)) =
                (parts.next(), parts.next(), parts.next())
            else {
                continue;
            };

            if name.is_empty() || value.is_empty() {
                continue;
            }

            flags.insert(name, FlagValue::parse(value));
        }

        flags
    }

    pub fn from_config_header_path<P: AsRef<Path>>(path: P) -> VarsResult<Flags> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| VarsError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Flags::parse_config_header(text))
    }

    pub fn insert<K: Into<String>, V: Into<FlagValue>>(&mut self, name: K, value: V) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get<S: AsRef<str>>(&self, name: S) -> Option<&FlagValue> {
        self.values.get(name.as_ref())
    }

    /// A flag is enabled when present and truthy; absent flags are disabled.
    pub fn is_enabled<S: AsRef<str>>(&self, name: S) -> bool {
        self.get(name).is_some_and(FlagValue::is_truthy)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FlagValue>> FromIterator<(K, V)> for Flags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut flags = Flags::new();
        for (k, v) in iter {
            flags.insert(k, v);
        }
        flags
    }
}

#[cfg(test)]
mod test {
    use super::{FlagValue, Flags};
    use pretty_assertions::assert_eq;

    #[test]
    fn config_header() {
        let flags = Flags::parse_config_header(
            r#"/* Automatically generated by configure - do not modify! */
#ifndef FFMPEG_CONFIG_H
#define FFMPEG_CONFIG_H
#define FFMPEG_CONFIGURATION "--enable-gpl --disable-programs"
#define ARCH_AARCH64 1
#define ARCH_X86 0
#define HAVE_NEON 1
#define av_restrict restrict
#define SWS_MAX_FILTER_SIZE 256
#define  DOUBLE_SPACED 1
#define CONFIG_THIS_YEAR 2024   
#endif /* FFMPEG_CONFIG_H */
"#,
        );

        assert_eq!(
            flags.get("FFMPEG_CONFIGURATION"),
            Some(&FlagValue::Str("--enable-gpl --disable-programs".into()))
        );
        assert_eq!(flags.get("ARCH_AARCH64"), Some(&FlagValue::Int(1)));
        assert_eq!(flags.get("av_restrict"), Some(&FlagValue::Token("restrict".into())));
        assert_eq!(flags.get("CONFIG_THIS_YEAR"), Some(&FlagValue::Int(2024)));
        // Two-field lines (include guards) carry no value
        assert_eq!(flags.get("FFMPEG_CONFIG_H"), None);
        assert_eq!(flags.get("DOUBLE_SPACED"), None);
        assert_eq!(flags.len(), 7);
    }

    #[test]
    fn truthiness() {
        let flags: Flags = [
            ("ON", FlagValue::Int(1)),
            ("OFF", FlagValue::Int(0)),
            ("EMPTY", FlagValue::Str(String::new())),
            ("TEXT", FlagValue::Str("x".into())),
            ("TOKEN", FlagValue::Token("restrict".into())),
        ]
        .into_iter()
        .collect();

        assert!(flags.is_enabled("ON"));
        assert!(!flags.is_enabled("OFF"));
        assert!(!flags.is_enabled("EMPTY"));
        assert!(flags.is_enabled("TEXT"));
        assert!(flags.is_enabled("TOKEN"));
        assert!(!flags.is_enabled("MISSING"));
    }

    #[test]
    fn quoted_edge_cases() {
        assert_eq!(FlagValue::parse("\"\""), FlagValue::Str(String::new()));
        assert_eq!(FlagValue::parse("\""), FlagValue::Str(String::new()));
        assert_eq!(FlagValue::parse("-1"), FlagValue::Int(-1));
        assert_eq!(FlagValue::parse("0x10"), FlagValue::Token("0x10".into()));
    }
}
