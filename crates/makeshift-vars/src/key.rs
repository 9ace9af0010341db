use std::fmt;

use derive_more::Display;

/// Which side of a conditional assignment a value landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Polarity {
    #[display("yes")]
    Yes,
    #[display("no")]
    No,
}

impl Polarity {
    pub fn from_enabled(enabled: bool) -> Polarity {
        if enabled {
            Polarity::Yes
        } else {
            Polarity::No
        }
    }

    fn from_suffix(suffix: &str) -> Option<Polarity> {
        match suffix {
            "yes" => Some(Polarity::Yes),
            "no" => Some(Polarity::No),
            _ => None,
        }
    }
}

/// Identity of an entry in a [`VariableTable`](crate::table::VariableTable).
///
/// `OBJS-$(HAVE_NEON) += neon.o` evaluated against a configuration where `HAVE_NEON` is truthy
/// targets `VariableKey { base: "OBJS", polarity: Some(Yes) }`. Textual references such as
/// `$(OBJS-yes)`, and assignments written as `OBJS-yes = ...`, parse to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableKey {
    pub base: String,
    pub polarity: Option<Polarity>,
}

impl VariableKey {
    pub fn plain<S: Into<String>>(base: S) -> Self {
        VariableKey {
            base: base.into(),
            polarity: None,
        }
    }

    pub fn conditional<S: Into<String>>(base: S, polarity: Polarity) -> Self {
        VariableKey {
            base: base.into(),
            polarity: Some(polarity),
        }
    }

    /// Interpret a variable name as written in Makefile text.
    pub fn parse<S: AsRef<str>>(name: S) -> Self {
        let name = name.as_ref();

        if let Some((base, suffix)) = name.rsplit_once('-') {
            if let Some(polarity) = Polarity::from_suffix(suffix).filter(|_| !base.is_empty()) {
                return VariableKey::conditional(base, polarity);
            }
        }

        VariableKey::plain(name)
    }

    /// The entry that conditional assignments to this variable populate, e.g. `NEON-OBJS-yes`
    /// for `NEON-OBJS`.
    pub fn enabled_companion(&self) -> VariableKey {
        VariableKey::conditional(self.to_string(), Polarity::Yes)
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.polarity {
            Some(polarity) => write!(f, "{}-{}", self.base, polarity),
            None => write!(f, "{}", self.base),
        }
    }
}

impl From<&str> for VariableKey {
    fn from(value: &str) -> Self {
        VariableKey::parse(value)
    }
}
