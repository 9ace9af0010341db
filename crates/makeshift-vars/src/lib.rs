//! Resolves Makefile-style variable definitions for one configuration at a time.
//!
//! ## Supported subset
//! Only variable assignments are interpreted:
//!
//! ```text
//! OBJS = a.o b.o
//! OBJS += c.o
//! OBJS-$(HAVE_NEON) += neon.o
//! LIST = x $(OBJS) ${NAME}
//! ```
//!
//! Rules, recipes, `include` and the other directives are skipped and reported through
//! [`Diagnostics`](diagnostics::Diagnostics).
//!
//! ## Conditional names
//! `OBJS-$(HAVE_NEON)` assigns to `OBJS-yes` when `HAVE_NEON` is truthy in the configuration's
//! [`Flags`](flags::Flags), and to `OBJS-no` otherwise. Instead of building those names by string
//! concatenation, both forms parse to a [`VariableKey`](key::VariableKey) carrying an optional
//! [`Polarity`](key::Polarity), so `$(OBJS-yes)` and `OBJS-yes = ...` refer to the same entry.
//!
//! ## Resolution
//! Resolution happens in two steps. First every assignment is applied, keeping values that
//! contain references apart from those that don't. Then references are substituted in rounds
//! (see [`resolver`]). A reference is answered by, in order:
//!
//! 1. a variable that is already fully resolved,
//! 2. a variable that is still being resolved, in which case the rest of the value waits for the
//!    next round,
//! 3. the [`Environment`](environment::Environment),
//! 4. the empty string.
//!
//! `$$` is an escaped dollar sign and only becomes `$` in the final value.

pub mod diagnostics;
pub mod environment;
pub mod errors;
pub mod evaluate;
pub mod flags;
pub mod key;
pub mod macros;
pub mod makefile;
pub mod reference;
pub mod resolver;
pub mod table;
pub mod variable_parser;

#[cfg(test)]
mod tests;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use environment::{EmptyEnvironment, Environment, ProcessEnvironment};
pub use errors::{VarsError, VarsResult};
pub use evaluate::{eval, resolve};
pub use flags::{FlagValue, Flags};
pub use key::{Polarity, VariableKey};
pub use makefile::Makefile;
pub use table::VariableTable;
