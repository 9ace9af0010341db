//! Composition and interpolation of assigned values.
//!
//! Every variable has two independent parts. The literal part collects values without
//! references and the deferred part collects values that still contain `$(NAME)`/`${NAME}`.
//! Once all assignments are in, deferred parts are interpolated in rounds. A reference to a
//! variable whose own deferred part is still pending postpones the rest of the value to the next
//! round. Rounds stop when every value is done, when a round changes nothing, or when as many
//! rounds ran as there were pending variables to begin with. Whatever is left at that point is
//! part of a reference cycle and loses its deferred part.

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use tracing::{debug, trace};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::environment::Environment;
use crate::errors::VarsError;
use crate::key::VariableKey;
use crate::reference::{escape_dollars, needs_interpolation, segments, Segment};
use crate::table::VariableTable;
use crate::variable_parser::AssignOperator;

#[derive(Debug, Clone)]
struct Deferred {
    text: String,
    /// Line of the assignment that last touched this part
    line_no: usize,
}

#[derive(Debug, Clone, Default)]
struct Entry {
    literal: Option<String>,
    deferred: Option<Deferred>,
}

/// Collects assignments for one configuration.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    entries: IndexMap<VariableKey, Entry>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign<S: AsRef<str>>(
        &mut self,
        key: VariableKey,
        operator: AssignOperator,
        value: S,
        line_no: usize,
    ) {
        let value = value.as_ref();
        let entry = self.entries.entry(key).or_default();

        if needs_interpolation(value) {
            match (operator, &mut entry.deferred) {
                (AssignOperator::Append, Some(deferred)) => {
                    deferred.text.push(' ');
                    deferred.text.push_str(value);
                    deferred.line_no = line_no;
                }
                (_, slot) => {
                    *slot = Some(Deferred {
                        text: value.to_string(),
                        line_no,
                    })
                }
            }
        } else {
            match (operator, &mut entry.literal) {
                (AssignOperator::Append, Some(literal)) => {
                    literal.push(' ');
                    literal.push_str(value);
                }
                (_, slot) => *slot = Some(value.to_string()),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interpolate everything that was assigned. `env` answers references to names that were
    /// never assigned.
    pub fn resolve<E: Environment + ?Sized>(
        self,
        env: &E,
        diagnostics: &mut Diagnostics,
    ) -> VariableTable {
        let order: Vec<VariableKey> = self.entries.keys().cloned().collect();

        let mut interpolation = Interpolation {
            env,
            diagnostics,
            finished: IndexMap::new(),
            pending: IndexMap::new(),
            undefined: IndexSet::new(),
        };

        for (key, entry) in self.entries {
            match entry.deferred {
                None => {
                    let value = compose(entry.literal.as_deref(), None);
                    interpolation.finished.insert(key, value);
                }
                Some(deferred) => {
                    interpolation.pending.insert(
                        key,
                        Pending {
                            literal: entry.literal,
                            resolved: String::new(),
                            rest: deferred.text,
                            line_no: deferred.line_no,
                        },
                    );
                }
            }
        }

        let forced_empty = interpolation.run();

        let Interpolation {
            mut finished,
            undefined,
            ..
        } = interpolation;

        let mut values = IndexMap::with_capacity(finished.len());
        for key in order {
            if let Some(value) = finished.shift_remove(&key) {
                values.insert(key, value);
            }
        }
        // Whatever remains are undefined references recorded as empty
        values.extend(finished);

        VariableTable::new(values, undefined, forced_empty)
    }
}

/// Literal part followed by the deferred part.
fn compose(literal: Option<&str>, deferred: Option<&str>) -> String {
    [literal, deferred]
        .into_iter()
        .flatten()
        .join(" ")
        .trim()
        .to_string()
}

#[derive(Debug, Default)]
struct Pending {
    literal: Option<String>,
    /// Interpolated prefix of the deferred part. Never scanned again.
    resolved: String,
    /// Remainder of the deferred part, starting at the reference that blocked
    rest: String,
    line_no: usize,
}

impl Pending {
    fn finish(self) -> String {
        compose(self.literal.as_deref(), Some(&self.resolved))
    }
}

enum Lookup {
    Value(String),
    Defer,
}

#[derive(Debug, Clone, Copy, Default)]
struct Advance {
    progressed: bool,
    done: bool,
}

struct Interpolation<'a, E: ?Sized> {
    env: &'a E,
    diagnostics: &'a mut Diagnostics,
    finished: IndexMap<VariableKey, String>,
    pending: IndexMap<VariableKey, Pending>,
    undefined: IndexSet<String>,
}

impl<E: Environment + ?Sized> Interpolation<'_, E> {
    fn run(&mut self) -> IndexSet<VariableKey> {
        let cap = self.pending.len();
        let mut rounds = 0;

        while !self.pending.is_empty() && rounds < cap {
            rounds += 1;
            let mut progressed = false;
            let mut done = vec![];

            for i in 0..self.pending.len() {
                let Some((key, mut state)) = self
                    .pending
                    .get_index_mut(i)
                    .map(|(k, s)| (k.clone(), std::mem::take(s)))
                else {
                    continue;
                };

                let advance = self.advance(&key, &mut state);
                progressed |= advance.progressed;

                if advance.done {
                    self.finished.insert(key.clone(), state.finish());
                    done.push(key);
                } else if let Some((_, slot)) = self.pending.get_index_mut(i) {
                    *slot = state;
                }
            }

            for key in &done {
                self.pending.shift_remove(key);
            }

            trace!(round = rounds, resolved = done.len(), left = self.pending.len());
            if !progressed {
                break;
            }
        }

        debug!(rounds, cycles = self.pending.len(), "interpolation finished");

        let mut forced_empty = IndexSet::new();
        for (key, state) in std::mem::take(&mut self.pending) {
            let stalled = VarsError::InterpolationStalled {
                var: key.to_string(),
                rounds,
            };
            self.diagnostics.push(
                DiagnosticKind::ForcedEmpty,
                Some(state.line_no),
                format!("{stalled}; dropping its interpolated part"),
            );

            self.finished
                .insert(key.clone(), compose(state.literal.as_deref(), None));
            forced_empty.insert(key);
        }

        forced_empty
    }

    /// Substitute references left to right until the value is done or a reference has to wait.
    fn advance(&mut self, key: &VariableKey, state: &mut Pending) -> Advance {
        let rest = std::mem::take(&mut state.rest);
        let mut progressed = false;

        for (range, segment) in segments(&rest) {
            match segment {
                Segment::Text(text) => state.resolved.push_str(text),
                Segment::EscapedDollar => state.resolved.push_str("$$"),
                Segment::Malformed(raw) => {
                    self.diagnostics.push(
                        DiagnosticKind::MalformedReference,
                        Some(state.line_no),
                        format!("dropping `{raw}` from the value of {key}"),
                    );
                    progressed = true;
                }
                Segment::Reference(name) => match self.lookup(name, state.line_no) {
                    Lookup::Value(value) => {
                        state.resolved.push_str(&value);
                        progressed = true;
                    }
                    Lookup::Defer => {
                        state.rest = rest[range.start..].to_string();
                        return Advance {
                            progressed,
                            done: false,
                        };
                    }
                },
            }
        }

        Advance {
            progressed: true,
            done: true,
        }
    }

    fn lookup(&mut self, name: &str, line_no: usize) -> Lookup {
        let key = VariableKey::parse(name);

        if let Some(value) = self.finished.get(&key) {
            return Lookup::Value(value.clone());
        }

        if self.pending.contains_key(&key) {
            return Lookup::Defer;
        }

        if let Some(value) = self.env.lookup(name) {
            trace!("{name} taken from the environment");
            return Lookup::Value(escape_dollars(&value));
        }

        self.diagnostics.push(
            DiagnosticKind::UndefinedReference,
            Some(line_no),
            format!("{name} is not defined, using an empty value"),
        );
        self.undefined.insert(name.to_string());
        self.finished.insert(key, String::new());

        Lookup::Value(String::new())
    }
}
