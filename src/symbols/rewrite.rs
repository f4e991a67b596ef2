//! Directive-driven symbol substitution over JSON trees

use std::collections::HashSet;

use serde_json::{Map, Number, Value};

use super::directive::{Directive, NumericRule, SymbolRule};
use super::snapshot::SymbolSnapshot;

/// Rewrite `value` according to `directive`, resolving symbols against `snapshot`.
///
/// The result has the same shape as the input: sequences keep their length and
/// order, mappings keep their members (only keys covered by a key rule are
/// renamed). Identifiers the snapshot does not know are left as they are.
pub fn rewrite(value: Value, directive: &Directive, snapshot: &SymbolSnapshot) -> Value {
    if directive.is_noop() {
        return value;
    }
    Rewriter {
        directive,
        snapshot,
    }
    .root(value)
}

/// Parse a numeric string into a JSON number.
///
/// Integers stay integers; anything else that parses as a finite float becomes
/// a float. Returns `None` for non-numeric input.
pub fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    if let Ok(int) = text.parse::<u64>() {
        return Some(Number::from(int));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

struct Rewriter<'a> {
    directive: &'a Directive,
    snapshot: &'a SymbolSnapshot,
}

impl Rewriter<'_> {
    fn root(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let symbol_keys = self.directive.has_rule(&SymbolRule::RootKeys);
                self.object(map, symbol_keys)
            }
            Value::Array(items) => {
                let elements = self.directive.has_rule(&SymbolRule::Elements);
                let heads = self.directive.has_rule(&SymbolRule::TupleHeads);
                Value::Array(
                    items
                        .into_iter()
                        .map(|item| match item {
                            Value::String(id) if elements => Value::String(self.symbol(id)),
                            Value::Array(tuple) if heads => self.tuple(tuple),
                            other => self.value(other),
                        })
                        .collect(),
                )
            }
            other => self.value(other),
        }
    }

    /// Walk a value that sits at no designated position
    fn value(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => self.object(map, false),
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.value(v)).collect()),
            Value::String(text) if self.directive.numeric() == &NumericRule::Everywhere => {
                self.number(text)
            }
            other => other,
        }
    }

    fn object(&self, map: Map<String, Value>, symbol_keys: bool) -> Value {
        // A renamed key must not land on a key the object already has.
        let originals: HashSet<String> = if symbol_keys {
            map.keys().cloned().collect()
        } else {
            HashSet::new()
        };
        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            let value = self.member(&key, value);
            let key = if symbol_keys {
                let converted = self.symbol(key.clone());
                if converted != key
                    && (originals.contains(&converted) || out.contains_key(&converted))
                {
                    tracing::warn!(key = %key, converted = %converted, "converted key collides with another member; keeping it unconverted");
                    key
                } else {
                    converted
                }
            } else {
                key
            };
            out.insert(key, value);
        }
        Value::Object(out)
    }

    fn member(&self, key: &str, value: Value) -> Value {
        if self.directive.is_symbol_field(key) {
            match value {
                Value::String(id) => return Value::String(self.symbol(id)),
                Value::Array(items) => {
                    return Value::Array(
                        items
                            .into_iter()
                            .map(|item| match item {
                                Value::String(id) => Value::String(self.symbol(id)),
                                other => self.value(other),
                            })
                            .collect(),
                    )
                }
                other => return self.value(other),
            }
        }

        match value {
            Value::Object(map) if self.directive.has_symbol_keys_under(key) => {
                self.object(map, true)
            }
            Value::String(text) if self.directive.is_numeric_field(key) => self.number(text),
            other => self.value(other),
        }
    }

    fn tuple(&self, tuple: Vec<Value>) -> Value {
        let mut items = tuple.into_iter();
        let head = match items.next() {
            Some(Value::String(id)) => Some(Value::String(self.symbol(id))),
            Some(other) => Some(self.value(other)),
            None => None,
        };
        Value::Array(head.into_iter().chain(items.map(|v| self.value(v))).collect())
    }

    fn symbol(&self, id: String) -> String {
        let direction = self.directive.direction();
        let found = match self.directive.class() {
            Some(class) => self.snapshot.get(class, &id, direction),
            None => self.snapshot.find(&id, direction),
        };
        match found {
            Some(converted) => converted.to_owned(),
            None => {
                tracing::trace!(symbol = %id, ?direction, "no mapping for symbol");
                id
            }
        }
    }

    fn number(&self, text: String) -> Value {
        match parse_number(&text) {
            Some(number) => Value::Number(number),
            None => Value::String(text),
        }
    }
}
