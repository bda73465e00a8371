// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Declarative argument binding for builtin calls.
//!
//! Each builtin declares an ordered slice of [`ArgSpec`]s; the slice order is
//! the positional order. Binding resolves defaults first, then positional
//! arguments, then named arguments (which may use aliases and override
//! positionals). Unknown names, surplus positionals, and missing required
//! arguments are bind errors carrying the call position.

use crate::error::{Error, Result};
use crate::eval::value::Value;
use crate::lang::token::Pos;
use ahash::AHashMap;
use nalgebra::{Vector2, Vector3};

pub struct ArgSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub default: Option<Value>,
    pub required: bool,
}

impl ArgSpec {
    pub const fn required(name: &'static str) -> Self {
        ArgSpec { name, aliases: &[], default: None, required: true }
    }

    pub const fn optional(name: &'static str, default: Value) -> Self {
        ArgSpec { name, aliases: &[], default: Some(default), required: false }
    }

    /// Optional with no default; callers must check [`BoundArgs::provided`].
    pub const fn opt(name: &'static str) -> Self {
        ArgSpec { name, aliases: &[], default: None, required: false }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

/// Arguments after binding, with typed accessors.
pub struct BoundArgs {
    values: AHashMap<&'static str, Value>,
    pos: Pos,
}

pub fn bind(
    callee: &str,
    specs: &[ArgSpec],
    args: Vec<(Option<String>, Value)>,
    pos: Pos,
) -> Result<BoundArgs> {
    let mut values: AHashMap<&'static str, Value> = AHashMap::new();
    for spec in specs {
        if let Some(d) = &spec.default {
            values.insert(spec.name, d.clone());
        }
    }

    // split before binding so named arguments win regardless of where they
    // appear in the call
    let mut positional: Vec<Value> = Vec::new();
    let mut named: Vec<(String, Value)> = Vec::new();
    for (name, value) in args {
        match name {
            None => positional.push(value),
            Some(name) => named.push((name, value)),
        }
    }

    if positional.len() > specs.len() {
        return Err(Error::bind(pos, format!("{callee}: too many positional arguments")));
    }
    for (spec, value) in specs.iter().zip(positional) {
        values.insert(spec.name, value);
    }
    for (name, value) in named {
        let Some(spec) = specs.iter().find(|s| s.matches(&name)) else {
            return Err(Error::bind(pos, format!("{callee}: unknown argument {name:?}")));
        };
        values.insert(spec.name, value);
    }

    for spec in specs {
        if spec.required && !values.contains_key(spec.name) {
            return Err(Error::bind(
                pos,
                format!("{callee}: missing required argument {:?}", spec.name),
            ));
        }
    }

    Ok(BoundArgs { values, pos })
}

impl BoundArgs {
    pub fn pos(&self) -> Pos {
        self.pos
    }

    fn value(&self, name: &str) -> &Value {
        // only queried for names present in the spec
        &self.values[name]
    }

    pub fn num(&self, name: &str) -> Result<f64> {
        self.value(name).as_number().ok_or_else(|| {
            Error::bind(
                self.pos,
                format!("argument {name:?} must be a number, got {}", self.value(name).type_name()),
            )
        })
    }

    /// A number that must also be a whole value (grid counts, path indices).
    pub fn integer(&self, name: &str) -> Result<i64> {
        let n = self.num(name)?;
        if n.fract() != 0.0 || !n.is_finite() {
            return Err(Error::bind(self.pos, format!("argument {name:?} must be an integer")));
        }
        Ok(n as i64)
    }

    pub fn boolean(&self, name: &str) -> Result<bool> {
        self.value(name).as_bool().ok_or_else(|| {
            Error::bind(
                self.pos,
                format!("argument {name:?} must be a bool, got {}", self.value(name).type_name()),
            )
        })
    }

    pub fn string(&self, name: &str) -> Result<String> {
        self.value(name)
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| {
                Error::bind(
                    self.pos,
                    format!(
                        "argument {name:?} must be a string, got {}",
                        self.value(name).type_name()
                    ),
                )
            })
    }

    pub fn list(&self, name: &str) -> Result<&[Value]> {
        match self.value(name) {
            Value::List(items) => Ok(items),
            other => Err(Error::bind(
                self.pos,
                format!("argument {name:?} must be a list, got {}", other.type_name()),
            )),
        }
    }

    pub fn vec2(&self, name: &str) -> Result<Vector2<f64>> {
        self.value(name)
            .as_vec2()
            .map_err(|msg| Error::bind(self.pos, format!("argument {name:?}: {msg}")))
    }

    pub fn vec3(&self, name: &str) -> Result<Vector3<f64>> {
        self.value(name)
            .as_vec3()
            .map_err(|msg| Error::bind(self.pos, format!("argument {name:?}: {msg}")))
    }

    pub fn raw(&self, name: &str) -> &Value {
        self.value(name)
    }

    pub fn provided(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[ArgSpec] = &[
        ArgSpec::required("height").with_aliases(&["h"]),
        ArgSpec::optional("center", Value::Bool(false)),
    ];

    fn p() -> Pos {
        Pos { offset: 0, line: 1, col: 1 }
    }

    #[test]
    fn test_positional_then_named() {
        let b = bind(
            "cyl",
            SPECS,
            vec![(None, Value::Number(4.0)), (Some("center".into()), Value::Bool(true))],
            p(),
        )
        .unwrap();
        assert_eq!(b.num("height").unwrap(), 4.0);
        assert!(b.boolean("center").unwrap());
    }

    #[test]
    fn test_alias_binds_canonical_name() {
        let b = bind("cyl", SPECS, vec![(Some("h".into()), Value::Number(2.0))], p()).unwrap();
        assert_eq!(b.num("height").unwrap(), 2.0);
    }

    #[test]
    fn test_named_overrides_positional() {
        let b = bind(
            "cyl",
            SPECS,
            vec![(None, Value::Number(1.0)), (Some("height".into()), Value::Number(9.0))],
            p(),
        )
        .unwrap();
        assert_eq!(b.num("height").unwrap(), 9.0);
    }

    #[test]
    fn test_named_wins_over_later_positional() {
        // a positional after the named argument must not clobber it
        let b = bind(
            "cyl",
            SPECS,
            vec![(Some("h".into()), Value::Number(5.0)), (None, Value::Number(2.0))],
            p(),
        )
        .unwrap();
        assert_eq!(b.num("height").unwrap(), 5.0);
    }

    #[test]
    fn test_bind_errors() {
        assert!(bind("cyl", SPECS, vec![], p()).is_err()); // missing required
        assert!(bind("cyl", SPECS, vec![(Some("nope".into()), Value::Number(1.0))], p()).is_err());
        let too_many = vec![(None, Value::Number(1.0)); 3];
        assert!(bind("cyl", SPECS, too_many, p()).is_err());
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let specs = &[ArgSpec::optional("subdiv", Value::Number(8.0))];
        let b = bind("ms", specs, vec![(None, Value::Number(2.5))], p()).unwrap();
        assert!(b.integer("subdiv").is_err());
    }
}
