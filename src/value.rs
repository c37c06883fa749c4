//! Value: a dynamically typed key/value for heterogeneous maps.
//!
//! Lets one map hold integers, strings, lists and nested maps side by side,
//! with hashability decided per value. Lists and mutable dicts never hash;
//! tuples and frozen dicts hash when everything inside them does. Values of
//! different shapes never compare equal, except across the numeric
//! variants: `True` and `False` equal `1` and `0`, and an integral float
//! equals the integer it stands for. Equal numbers hash alike, so they are
//! one key.
//!
//! `Debug` renders literal-style text (`'one'`, `[1, 2]`, `(1,)`,
//! `{1: 'one'}`, `1e+20`), so a map of values prints as
//! `{1: 'one', [1, 2]: 'one two'}`.

use crate::frozen::FrozenAnyKeyMap;
use crate::key::AnyKey;
use crate::map::AnyKeyMap;
use core::fmt::{self, Write};
use core::hash::{Hash, Hasher};

#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Value>),
    List(Vec<Value>),
    Dict(AnyKeyMap<Value, Value>),
    FrozenDict(FrozenAnyKeyMap<Value, Value>),
}

impl Value {
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// The integer a float stands for, if it is integral and in range.
fn integral(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (None, None) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(i), Float(f)) | (Float(f), Int(i)) => integral(*f) == Some(*i),
            (Bool(b), Int(i)) | (Int(i), Bool(b)) => i64::from(*b) == *i,
            (Bool(b), Float(f)) | (Float(f), Bool(b)) => integral(*f) == Some(i64::from(*b)),
            (Str(a), Str(b)) => a == b,
            (Tuple(a), Tuple(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Dict(a), Dict(b)) => a.equals(b),
            (FrozenDict(a), FrozenDict(b)) => a.equals(b),
            _ => false,
        }
    }
}

impl AnyKey for Value {
    fn is_hashable(&self) -> bool {
        match self {
            Value::List(_) | Value::Dict(_) => false,
            Value::Tuple(items) => items.iter().all(AnyKey::is_hashable),
            Value::FrozenDict(f) => f.is_hashable(),
            _ => true,
        }
    }

    fn hash_key<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::None => state.write_u8(0),
            // Booleans hash like the integer they equal.
            Value::Bool(b) => {
                state.write_u8(2);
                i64::from(*b).hash(state);
            }
            Value::Int(i) => {
                state.write_u8(2);
                i.hash(state);
            }
            // Integral floats hash like the integer they equal.
            Value::Float(f) => match integral(*f) {
                Some(i) => {
                    state.write_u8(2);
                    i.hash(state);
                }
                Option::None => {
                    state.write_u8(3);
                    f.hash_key(state);
                }
            },
            Value::Str(s) => {
                state.write_u8(4);
                s.hash(state);
            }
            Value::Tuple(items) => {
                state.write_u8(5);
                state.write_usize(items.len());
                for v in items {
                    v.hash_key(state);
                }
            }
            Value::FrozenDict(f) => {
                state.write_u8(6);
                f.hash_key(state);
            }
            Value::List(_) | Value::Dict(_) => {}
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if c.is_control() => write!(f, "\\x{:02x}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

/// Shortest round-trip digits, with an explicit exponent sign and at least
/// two exponent digits (`1e+20`, `1e-07`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let text = format!("{:?}", x);
    match text.split_once('e') {
        None => f.write_str(&text),
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{:?}", v)?;
    }
    f.write_str(close)
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) if x.is_nan() => f.write_str("nan"),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => write_quoted(f, s),
            Value::Tuple(items) if items.len() == 1 => write_seq(f, "(", items, ",)"),
            Value::Tuple(items) => write_seq(f, "(", items, ")"),
            Value::List(items) => write_seq(f, "[", items, "]"),
            Value::Dict(m) => fmt::Debug::fmt(m, f),
            Value::FrozenDict(m) => fmt::Debug::fmt(m, f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<AnyKeyMap<Value, Value>> for Value {
    fn from(m: AnyKeyMap<Value, Value>) -> Self {
        Value::Dict(m)
    }
}

impl From<FrozenAnyKeyMap<Value, Value>> for Value {
    fn from(m: FrozenAnyKeyMap<Value, Value>) -> Self {
        Value::FrozenDict(m)
    }
}
