/// Positional script arguments and their validation helpers.
///
/// Indices are 1-based, as scripts count them. `check_*` helpers require
/// the argument; `opt_*` helpers fall back to a default when it is nil or
/// missing. A value of the wrong type is an `Error::InvalidArgument`.

use crate::error::{Error, Result};

/// A script value as passed to a callout.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Number(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Number(value as f64)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

fn get(args: &[Arg], index: usize) -> &Arg {
    index
        .checked_sub(1)
        .and_then(|i| args.get(i))
        .unwrap_or(&Arg::Nil)
}

fn invalid(function: &'static str, index: usize, expected: &'static str) -> Error {
    Error::InvalidArgument { function, index, expected }
}

/// Numeric value, accepting numeric strings.
fn coerce_number(arg: &Arg) -> Option<f64> {
    match arg {
        Arg::Number(n) => Some(*n),
        Arg::Str(s) => s.trim().parse().ok(),
        Arg::Nil | Arg::Bool(_) => None,
    }
}

/// Whether the argument is a number or a numeric string.
pub fn is_number(args: &[Arg], index: usize) -> bool {
    coerce_number(get(args, index)).is_some()
}

/// The argument if it is an actual number (numeric strings excluded).
pub fn raw_number(args: &[Arg], index: usize) -> Option<f64> {
    match get(args, index) {
        Arg::Number(n) => Some(*n),
        _ => None,
    }
}

/// Required integer (fractions truncate toward zero).
pub fn check_int(args: &[Arg], function: &'static str, index: usize) -> Result<i64> {
    coerce_number(get(args, index))
        .map(|n| n as i64)
        .ok_or_else(|| invalid(function, index, "number"))
}

/// Required float.
pub fn check_float(args: &[Arg], function: &'static str, index: usize) -> Result<f32> {
    coerce_number(get(args, index))
        .map(|n| n as f32)
        .ok_or_else(|| invalid(function, index, "number"))
}

/// Optional integer.
pub fn opt_int(args: &[Arg], function: &'static str, index: usize, default: i64) -> Result<i64> {
    match get(args, index) {
        Arg::Nil => Ok(default),
        _ => check_int(args, function, index),
    }
}

/// Optional float.
pub fn opt_float(args: &[Arg], function: &'static str, index: usize, default: f32) -> Result<f32> {
    match get(args, index) {
        Arg::Nil => Ok(default),
        _ => check_float(args, function, index),
    }
}

/// Optional boolean.
pub fn opt_bool(args: &[Arg], function: &'static str, index: usize, default: bool) -> Result<bool> {
    match get(args, index) {
        Arg::Nil => Ok(default),
        Arg::Bool(b) => Ok(*b),
        _ => Err(invalid(function, index, "boolean")),
    }
}

/// Truthiness: only nil and false are false.
pub fn to_bool(args: &[Arg], index: usize) -> bool {
    !matches!(get(args, index), Arg::Nil | Arg::Bool(false))
}
