use crate::ast::*;
use crate::error::{EvaluationFault, Result};
use crate::id::Ident;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

type BuiltinFnImpl = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A pure function referenced by a method-call node.
///
/// The node carries the callable itself, so a tree can be evaluated without
/// any registry. Functions compare and serialize by name only.
#[derive(Clone)]
pub struct BuiltinFn {
    pub name: Ident,
    func: Arc<BuiltinFnImpl>,
}

impl BuiltinFn {
    pub fn new(
        name: impl Into<Ident>,
        f: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(f),
        }
    }

    /// A function known only by name, e.g. after deserialization.
    /// Invoking it always fails.
    pub fn unbound(name: impl Into<Ident>) -> Self {
        let name = name.into();
        let reported = name.clone();
        Self::new(name, move |_| {
            Err(EvaluationFault::Function {
                name: reported.to_string(),
                message: "function body is not available".to_string(),
            }
            .into())
        })
    }

    pub fn invoke(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }
}

impl Debug for BuiltinFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinFn")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
impl Serialize for BuiltinFn {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.name.serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for BuiltinFn {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = Ident::deserialize(deserializer)?;
        Ok(Self::unbound(name))
    }
}

impl PartialEq for BuiltinFn {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for BuiltinFn {}

fn expect_arity(name: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() != expected {
        bail!("{} expects {} argument(s), got: {:?}", name, expected, args)
    }
    Ok(())
}

pub fn operate_on_literals(
    name: &'static str,
    op_i64: impl Fn(&[i64]) -> Option<i64> + Send + Sync + 'static,
    op_f64: impl Fn(&[f64]) -> f64 + Send + Sync + 'static,
) -> BuiltinFn {
    BuiltinFn::new(name, move |args| {
        let mut args_i64 = vec![];
        let mut args_f64 = vec![];
        for arg in args {
            match arg {
                Value::Int(x) => args_i64.push(x.value),
                Value::Decimal(x) => args_f64.push(x.value),
                _ => bail!("{} does not support argument type {:?}", name, args),
            }
        }
        if !args_i64.is_empty() && !args_f64.is_empty() {
            bail!("{} does not support mixed arguments {:?}", name, args)
        }
        if !args_i64.is_empty() {
            return match op_i64(&args_i64) {
                Some(value) => Ok(Value::int(value)),
                None => bail!("{} overflowed on {:?}", name, args_i64),
            };
        }
        if !args_f64.is_empty() {
            return Ok(Value::decimal(op_f64(&args_f64)));
        }
        bail!("{} needs at least one argument", name)
    })
}

pub fn builtin_abs() -> BuiltinFn {
    operate_on_literals(
        "abs",
        |x| match x {
            [v] => v.checked_abs(),
            _ => None,
        },
        |x| x.first().copied().unwrap_or_default().abs(),
    )
}

pub fn builtin_max() -> BuiltinFn {
    operate_on_literals(
        "max",
        |x| x.iter().copied().max(),
        |x| x.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    )
}

pub fn builtin_min() -> BuiltinFn {
    operate_on_literals(
        "min",
        |x| x.iter().copied().min(),
        |x| x.iter().copied().fold(f64::INFINITY, f64::min),
    )
}

/// Length of a string (in chars) or a list.
pub fn builtin_len() -> BuiltinFn {
    BuiltinFn::new("len", |args| {
        expect_arity("len", args, 1)?;
        match &args[0] {
            Value::String(s) => Ok(Value::int(s.value.chars().count() as i64)),
            Value::List(list) => Ok(Value::int(list.values.len() as i64)),
            other => bail!("len does not support {}", other),
        }
    })
}

/// Substring test on strings, membership test on lists.
pub fn builtin_contains() -> BuiltinFn {
    BuiltinFn::new("contains", |args| {
        expect_arity("contains", args, 2)?;
        match (&args[0], &args[1]) {
            (Value::String(haystack), Value::String(needle)) => {
                Ok(Value::bool(haystack.value.contains(needle.value.as_str())))
            }
            (Value::List(list), needle) => Ok(Value::bool(list.values.contains(needle))),
            (receiver, _) => bail!("contains does not support {}", receiver),
        }
    })
}

pub fn builtin_starts_with() -> BuiltinFn {
    BuiltinFn::new("starts_with", |args| {
        expect_arity("starts_with", args, 2)?;
        match (&args[0], &args[1]) {
            (Value::String(s), Value::String(prefix)) => {
                Ok(Value::bool(s.value.starts_with(prefix.value.as_str())))
            }
            _ => bail!("starts_with expects two strings, got: {:?}", args),
        }
    })
}

pub fn builtin_to_upper() -> BuiltinFn {
    BuiltinFn::new("to_upper", |args| {
        expect_arity("to_upper", args, 1)?;
        match &args[0] {
            Value::String(s) => Ok(Value::string(s.value.to_uppercase())),
            other => bail!("to_upper does not support {}", other),
        }
    })
}

pub fn builtin_to_lower() -> BuiltinFn {
    BuiltinFn::new("to_lower", |args| {
        expect_arity("to_lower", args, 1)?;
        match &args[0] {
            Value::String(s) => Ok(Value::string(s.value.to_lowercase())),
            other => bail!("to_lower does not support {}", other),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numeric_builtins_keep_operand_kind() -> Result<()> {
        assert_eq!(builtin_max().invoke(&[Value::int(3), Value::int(9)])?, Value::int(9));
        assert_eq!(
            builtin_min().invoke(&[Value::decimal(1.5), Value::decimal(-2.0)])?,
            Value::decimal(-2.0)
        );
        assert_eq!(builtin_abs().invoke(&[Value::int(-4)])?, Value::int(4));
        Ok(())
    }

    #[test]
    fn abs_of_min_int_is_an_error() {
        assert!(builtin_abs().invoke(&[Value::int(i64::MIN)]).is_err());
    }

    #[test]
    fn mixed_numeric_arguments_are_rejected() {
        let err = builtin_max()
            .invoke(&[Value::int(1), Value::decimal(2.0)])
            .unwrap_err();
        assert!(err.to_string().contains("mixed"), "{err}");
    }

    #[test]
    fn string_builtins() -> Result<()> {
        let hello = Value::string("Hello");
        assert_eq!(builtin_len().invoke(&[hello.clone()])?, Value::int(5));
        assert_eq!(
            builtin_contains().invoke(&[hello.clone(), Value::string("ell")])?,
            Value::bool(true)
        );
        assert_eq!(
            builtin_starts_with().invoke(&[hello.clone(), Value::string("x")])?,
            Value::bool(false)
        );
        assert_eq!(builtin_to_upper().invoke(&[hello.clone()])?, Value::string("HELLO"));
        assert_eq!(builtin_to_lower().invoke(&[hello])?, Value::string("hello"));
        Ok(())
    }

    #[test]
    fn list_contains_uses_value_equality() -> Result<()> {
        let list = Value::list(vec![Value::int(1), Value::int(2)]);
        assert_eq!(
            builtin_contains().invoke(&[list.clone(), Value::int(2)])?,
            Value::bool(true)
        );
        assert_eq!(builtin_len().invoke(&[list])?, Value::int(2));
        Ok(())
    }

    #[test]
    fn unbound_function_fails_with_fault() {
        let err = BuiltinFn::unbound("compute").invoke(&[]).unwrap_err();
        assert!(matches!(
            err.as_fault(),
            Some(EvaluationFault::Function { name, .. }) if name == "compute"
        ));
    }

    #[test]
    fn functions_serialize_by_name() -> Result<()> {
        let json = serde_json::to_string(&builtin_len())?;
        assert_eq!(json, "\"len\"");
        let back: BuiltinFn = serde_json::from_str(&json)?;
        assert_eq!(back, builtin_len());
        Ok(())
    }
}
