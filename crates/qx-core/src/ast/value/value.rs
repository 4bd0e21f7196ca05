use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::ast::{ExprLambda, Ty, Value};
use crate::id::Ident;

/// wrap struct declare with derive Debug, Clone, Serialize, Deserialize,
/// PartialEq, Eq, Hash
macro_rules! plain_value {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name;
    };
    ($(#[$attr:meta])* $name:ident: $ty:ty) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            pub value: $ty,
        }
        impl $name {
            pub fn new(v: $ty) -> Self {
                Self { value: v }
            }
        }
    };
}

plain_value! {
    ValueBool: bool
}
// Integers are stored as i64; the width comes from the static type of the
// node that produced or holds the value.
plain_value! {
    ValueInt: i64
}
plain_value! {
    ValueString: String
}
plain_value! {
    ValueNull
}
plain_value! {
    ValueUnit
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueDecimal {
    pub value: f64,
}
impl PartialEq for ValueDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.value.total_cmp(&other.value) == std::cmp::Ordering::Equal
    }
}

impl Eq for ValueDecimal {}
impl Hash for ValueDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.to_bits().hash(state);
    }
}
impl ValueDecimal {
    pub fn new(v: f64) -> Self {
        Self { value: v }
    }
}

common_struct! {
    pub struct ValueField {
        pub name: Ident,
        pub value: Value,
    }
}
impl ValueField {
    pub fn new(name: impl Into<Ident>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

common_struct! {
    /// An object value: a captured closure object, a DTO, a constructed struct
    pub struct ValueStruct {
        pub name: Ident,
        pub fields: Vec<ValueField>,
    }
}
impl ValueStruct {
    pub fn get_field(&self, name: &Ident) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| &field.name == name)
            .map(|field| &field.value)
    }

    pub fn set_field(&mut self, name: &Ident, value: Value) -> bool {
        match self.fields.iter_mut().find(|field| &field.name == name) {
            Some(field) => {
                field.value = value;
                true
            }
            None => false,
        }
    }
}

common_struct! {
    pub struct ValueList {
        pub values: Vec<Value>,
    }
}

common_struct! {
    /// Handle to an unmaterialized query source
    pub struct ValueQueryable {
        pub source: Ident,
        pub elem: Ty,
    }
}

common_struct! {
    /// A lambda together with the bindings visible where it was evaluated
    pub struct ValueClosure {
        pub lambda: ExprLambda,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub captured: Vec<ValueField>,
    }
}

impl Value {
    pub fn bool(b: bool) -> Value {
        Value::Bool(ValueBool::new(b))
    }
    pub fn int(i: i64) -> Value {
        Value::Int(ValueInt::new(i))
    }
    pub fn decimal(d: f64) -> Value {
        Value::Decimal(ValueDecimal::new(d))
    }
    pub fn string(s: impl Into<String>) -> Value {
        Value::String(ValueString::new(s.into()))
    }
    pub fn null() -> Value {
        Value::Null(ValueNull)
    }
    pub fn unit() -> Value {
        Value::Unit(ValueUnit)
    }
    pub fn list(values: Vec<Value>) -> Value {
        Value::List(ValueList { values })
    }
    pub fn structure(name: impl Into<Ident>, fields: Vec<(&str, Value)>) -> Value {
        Value::Struct(ValueStruct {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(name, value)| ValueField::new(name, value))
                .collect(),
        })
    }
    pub fn queryable(source: impl Into<Ident>, elem: Ty) -> Value {
        Value::Queryable(ValueQueryable {
            source: source.into(),
            elem,
        })
    }

    /// The value a field of type `ty` holds before it is assigned.
    pub fn default_for(ty: &Ty) -> Value {
        match ty {
            Ty::Primitive(crate::ast::TypePrimitive::Bool) => Value::bool(false),
            Ty::Primitive(crate::ast::TypePrimitive::I32)
            | Ty::Primitive(crate::ast::TypePrimitive::I64) => Value::int(0),
            Ty::Primitive(crate::ast::TypePrimitive::F64) => Value::decimal(0.0),
            Ty::Unit(_) => Value::unit(),
            _ => Value::null(),
        }
    }

    /// Short description used in fault messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Null(_) => "null",
            Value::Unit(_) => "unit",
            Value::Struct(_) => "struct",
            Value::List(_) => "list",
            Value::Queryable(_) => "queryable",
            Value::Closure(_) => "closure",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b.value),
            Value::Int(i) => write!(f, "{}", i.value),
            // Debug formatting keeps the fractional part: `1.0`, not `1`
            Value::Decimal(d) => write!(f, "{:?}", d.value),
            Value::String(s) => write!(f, "{:?}", s.value),
            Value::Null(_) => f.write_str("null"),
            Value::Unit(_) => f.write_str("()"),
            Value::Struct(s) => {
                write!(f, "{} {{ ", s.name)?;
                let fields = s
                    .fields
                    .iter()
                    .map(|field| format!("{}: {}", field.name, field.value))
                    .join(", ");
                write!(f, "{} }}", fields)
            }
            Value::List(list) => write!(f, "[{}]", list.values.iter().join(", ")),
            Value::Queryable(q) => write!(f, "query({})", q.source),
            Value::Closure(closure) => {
                write!(f, "{}", closure.lambda)?;
                if !closure.captured.is_empty() {
                    let captured = closure
                        .captured
                        .iter()
                        .map(|field| format!("{} = {}", field.name, field.value))
                        .join(", ");
                    write!(f, " [{}]", captured)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_display_keeps_fraction() {
        assert_eq!(Value::decimal(1.0).to_string(), "1.0");
        assert_eq!(Value::int(1).to_string(), "1");
    }

    #[test]
    fn struct_display_lists_fields_in_order() {
        let value = Value::structure(
            "Closure",
            vec![("min", Value::int(3)), ("name", Value::string("a"))],
        );
        assert_eq!(value.to_string(), "Closure { min: 3, name: \"a\" }");
    }

    #[test]
    fn decimal_equality_is_total() {
        assert_eq!(Value::decimal(f64::NAN), Value::decimal(f64::NAN));
        assert_ne!(Value::decimal(0.0), Value::decimal(-0.0));
    }

    #[test]
    fn struct_fields_can_be_read_and_assigned() {
        let Value::Struct(mut s) = Value::structure("Dto", vec![("x", Value::int(1))]) else {
            panic!("expected struct");
        };
        let x = Ident::new("x");
        assert_eq!(s.get_field(&x), Some(&Value::int(1)));
        assert!(s.set_field(&x, Value::int(2)));
        assert_eq!(s.get_field(&x), Some(&Value::int(2)));
        assert!(!s.set_field(&Ident::new("y"), Value::int(0)));
    }

    #[test]
    fn defaults_follow_type() {
        assert_eq!(Value::default_for(&Ty::i32()), Value::int(0));
        assert_eq!(Value::default_for(&Ty::string()), Value::null());
        assert_eq!(Value::default_for(&Ty::bool()), Value::bool(false));
    }
}
