use crate::id::Ident;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type BType = Box<Ty>;

common_enum! {
    /// Static type of an expression node
    pub enum Ty {
        Primitive(TypePrimitive),
        Struct(TypeStruct),
        List(TypeList),
        /// A deferred query source; never evaluated eagerly
        Queryable(TypeQueryable),
        Function(TypeFunction),
        Unit(TypeUnit),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TypePrimitive {
    Bool,
    I32,
    I64,
    F64,
    String,
}

common_struct! {
    pub struct TypeField {
        pub name: Ident,
        pub ty: Ty,
    }
}

common_struct! {
    pub struct TypeStruct {
        pub name: Ident,
        pub fields: Vec<TypeField>,
    }
}

impl TypeStruct {
    pub fn new(name: impl Into<Ident>, fields: Vec<TypeField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

common_struct! {
    pub struct TypeList {
        pub elem: BType,
    }
}

common_struct! {
    pub struct TypeQueryable {
        pub elem: BType,
    }
}

common_struct! {
    pub struct TypeFunction {
        pub params: Vec<Ty>,
        pub ret: BType,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct TypeUnit;

impl Ty {
    pub const fn bool() -> Ty {
        Ty::Primitive(TypePrimitive::Bool)
    }
    pub const fn i32() -> Ty {
        Ty::Primitive(TypePrimitive::I32)
    }
    pub const fn i64() -> Ty {
        Ty::Primitive(TypePrimitive::I64)
    }
    pub const fn f64() -> Ty {
        Ty::Primitive(TypePrimitive::F64)
    }
    pub const fn string() -> Ty {
        Ty::Primitive(TypePrimitive::String)
    }
    pub fn list(elem: Ty) -> Ty {
        Ty::List(TypeList {
            elem: Box::new(elem),
        })
    }
    pub fn queryable(elem: Ty) -> Ty {
        Ty::Queryable(TypeQueryable {
            elem: Box::new(elem),
        })
    }
    pub fn function(params: Vec<Ty>, ret: Ty) -> Ty {
        Ty::Function(TypeFunction {
            params,
            ret: Box::new(ret),
        })
    }
    pub fn structure(name: impl Into<Ident>, fields: Vec<(&str, Ty)>) -> Ty {
        let fields = fields
            .into_iter()
            .map(|(name, ty)| TypeField {
                name: Ident::new(name),
                ty,
            })
            .collect();
        Ty::Struct(TypeStruct::new(name, fields))
    }

    pub fn as_struct(&self) -> Option<&TypeStruct> {
        match self {
            Ty::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Ty::Primitive(TypePrimitive::I32) | Ty::Primitive(TypePrimitive::I64)
        )
    }

    /// Inclusive value range of an integer type.
    pub fn integer_bounds(&self) -> Option<(i64, i64)> {
        match self {
            Ty::Primitive(TypePrimitive::I32) => Some((i32::MIN as i64, i32::MAX as i64)),
            Ty::Primitive(TypePrimitive::I64) => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Whether values of this type may be null.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            Ty::Primitive(TypePrimitive::String)
                | Ty::Struct(_)
                | Ty::List(_)
                | Ty::Queryable(_)
                | Ty::Function(_)
        )
    }
}

impl Display for TypePrimitive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TypePrimitive::Bool => "bool",
            TypePrimitive::I32 => "i32",
            TypePrimitive::I64 => "i64",
            TypePrimitive::F64 => "f64",
            TypePrimitive::String => "string",
        })
    }
}

impl Display for Ty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Ty::Primitive(p) => write!(f, "{}", p),
            Ty::Struct(s) => write!(f, "{}", s.name),
            Ty::List(list) => write!(f, "[{}]", list.elem),
            Ty::Queryable(q) => write!(f, "Queryable<{}>", q.elem),
            Ty::Function(func) => {
                write!(f, "fn({}) -> {}", func.params.iter().join(", "), func.ret)
            }
            Ty::Unit(_) => f.write_str("()"),
        }
    }
}
