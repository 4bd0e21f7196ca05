mod ty;
mod value;

pub use ty::*;
pub use value::*;

common_enum! {
    /// Runtime value held by a literal node or produced by evaluation
    pub enum Value {
        Bool(ValueBool),
        Int(ValueInt),
        Decimal(ValueDecimal),
        String(ValueString),
        Null(ValueNull),
        Unit(ValueUnit),
        Struct(ValueStruct),
        List(ValueList),
        Queryable(ValueQueryable),
        Closure(ValueClosure),
    }
}
