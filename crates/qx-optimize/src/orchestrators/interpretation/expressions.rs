use super::*;

impl Interpreter {
    pub fn interpret_binary(
        &self,
        ty: &Ty,
        node: &ExprBinary,
        env: &Env,
        depth: usize,
    ) -> Result<Value> {
        let lhs = self.interpret_expr(&node.lhs, env, depth + 1)?;
        match node.op {
            BinOpKind::And | BinOpKind::Or => {
                let short = node.op == BinOpKind::Or;
                if self.expect_bool(node.op.symbol(), &lhs)? == short {
                    return Ok(Value::bool(short));
                }
                let rhs = self.interpret_expr(&node.rhs, env, depth + 1)?;
                Ok(Value::bool(self.expect_bool(node.op.symbol(), &rhs)?))
            }
            BinOpKind::Coalesce => match lhs {
                Value::Null(_) => self.interpret_expr(&node.rhs, env, depth + 1),
                value => Ok(value),
            },
            op => {
                let rhs = self.interpret_expr(&node.rhs, env, depth + 1)?;
                if op.is_arithmetic() {
                    self.interpret_arithmetic(ty, op, lhs, rhs)
                } else {
                    self.interpret_comparison(op, &lhs, &rhs)
                }
            }
        }
    }

    fn expect_bool(&self, op: &str, value: &Value) -> Result<bool> {
        match value {
            Value::Bool(b) => Ok(b.value),
            other => Err(type_mismatch(op, other.kind_name())),
        }
    }

    fn interpret_arithmetic(&self, ty: &Ty, op: BinOpKind, lhs: Value, rhs: Value) -> Result<Value> {
        match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => {
                let checked = match op {
                    BinOpKind::Add => a.value.checked_add(b.value),
                    BinOpKind::Sub => a.value.checked_sub(b.value),
                    BinOpKind::Mul => a.value.checked_mul(b.value),
                    BinOpKind::Div | BinOpKind::Mod if b.value == 0 => {
                        qx_core::fault!(EvaluationFault::DivideByZero)
                    }
                    BinOpKind::Div => a.value.checked_div(b.value),
                    BinOpKind::Mod => a.value.checked_rem(b.value),
                    _ => unreachable!("{op} is not arithmetic"),
                };
                fit_integer(op.symbol(), ty, checked)
            }
            (Value::Decimal(a), Value::Decimal(b)) => Ok(Value::decimal(match op {
                BinOpKind::Add => a.value + b.value,
                BinOpKind::Sub => a.value - b.value,
                BinOpKind::Mul => a.value * b.value,
                BinOpKind::Div => a.value / b.value,
                BinOpKind::Mod => a.value % b.value,
                _ => unreachable!("{op} is not arithmetic"),
            })),
            (lhs @ (Value::String(_) | Value::Null(_)), rhs @ (Value::String(_) | Value::Null(_)))
                if op == BinOpKind::Add && (lhs.is_string() || rhs.is_string()) =>
            {
                Ok(Value::string(format!(
                    "{}{}",
                    as_concat_operand(&lhs),
                    as_concat_operand(&rhs)
                )))
            }
            // lifted operators: null in, null out
            (Value::Null(_), _) | (_, Value::Null(_)) => Ok(Value::null()),
            (lhs, rhs) => Err(type_mismatch(
                op.symbol(),
                format!("{} and {}", lhs.kind_name(), rhs.kind_name()),
            )),
        }
    }

    fn interpret_comparison(&self, op: BinOpKind, lhs: &Value, rhs: &Value) -> Result<Value> {
        let equal = match (lhs, rhs) {
            // IEEE semantics here, not the total order used for value identity
            (Value::Decimal(a), Value::Decimal(b)) => a.value == b.value,
            (a, b) => a == b,
        };
        match op {
            BinOpKind::Eq => return Ok(Value::bool(equal)),
            BinOpKind::Ne => return Ok(Value::bool(!equal)),
            _ => {}
        }
        let ordering = match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => a.value.partial_cmp(&b.value),
            (Value::Decimal(a), Value::Decimal(b)) => a.value.partial_cmp(&b.value),
            (Value::String(a), Value::String(b)) => a.value.partial_cmp(&b.value),
            (Value::Null(_), _) | (_, Value::Null(_)) => None,
            (a, b) => {
                return Err(type_mismatch(
                    op.symbol(),
                    format!("{} and {}", a.kind_name(), b.kind_name()),
                ))
            }
        };
        // unordered operands (NaN, null) compare false
        let Some(ordering) = ordering else {
            return Ok(Value::bool(false));
        };
        Ok(Value::bool(match op {
            BinOpKind::Lt => ordering.is_lt(),
            BinOpKind::Le => ordering.is_le(),
            BinOpKind::Gt => ordering.is_gt(),
            BinOpKind::Ge => ordering.is_ge(),
            _ => unreachable!("{op} is not a comparison"),
        }))
    }

    pub fn interpret_unary(
        &self,
        ty: &Ty,
        node: &ExprUnary,
        env: &Env,
        depth: usize,
    ) -> Result<Value> {
        let value = self.interpret_expr(&node.operand, env, depth + 1)?;
        match (node.op, value) {
            (UnOpKind::Convert, value) => self.interpret_convert(value, ty),
            (_, Value::Null(_)) => Ok(Value::null()),
            (UnOpKind::Neg, Value::Int(i)) => fit_integer("-", ty, i.value.checked_neg()),
            (UnOpKind::Neg, Value::Decimal(d)) => Ok(Value::decimal(-d.value)),
            (UnOpKind::Not, Value::Bool(b)) => Ok(Value::bool(!b.value)),
            (op, value) => Err(type_mismatch(op.to_string(), value.kind_name())),
        }
    }

    pub fn interpret_convert(&self, value: Value, to: &Ty) -> Result<Value> {
        let invalid = |value: &Value| {
            qx_core::Error::from(EvaluationFault::InvalidConversion {
                from: value.kind_name().to_string(),
                to: to.clone(),
            })
        };
        match (value, to) {
            (Value::Null(_), to) if to.is_nullable() => Ok(Value::null()),
            (Value::Int(i), to) if to.is_integer() => fit_integer("as", to, Some(i.value)),
            (Value::Int(i), Ty::Primitive(TypePrimitive::F64)) => Ok(Value::decimal(i.value as f64)),
            (Value::Decimal(d), to) if to.is_integer() => {
                if !d.value.is_finite() {
                    return Err(invalid(&Value::Decimal(d)));
                }
                let truncated = d.value.trunc() as i128;
                let (lo, hi) = to.integer_bounds().unwrap_or((i64::MIN, i64::MAX));
                if truncated < lo as i128 || truncated > hi as i128 {
                    qx_core::fault!(EvaluationFault::Overflow {
                        op: "as".to_string(),
                        ty: to.clone(),
                    })
                }
                Ok(Value::int(truncated as i64))
            }
            (value, to) if conforms(&value, to) => Ok(value),
            (value, _) => Err(invalid(&value)),
        }
    }

    pub fn interpret_conditional(
        &self,
        node: &ExprConditional,
        env: &Env,
        depth: usize,
    ) -> Result<Value> {
        let cond = self.interpret_expr(&node.cond, env, depth + 1)?;
        if self.expect_bool("?:", &cond)? {
            self.interpret_expr(&node.then, env, depth + 1)
        } else {
            self.interpret_expr(&node.elze, env, depth + 1)
        }
    }
}

fn as_concat_operand(value: &Value) -> &str {
    match value {
        Value::String(s) => s.value.as_str(),
        _ => "",
    }
}

/// Whether `value` already is a value of type `ty`.
fn conforms(value: &Value, ty: &Ty) -> bool {
    match (value, ty) {
        (Value::Bool(_), Ty::Primitive(TypePrimitive::Bool))
        | (Value::Decimal(_), Ty::Primitive(TypePrimitive::F64))
        | (Value::String(_), Ty::Primitive(TypePrimitive::String))
        | (Value::List(_), Ty::List(_))
        | (Value::Queryable(_), Ty::Queryable(_))
        | (Value::Closure(_), Ty::Function(_))
        | (Value::Unit(_), Ty::Unit(_)) => true,
        (Value::Struct(s), Ty::Struct(t)) => s.name == t.name,
        _ => false,
    }
}
