use super::*;

impl Interpreter {
    pub fn interpret_member(&self, object: Value, member: &Ident) -> Result<Value> {
        match object {
            Value::Null(_) => qx_core::fault!(EvaluationFault::NullReference {
                member: member.clone(),
            }),
            Value::Struct(object) => match object.get_field(member) {
                Some(value) => Ok(value.clone()),
                None => qx_core::fault!(EvaluationFault::MissingMember {
                    ty: object.name.to_string(),
                    member: member.clone(),
                }),
            },
            other => qx_core::fault!(EvaluationFault::MissingMember {
                ty: other.kind_name().to_string(),
                member: member.clone(),
            }),
        }
    }

    pub fn interpret_call(
        &self,
        ty: &Ty,
        node: &ExprMethodCall,
        env: &Env,
        depth: usize,
    ) -> Result<Value> {
        let mut args = Vec::with_capacity(node.args.len() + 1);
        if let Some(receiver) = &node.receiver {
            let receiver = self.interpret_expr(receiver, env, depth + 1)?;
            if receiver.is_null() {
                qx_core::fault!(EvaluationFault::NullReference {
                    member: node.method.name.clone(),
                })
            }
            args.push(receiver);
        }
        for arg in &node.args {
            args.push(self.interpret_expr(arg, env, depth + 1)?);
        }
        qx_core::trace!("invoking {} with {} argument(s)", node.method.name, args.len());
        let result = node
            .method
            .invoke(&args)
            .map_err(|err| builtin_failure(&node.method.name, err))?;
        // builtins compute in i64; the literal must still fit the call's type
        match result {
            Value::Int(i) if ty.is_integer() => {
                fit_integer(node.method.name.as_str(), ty, Some(i.value))
            }
            value => Ok(value),
        }
    }

    pub fn interpret_new(&self, ty: &Ty, node: &ExprNew, env: &Env, depth: usize) -> Result<Value> {
        let Some(layout) = ty.as_struct() else {
            return Err(type_mismatch("new", ty.to_string()));
        };
        crate::fault_ensure!(
            node.args.len() <= layout.fields.len(),
            EvaluationFault::Arity {
                expected: layout.fields.len(),
                found: node.args.len(),
            }
        );
        let mut fields = Vec::with_capacity(layout.fields.len());
        for (i, field) in layout.fields.iter().enumerate() {
            let value = match node.args.get(i) {
                Some(arg) => self.interpret_expr(arg, env, depth + 1)?,
                None => Value::default_for(&field.ty),
            };
            fields.push(ValueField::new(field.name.clone(), value));
        }
        Ok(Value::Struct(ValueStruct {
            name: layout.name.clone(),
            fields,
        }))
    }

    pub fn interpret_member_init(
        &self,
        node: &ExprMemberInit,
        env: &Env,
        depth: usize,
    ) -> Result<Value> {
        let mut object = match self.interpret_expr(&node.new, env, depth + 1)? {
            Value::Struct(object) => object,
            other => return Err(type_mismatch("member init", other.kind_name())),
        };
        for binding in &node.bindings {
            let value = self.interpret_expr(&binding.value, env, depth + 1)?;
            if !object.set_field(&binding.member, value) {
                qx_core::fault!(EvaluationFault::MissingMember {
                    ty: object.name.to_string(),
                    member: binding.member.clone(),
                })
            }
        }
        Ok(Value::Struct(object))
    }
}
