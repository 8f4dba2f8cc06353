// expr.rs
//
// Minimal expression arena: the constant expressions built-in declarations
// need (literals, template parameter references, integral-to-bool casts).

use lumen_identity::{ExprId, TemplateParamId};

use crate::type_arena::TypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastKind {
    IntegralToBoolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    IntegerLiteral {
        value: u64,
        ty: TypeId,
    },
    /// Reference to a non-type template parameter, e.g. `element_count`.
    TemplateParamRef {
        param: TemplateParamId,
        depth: u32,
        index: u32,
        ty: TypeId,
    },
    ImplicitCast {
        kind: CastKind,
        operand: ExprId,
        ty: TypeId,
    },
}

/// Append-only storage for expressions; lives as long as the compilation.
#[derive(Debug, Clone, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    pub fn integer_literal(&mut self, value: u64, ty: TypeId) -> ExprId {
        self.alloc(Expr::IntegerLiteral { value, ty })
    }

    pub fn template_param_ref(
        &mut self,
        param: TemplateParamId,
        depth: u32,
        index: u32,
        ty: TypeId,
    ) -> ExprId {
        self.alloc(Expr::TemplateParamRef {
            param,
            depth,
            index,
            ty,
        })
    }

    /// Wrap an integral expression in an implicit conversion to `bool`.
    pub fn integral_to_boolean(&mut self, operand: ExprId) -> ExprId {
        self.alloc(Expr::ImplicitCast {
            kind: CastKind::IntegralToBoolean,
            operand,
            ty: TypeId::BOOL,
        })
    }

    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index() as usize]
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn type_of(&self, id: ExprId) -> TypeId {
        match self.get(id) {
            Expr::IntegerLiteral { ty, .. }
            | Expr::TemplateParamRef { ty, .. }
            | Expr::ImplicitCast { ty, .. } => *ty,
        }
    }

    /// Value of a literal, looking through implicit casts.
    /// Returns None for value-dependent expressions.
    pub fn literal_value(&self, id: ExprId) -> Option<u64> {
        match self.get(id) {
            Expr::IntegerLiteral { value, .. } => Some(*value),
            Expr::TemplateParamRef { .. } => None,
            Expr::ImplicitCast {
                kind: CastKind::IntegralToBoolean,
                operand,
                ..
            } => self.literal_value(*operand).map(|v| u64::from(v != 0)),
        }
    }

    /// (depth, index) of a referenced non-type template parameter.
    pub fn param_position(&self, id: ExprId) -> Option<(u32, u32)> {
        match self.get(id) {
            Expr::TemplateParamRef { depth, index, .. } => Some((*depth, *index)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_value_through_bool_cast() {
        let mut exprs = ExprArena::new();
        let one = exprs.integer_literal(1, TypeId::INT);
        let zero = exprs.integer_literal(0, TypeId::INT);
        let truthy = exprs.integral_to_boolean(one);
        let falsy = exprs.integral_to_boolean(zero);

        assert_eq!(exprs.literal_value(truthy), Some(1));
        assert_eq!(exprs.literal_value(falsy), Some(0));
        assert_eq!(exprs.type_of(truthy), TypeId::BOOL);
        assert_eq!(exprs.type_of(one), TypeId::INT);
    }

    #[test]
    fn param_ref_is_not_literal() {
        let mut exprs = ExprArena::new();
        let param = exprs.template_param_ref(TemplateParamId::new(3), 0, 1, TypeId::INT);

        assert_eq!(exprs.literal_value(param), None);
        assert_eq!(exprs.param_position(param), Some((0, 1)));
    }
}
