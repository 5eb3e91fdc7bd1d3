//! Compile-time evaluation of constant integer expressions.
//!
//! Used wherever a dimension, slice offset or case label must be known
//! statically. Only integer literals, unary minus and the arithmetic
//! operators are admissible; the expression is type-checked by the
//! ordinary rules before it reaches this evaluator.

use crate::ast::{BinaryOp, ExprKind, Expression, UnaryOp};
use crate::errors::CompilationError;

/// Reduces a constant expression to its integer value.
pub fn evaluate(expr: &Expression) -> Result<i64, CompilationError> {
    match &expr.kind {
        ExprKind::IntValue(value) => Ok(*value),
        ExprKind::Unary {
            op: UnaryOp::Minus,
            operand,
        } => evaluate(operand)?
            .checked_neg()
            .ok_or_else(|| non_constant(expr, "arithmetic overflow")),
        ExprKind::Binary { op, left, right } => {
            let lhs = evaluate(left)?;
            let rhs = evaluate(right)?;
            // Overflowing arithmetic leaves the expression without a
            // representable constant value, same as a zero divisor
            match op {
                BinaryOp::Add => lhs
                    .checked_add(rhs)
                    .ok_or_else(|| non_constant(expr, "arithmetic overflow")),
                BinaryOp::Sub => lhs
                    .checked_sub(rhs)
                    .ok_or_else(|| non_constant(expr, "arithmetic overflow")),
                BinaryOp::Mul => lhs
                    .checked_mul(rhs)
                    .ok_or_else(|| non_constant(expr, "arithmetic overflow")),
                // Truncates toward zero
                BinaryOp::Div => {
                    if rhs == 0 {
                        Err(non_constant(expr, "division by zero"))
                    } else {
                        lhs.checked_div(rhs)
                            .ok_or_else(|| non_constant(expr, "arithmetic overflow"))
                    }
                }
                // Computed in floating point and truncated, so negative
                // exponents collapse to zero unless the base is 1 or -1
                BinaryOp::Exp => Ok((lhs as f64).powf(rhs as f64) as i64),
                BinaryOp::MatMul
                | BinaryOp::DotProduct
                | BinaryOp::And
                | BinaryOp::Or => Err(non_constant(expr, describe(&expr.kind))),
            }
        }
        other => Err(non_constant(expr, describe(other))),
    }
}

fn non_constant(expr: &Expression, found: &str) -> CompilationError {
    CompilationError::NonConstant {
        location: expr.location,
        found: found.to_string(),
    }
}

/// Short name of an expression kind for diagnostics.
fn describe(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::IntValue(_) => "integer literal",
        ExprKind::FloatValue(_) => "float literal",
        ExprKind::BoolValue(_) => "bool literal",
        ExprKind::StringValue(_) => "string literal",
        ExprKind::IdentifierReference(_) => "identifier reference",
        ExprKind::Binary { .. } => "binary operation",
        ExprKind::Compare { .. } => "comparison",
        ExprKind::Unary { .. } => "unary operation",
        ExprKind::VectorDimension(_) => "vector dimension access",
        ExprKind::MatrixRows(_) => "matrix row access",
        ExprKind::MatrixCols(_) => "matrix column access",
        ExprKind::Select { .. } => "ternary select",
        ExprKind::Call { .. } => "function call",
        ExprKind::ElementSelect { .. } => "element selection",
        ExprKind::RecordElementSelect { .. } => "record element selection",
        ExprKind::SubVector { .. } => "sub-vector expression",
        ExprKind::SubMatrix { .. } => "sub-matrix expression",
        ExprKind::StructureInit(_) => "structure initializer",
        ExprKind::RecordInit { .. } => "record initializer",
    }
}
