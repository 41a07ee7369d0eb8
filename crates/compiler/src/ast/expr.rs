use std::sync::Arc;

use codemap::{Span, Spanned};

use crate::{
    common::{BinaryOp, Identifier, ListSeparator, UnaryOp},
    value::Value,
};

use super::ArgumentInvocation;

#[derive(Debug, Clone)]
pub struct ListExpr {
    pub elems: Vec<AstExpr>,
    pub separator: ListSeparator,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionCallExpr {
    /// Normalized for lookup
    pub name: Identifier,
    /// As written, for passing an unknown call through as CSS
    pub original_name: String,
    pub arguments: Arc<ArgumentInvocation>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BinaryOpExpr {
    pub lhs: AstExpr,
    pub op: BinaryOp,
    pub rhs: AstExpr,
    pub span: Span,
}

/// A parsed expression
///
/// Nodes are immutable once built and shared through [`Arc`], so one parse
/// can be evaluated any number of times against different namespaces.
#[derive(Debug, Clone)]
pub enum AstExpr {
    Literal(Spanned<Value>),
    Variable(Spanned<Identifier>),
    UnaryOp(UnaryOp, Arc<Self>, Span),
    BinaryOp(Arc<BinaryOpExpr>),
    /// `or`, which evaluates every operand
    Any(Vec<Self>, Span),
    /// `and`, which evaluates every operand
    All(Vec<Self>, Span),
    Not(Arc<Self>, Span),
    Paren(Arc<Self>, Span),
    FunctionCall(FunctionCallExpr),
    List(ListExpr),
}

impl AstExpr {
    pub fn span(&self) -> Span {
        match self {
            AstExpr::Literal(Spanned { span, .. }) | AstExpr::Variable(Spanned { span, .. }) => {
                *span
            }
            AstExpr::UnaryOp(.., span)
            | AstExpr::Any(.., span)
            | AstExpr::All(.., span)
            | AstExpr::Not(.., span)
            | AstExpr::Paren(.., span) => *span,
            AstExpr::BinaryOp(op) => op.span,
            AstExpr::FunctionCall(call) => call.span,
            AstExpr::List(list) => list.span,
        }
    }

    pub(crate) fn is_literal(&self) -> bool {
        matches!(self, AstExpr::Literal(..))
    }

    /// Wrap several space or comma separated expressions in a list, or return
    /// the only one as is
    pub(crate) fn list_or_single(mut elems: Vec<Self>, separator: ListSeparator) -> Self {
        if elems.len() == 1 {
            return elems.remove(0);
        }

        let span = match (elems.first(), elems.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => unreachable!("lists are parsed with at least one element"),
        };

        AstExpr::List(ListExpr {
            elems,
            separator,
            span,
        })
    }
}
