use crate::expr::{Expression, FunctionExpr, Utf8Expr};

/// Methods that work on columns of strings.
///
/// Pattern and substring arguments accept either a literal (`"abc"`) or
/// another expression, so they can vary per row.
pub struct ExpressionStringNamespace {
    expr: Expression,
}

impl ExpressionStringNamespace {
    pub fn from_expression(expr: &Expression) -> Self {
        Self { expr: expr.clone() }
    }

    fn utf8(&self, func: Utf8Expr, others: Vec<Expression>) -> Expression {
        self.expr.function(FunctionExpr::Utf8(func), others)
    }

    /// Whether each string contains `substr`.
    pub fn contains(&self, substr: impl Into<Expression>) -> Expression {
        self.utf8(Utf8Expr::Contains, vec![substr.into()])
    }

    /// Whether each string matches the regular expression `pattern`.
    pub fn match_(&self, pattern: impl Into<Expression>) -> Expression {
        self.utf8(Utf8Expr::Match, vec![pattern.into()])
    }

    pub fn endswith(&self, suffix: impl Into<Expression>) -> Expression {
        self.utf8(Utf8Expr::EndsWith, vec![suffix.into()])
    }

    pub fn startswith(&self, prefix: impl Into<Expression>) -> Expression {
        self.utf8(Utf8Expr::StartsWith, vec![prefix.into()])
    }

    /// Split on `pattern` into a list of strings; `regex` treats the pattern as a regular expression.
    pub fn split(&self, pattern: impl Into<Expression>, regex: bool) -> Expression {
        self.utf8(Utf8Expr::Split { regex }, vec![pattern.into()])
    }

    /// Same as `self + other`.
    pub fn concat(&self, other: impl Into<Expression>) -> Expression {
        &self.expr + other.into()
    }

    /// First match of `pattern`. `index` 0 is the whole match, otherwise a
    /// capture group; missing matches and groups become nulls.
    pub fn extract(&self, pattern: impl Into<Expression>, index: usize) -> Expression {
        self.utf8(Utf8Expr::Extract { index }, vec![pattern.into()])
    }

    /// All matches of `pattern` as a list; no match gives an empty list.
    pub fn extract_all(&self, pattern: impl Into<Expression>, index: usize) -> Expression {
        self.utf8(Utf8Expr::ExtractAll { index }, vec![pattern.into()])
    }

    pub fn replace(&self, pattern: impl Into<Expression>, replacement: impl Into<Expression>, regex: bool) -> Expression {
        self.utf8(Utf8Expr::Replace { regex }, vec![pattern.into(), replacement.into()])
    }

    pub fn length(&self) -> Expression {
        self.utf8(Utf8Expr::Length, vec![])
    }

    pub fn lower(&self) -> Expression {
        self.utf8(Utf8Expr::Lower, vec![])
    }

    pub fn upper(&self) -> Expression {
        self.utf8(Utf8Expr::Upper, vec![])
    }

    pub fn lstrip(&self) -> Expression {
        self.utf8(Utf8Expr::Lstrip, vec![])
    }

    pub fn rstrip(&self) -> Expression {
        self.utf8(Utf8Expr::Rstrip, vec![])
    }

    pub fn reverse(&self) -> Expression {
        self.utf8(Utf8Expr::Reverse, vec![])
    }

    pub fn capitalize(&self) -> Expression {
        self.utf8(Utf8Expr::Capitalize, vec![])
    }

    /// The first `nchars` characters.
    pub fn left(&self, nchars: impl Into<Expression>) -> Expression {
        self.utf8(Utf8Expr::Left, vec![nchars.into()])
    }

    /// The last `nchars` characters.
    pub fn right(&self, nchars: impl Into<Expression>) -> Expression {
        self.utf8(Utf8Expr::Right, vec![nchars.into()])
    }

    /// 0-based index of the first occurrence of `substr`, or -1.
    pub fn find(&self, substr: impl Into<Expression>) -> Expression {
        self.utf8(Utf8Expr::Find, vec![substr.into()])
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::{col, lit, Expr, FunctionExpr, Operator, Utf8Expr};

    #[test]
    fn methods_pass_self_as_first_input() {
        let expr = col("s").str().replace("a", col("r"), true);
        match expr.expr() {
            Expr::Function { func, inputs } => {
                assert_eq!(*func, FunctionExpr::Utf8(Utf8Expr::Replace { regex: true }));
                assert_eq!(inputs.len(), 3);
                assert_eq!(*inputs[0], Expr::Column("s".into()));
                assert_eq!(*inputs[1], *lit("a").expr());
                assert_eq!(*inputs[2], Expr::Column("r".into()));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(expr.name(), "s");
    }

    #[test]
    fn concat_is_plus() {
        let expr = col("s").str().concat("!");
        assert!(matches!(expr.expr(), Expr::BinaryOp { op: Operator::Plus, .. }));
        assert_eq!(expr, col("s") + "!");
    }

    #[test]
    fn left_accepts_integer_literal() {
        let expr = col("s").str().left(3);
        assert_eq!(expr.to_string(), "utf8_left(col(s), lit(3))");
    }
}
