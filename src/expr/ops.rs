use std::ops::{Add, BitAnd, BitOr, Div, Mul, Not, Rem, Sub};

use crate::expr::{Expr, Expression, Operator};

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<Expression>> $trait<T> for Expression {
            type Output = Expression;

            fn $method(self, rhs: T) -> Expression {
                self.binary($op, rhs)
            }
        }

        impl<T: Into<Expression>> $trait<T> for &Expression {
            type Output = Expression;

            fn $method(self, rhs: T) -> Expression {
                self.binary($op, rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, Operator::Plus);
impl_binary_op!(Sub, sub, Operator::Minus);
impl_binary_op!(Mul, mul, Operator::Multiply);
impl_binary_op!(Div, div, Operator::TrueDivide);
impl_binary_op!(Rem, rem, Operator::Modulus);
impl_binary_op!(BitAnd, bitand, Operator::And);
impl_binary_op!(BitOr, bitor, Operator::Or);

// `1 + col("x")` keeps the literal on the left, so the result is named "literal".
macro_rules! impl_reverse_ops {
    ($($t:ty),* $(,)?) => {
        $(
            impl Add<Expression> for $t {
                type Output = Expression;
                fn add(self, rhs: Expression) -> Expression {
                    rhs.rbinary(Operator::Plus, self)
                }
            }

            impl Sub<Expression> for $t {
                type Output = Expression;
                fn sub(self, rhs: Expression) -> Expression {
                    rhs.rbinary(Operator::Minus, self)
                }
            }

            impl Mul<Expression> for $t {
                type Output = Expression;
                fn mul(self, rhs: Expression) -> Expression {
                    rhs.rbinary(Operator::Multiply, self)
                }
            }

            impl Div<Expression> for $t {
                type Output = Expression;
                fn div(self, rhs: Expression) -> Expression {
                    rhs.rbinary(Operator::TrueDivide, self)
                }
            }

            impl Rem<Expression> for $t {
                type Output = Expression;
                fn rem(self, rhs: Expression) -> Expression {
                    rhs.rbinary(Operator::Modulus, self)
                }
            }
        )*
    };
}

impl_reverse_ops!(i32, i64, u32, u64, f32, f64);

impl Add<Expression> for &str {
    type Output = Expression;

    fn add(self, rhs: Expression) -> Expression {
        rhs.rbinary(Operator::Plus, self)
    }
}

impl BitAnd<Expression> for bool {
    type Output = Expression;

    fn bitand(self, rhs: Expression) -> Expression {
        rhs.rbinary(Operator::And, self)
    }
}

impl BitOr<Expression> for bool {
    type Output = Expression;

    fn bitor(self, rhs: Expression) -> Expression {
        rhs.rbinary(Operator::Or, self)
    }
}

/// Logical negation (`~expr`).
impl Not for Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        Expression::from_expr(Expr::Not(self.to_ref()))
    }
}

impl Not for &Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        Expression::from_expr(Expr::Not(self.to_ref()))
    }
}
