//! Boolean, comparison, arithmetic and string operators.

use crate::ast::node::{adopt, compile_fragment, AsAstNode, AstNode, DynNode, NodeCore};
use crate::environment::CompileEnv;
use crate::errors::CompileError;
use crate::expressions::Expr;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
enum BinaryOperator {
    And,
    Or,
    Xor,
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    ModuloDivision,
    Exponentiation,
    In,
    StartsWith,
    EndsWith,
    Contains,
    RegexMatch,
}

impl BinaryOperator {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Xor => "XOR",
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "<>",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanEqual => ">=",
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "*",
            BinaryOperator::Division => "/",
            BinaryOperator::ModuloDivision => "%",
            BinaryOperator::Exponentiation => "^",
            BinaryOperator::In => "IN",
            BinaryOperator::StartsWith => "STARTS WITH",
            BinaryOperator::EndsWith => "ENDS WITH",
            BinaryOperator::Contains => "CONTAINS",
            BinaryOperator::RegexMatch => "=~",
        }
    }
}

struct BinaryOpNode {
    core: NodeCore,
    operator: BinaryOperator,
    left: DynNode,
    right: DynNode,
}

impl AstNode for BinaryOpNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let left = compile_fragment(&self.left, env)?;
        let right = compile_fragment(&self.right, env)?;
        Ok(format!("({} {} {})", left, self.operator.symbol(), right))
    }
}

fn binary(operator: BinaryOperator, left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    let left = left.into().as_dyn_node();
    let right = right.into().as_dyn_node();
    let node = Rc::new(BinaryOpNode {
        core: NodeCore::default(),
        operator,
        left: Rc::clone(&left),
        right: Rc::clone(&right),
    });
    let parent: DynNode = node;
    adopt(&parent, &left);
    adopt(&parent, &right);
    Expr::from_node(parent)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum UnaryOperator {
    Not,
    IsNull,
    IsNotNull,
}

struct UnaryOpNode {
    core: NodeCore,
    operator: UnaryOperator,
    operand: DynNode,
}

impl AstNode for UnaryOpNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn compile(&self, env: &mut CompileEnv) -> Result<String, CompileError> {
        let operand = compile_fragment(&self.operand, env)?;
        Ok(match self.operator {
            UnaryOperator::Not => format!("NOT ({})", operand),
            UnaryOperator::IsNull => format!("({} IS NULL)", operand),
            UnaryOperator::IsNotNull => format!("({} IS NOT NULL)", operand),
        })
    }
}

fn unary(operator: UnaryOperator, operand: impl Into<Expr>) -> Expr {
    let operand = operand.into().as_dyn_node();
    let node = Rc::new(UnaryOpNode {
        core: NodeCore::default(),
        operator,
        operand: Rc::clone(&operand),
    });
    let parent: DynNode = node;
    adopt(&parent, &operand);
    Expr::from_node(parent)
}

macro_rules! binary_fns {
    ($($(#[$doc:meta])* $name:ident => $op:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
                binary(BinaryOperator::$op, left, right)
            }
        )*
    };
}

binary_fns!(
    and => And,
    or => Or,
    xor => Xor,
    eq => Equal,
    neq => NotEqual,
    lt => LessThan,
    lte => LessThanEqual,
    gt => GreaterThan,
    gte => GreaterThanEqual,
    plus => Addition,
    minus => Subtraction,
    times => Multiplication,
    divide => Division,
    modulo => ModuloDivision,
    pow => Exponentiation,
    /// List membership, `x IN list`.
    in_list => In,
    starts_with => StartsWith,
    ends_with => EndsWith,
    contains => Contains,
    /// Regular-expression match, `x =~ pattern`.
    regex_matches => RegexMatch,
);

pub fn not(operand: impl Into<Expr>) -> Expr {
    unary(UnaryOperator::Not, operand)
}

pub fn is_null(operand: impl Into<Expr>) -> Expr {
    unary(UnaryOperator::IsNull, operand)
}

pub fn is_not_null(operand: impl Into<Expr>) -> Expr {
    unary(UnaryOperator::IsNotNull, operand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::BuildConfig;
    use crate::expressions::lit;
    use crate::references::Variable;

    fn compile(expr: &Expr) -> String {
        let mut env = CompileEnv::new(&BuildConfig::default());
        expr.as_dyn_node().compile(&mut env).unwrap()
    }

    #[test]
    fn test_binary_operations_parenthesize() {
        let x = Variable::named("x");
        assert_eq!(compile(&eq(&x, lit(1))), "(x = 1)");
        assert_eq!(compile(&and(eq(&x, lit(1)), gt(&x, lit(0)))), "((x = 1) AND (x > 0))");
    }

    #[test]
    fn test_string_predicates_use_keywords() {
        let x = Variable::named("x");
        assert_eq!(compile(&starts_with(&x, lit("a"))), "(x STARTS WITH \"a\")");
        assert_eq!(compile(&regex_matches(&x, lit(".*"))), "(x =~ \".*\")");
    }

    #[test]
    fn test_unary_operations() {
        let x = Variable::named("x");
        assert_eq!(compile(&not(eq(&x, lit(1)))), "NOT ((x = 1))");
        assert_eq!(compile(&is_null(&x)), "(x IS NULL)");
        assert_eq!(compile(&is_not_null(&x)), "(x IS NOT NULL)");
    }
}
