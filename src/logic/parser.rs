//! Boolean expression parser.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! iff     := implies ("<->" implies)*
//! implies := or ("->" implies)?
//! or      := and ("+" and)*
//! and     := unary (("*")? unary)*
//! unary   := ("!" | "~") unary | postfix
//! postfix := primary "'"*
//! primary := VAR | "0" | "1" | "(" iff ")"
//! ```
//!
//! `VAR` is a single uppercase ASCII letter. Implication and biconditional are
//! rewritten into AND/OR/NOT while parsing, so the resulting tree only holds
//! those three operators.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::ExpressionError;

/// A parsed Boolean expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Var(char),
    Const(bool),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn not(inner: Expr) -> Expr {
        Expr::Not(Box::new(inner))
    }

    fn and(lhs: Expr, rhs: Expr) -> Expr {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    fn or(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Evaluates the expression, asking `value_of` for each variable.
    pub fn evaluate_with<F: Fn(char) -> bool>(&self, value_of: &F) -> bool {
        match self {
            Expr::Var(name) => value_of(*name),
            Expr::Const(value) => *value,
            Expr::Not(inner) => !inner.evaluate_with(value_of),
            Expr::And(lhs, rhs) => lhs.evaluate_with(value_of) && rhs.evaluate_with(value_of),
            Expr::Or(lhs, rhs) => lhs.evaluate_with(value_of) || rhs.evaluate_with(value_of),
        }
    }

    /// Evaluates the expression under `assignment`. Unassigned variables are false.
    pub fn evaluate(&self, assignment: &HashMap<char, bool>) -> bool {
        self.evaluate_with(&|name| assignment.get(&name).copied().unwrap_or(false))
    }

    /// Distinct variable names, sorted.
    pub fn variables(&self) -> Vec<char> {
        fn collect(expr: &Expr, out: &mut BTreeSet<char>) {
            match expr {
                Expr::Var(name) => {
                    out.insert(*name);
                }
                Expr::Const(_) => {}
                Expr::Not(inner) => collect(inner, out),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                    collect(lhs, out);
                    collect(rhs, out);
                }
            }
        }
        let mut names = BTreeSet::new();
        collect(self, &mut names);
        names.into_iter().collect()
    }
}

impl FromStr for Expr {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expression(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Var(char),
    Const(bool),
    Or,
    And,
    Not,
    Prime,
    Implies,
    Iff,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Var(name) => write!(f, "{}", name),
            Token::Const(true) => f.write_str("1"),
            Token::Const(false) => f.write_str("0"),
            Token::Or => f.write_str("+"),
            Token::And => f.write_str("*"),
            Token::Not => f.write_str("!"),
            Token::Prime => f.write_str("'"),
            Token::Implies => f.write_str("->"),
            Token::Iff => f.write_str("<->"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Spanned {
    token: Token,
    position: usize,
}

/// Splits `input` into tokens. Positions are character offsets.
fn tokenize(input: &str) -> Result<Vec<Spanned>, ExpressionError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let position = i;
        let token = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            'A'..='Z' => Token::Var(ch),
            '0' => Token::Const(false),
            '1' => Token::Const(true),
            '+' => Token::Or,
            '*' => Token::And,
            '!' | '~' => Token::Not,
            '\'' => Token::Prime,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '-' if chars.get(i + 1) == Some(&'>') => {
                i += 1;
                Token::Implies
            }
            '<' if chars.get(i + 1) == Some(&'-') && chars.get(i + 2) == Some(&'>') => {
                i += 2;
                Token::Iff
            }
            _ => return Err(ExpressionError::UnexpectedCharacter { ch, position }),
        };
        tokens.push(Spanned { token, position });
        i += 1;
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Spanned> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|spanned| spanned.token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let next = self.peek();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn parse_iff(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.parse_implies()?;
        while self.peek_token() == Some(Token::Iff) {
            self.advance();
            let rhs = self.parse_implies()?;
            // (a * b) + (a' * b')
            lhs = Expr::or(
                Expr::and(lhs.clone(), rhs.clone()),
                Expr::and(Expr::not(lhs), Expr::not(rhs)),
            );
        }
        Ok(lhs)
    }

    fn parse_implies(&mut self) -> Result<Expr, ExpressionError> {
        let lhs = self.parse_or()?;
        if self.peek_token() == Some(Token::Implies) {
            self.advance();
            let rhs = self.parse_implies()?;
            return Ok(Expr::or(Expr::not(lhs), rhs));
        }
        Ok(lhs)
    }

    fn parse_or(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.parse_and()?;
        while self.peek_token() == Some(Token::Or) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::or(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.parse_unary()?;
        loop {
            match self.peek_token() {
                Some(Token::And) => {
                    self.advance();
                }
                // juxtaposition
                Some(Token::Var(_)) | Some(Token::Const(_)) | Some(Token::LParen) | Some(Token::Not) => {}
                _ => break,
            }
            let rhs = self.parse_unary()?;
            lhs = Expr::and(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExpressionError> {
        if self.peek_token() == Some(Token::Not) {
            self.advance();
            return Ok(Expr::not(self.parse_unary()?));
        }
        let mut expr = self.parse_primary()?;
        while self.peek_token() == Some(Token::Prime) {
            self.advance();
            expr = Expr::not(expr);
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ExpressionError> {
        let Some(Spanned { token, position }) = self.advance() else {
            return Err(ExpressionError::UnexpectedEnd);
        };
        match token {
            Token::Var(name) => Ok(Expr::Var(name)),
            Token::Const(value) => Ok(Expr::Const(value)),
            Token::LParen => {
                let inner = self.parse_iff()?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RParen, ..
                    }) => Ok(inner),
                    Some(other) => Err(ExpressionError::UnexpectedToken {
                        found: other.token.to_string(),
                        position: other.position,
                    }),
                    None => Err(ExpressionError::UnbalancedParentheses { position }),
                }
            }
            Token::RParen => Err(ExpressionError::UnbalancedParentheses { position }),
            other => Err(ExpressionError::UnexpectedToken {
                found: other.to_string(),
                position,
            }),
        }
    }
}

/// Parses an infix Boolean expression.
///
/// Operators: `+` OR, `*` or juxtaposition AND, postfix `'` and prefix
/// `!`/`~` NOT, `->` implication, `<->` biconditional, constants `0`/`1`.
///
/// # Examples
/// ```
/// use algotrace::logic::parse_expression;
///
/// let expr = parse_expression("AB' + C").unwrap();
/// assert_eq!(expr.variables(), vec!['A', 'B', 'C']);
/// assert!(expr.evaluate_with(&|v| v == 'A'));
/// ```
pub fn parse_expression(input: &str) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExpressionError::NoVariables);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_iff()?;
    match parser.peek() {
        None => Ok(expr),
        Some(Spanned {
            token: Token::RParen,
            position,
        }) => Err(ExpressionError::UnbalancedParentheses { position }),
        Some(Spanned { token, position }) => Err(ExpressionError::UnexpectedToken {
            found: token.to_string(),
            position,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str, truthy: &str) -> bool {
        parse_expression(input).unwrap().evaluate_with(&|v| truthy.contains(v))
    }

    #[test]
    fn test_basic_operators() {
        assert!(eval("A + B", "B"));
        assert!(!eval("A * B", "B"));
        assert!(eval("AB", "AB"));
        assert!(eval("A'", ""));
        assert!(eval("!A", ""));
        assert!(eval("~A", ""));
    }

    #[test]
    fn test_precedence() {
        // AND binds tighter than OR
        assert!(eval("A + B * C", "A"));
        assert!(!eval("(A + B) * C", "A"));
        // postfix NOT applies to the operand only
        assert!(eval("AB'", "A"));
        assert!(!eval("(AB)'", "AB"));
        assert!(eval("(A + B)'", ""));
    }

    #[test]
    fn test_implication_and_biconditional() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let truthy: String = [(a, 'A'), (b, 'B')].iter().filter(|(on, _)| *on).map(|(_, c)| *c).collect();
            assert_eq!(eval("A -> B", &truthy), !a || b);
            assert_eq!(eval("A <-> B", &truthy), a == b);
        }
        // right associative: A -> (B -> C)
        assert!(eval("A -> B -> C", "A"));
        // <-> binds loosest: (A + B) <-> C
        assert!(eval("A + B <-> C", "AC"));
        assert!(!eval("A + B <-> C", "A"));
    }

    #[test]
    fn test_constants() {
        assert!(eval("A + 1", ""));
        assert!(!eval("A * 0", "A"));
        assert_eq!(parse_expression("1").unwrap(), Expr::Const(true));
    }

    #[test]
    fn test_variables_sorted_and_distinct() {
        let expr = parse_expression("C + A*B + A'C").unwrap();
        assert_eq!(expr.variables(), vec!['A', 'B', 'C']);
    }

    #[test]
    fn test_evaluate_with_map() {
        let expr = parse_expression("A * B").unwrap();
        let assignment: HashMap<char, bool> = [('A', true), ('B', true)].into_iter().collect();
        assert!(expr.evaluate(&assignment));
        let partial: HashMap<char, bool> = [('A', true)].into_iter().collect();
        assert!(!expr.evaluate(&partial));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_expression("A & B"),
            Err(ExpressionError::UnexpectedCharacter { ch: '&', position: 2 })
        );
        assert_eq!(
            parse_expression("a + b"),
            Err(ExpressionError::UnexpectedCharacter { ch: 'a', position: 0 })
        );
        assert_eq!(
            parse_expression("(A + B"),
            Err(ExpressionError::UnbalancedParentheses { position: 0 })
        );
        assert_eq!(
            parse_expression("A + B)"),
            Err(ExpressionError::UnbalancedParentheses { position: 5 })
        );
        assert_eq!(parse_expression("A +"), Err(ExpressionError::UnexpectedEnd));
        assert_eq!(
            parse_expression("+A"),
            Err(ExpressionError::UnexpectedToken {
                found: "+".to_string(),
                position: 0
            })
        );
        assert_eq!(
            parse_expression("A - B"),
            Err(ExpressionError::UnexpectedCharacter { ch: '-', position: 2 })
        );
        assert_eq!(parse_expression("   "), Err(ExpressionError::NoVariables));
    }

    #[test]
    fn test_from_str() {
        let expr: Expr = "A'".parse().unwrap();
        assert_eq!(expr, Expr::Not(Box::new(Expr::Var('A'))));
    }
}
