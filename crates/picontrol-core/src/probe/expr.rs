//! Post-processing arithmetic (panic-free, no code execution).
//!
//! Grammar, and nothing else:
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := '-' unary | atom
//! atom  := number | '$' digits | '(' expr ')'
//! ```
//! `$n` refers to capture group `n` of the probe pattern. Captured text is
//! only ever parsed as a number, never spliced into the expression source.

use crate::error::{PiControlError, Result};
use crate::protocol::MetricValue;

/// Nesting limit for parentheses and unary minus.
const MAX_DEPTH: usize = 32;

/// Integers stay integers under `+ - *`; `/` always produces a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Parse captured text (surrounding whitespace ignored).
    pub fn parse(text: &str) -> Result<Self> {
        let t = text.trim();
        if let Ok(i) = t.parse::<i64>() {
            return Ok(Number::Int(i));
        }
        match t.parse::<f64>() {
            Ok(f) if f.is_finite() && t.bytes().any(|b| b.is_ascii_digit()) => Ok(Number::Float(f)),
            _ => Err(PiControlError::BadExpression(format!(
                "operand is not numeric: {t:?}"
            ))),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn neg(self) -> Number {
        match self {
            Number::Int(i) => i.checked_neg().map_or(Number::Float(-(i as f64)), Number::Int),
            Number::Float(f) => Number::Float(-f),
        }
    }

    fn apply(self, op: Op, rhs: Number) -> Result<Number> {
        let out = match (op, self, rhs) {
            (Op::Add, Number::Int(a), Number::Int(b)) => a.checked_add(b).map(Number::Int),
            (Op::Sub, Number::Int(a), Number::Int(b)) => a.checked_sub(b).map(Number::Int),
            (Op::Mul, Number::Int(a), Number::Int(b)) => a.checked_mul(b).map(Number::Int),
            _ => None,
        };
        if let Some(n) = out {
            return Ok(n);
        }

        let (a, b) = (self.as_f64(), rhs.as_f64());
        let f = match op {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => {
                if b == 0.0 {
                    return Err(PiControlError::BadExpression("division by zero".into()));
                }
                a / b
            }
        };
        if !f.is_finite() {
            return Err(PiControlError::BadExpression("result is not finite".into()));
        }
        Ok(Number::Float(f))
    }
}

impl From<Number> for MetricValue {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => MetricValue::Int(i),
            Number::Float(f) => MetricValue::Float(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

/// Parsed post-processing expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Lit(Number),
    /// `$n`, 1-based.
    Capture(usize),
    Neg(Box<Expr>),
    Bin(Box<Expr>, Op, Box<Expr>),
}

impl Expr {
    pub fn parse(src: &str) -> Result<Self> {
        let tokens = tokenize(src)?;
        let mut p = Parser {
            tokens: &tokens,
            pos: 0,
            depth: 0,
        };
        let expr = p.expr()?;
        if p.pos != tokens.len() {
            return Err(PiControlError::BadExpression(format!(
                "trailing input in {src:?}"
            )));
        }
        Ok(expr)
    }

    /// Highest `$n` referenced (0 when none).
    pub fn max_capture(&self) -> usize {
        match self {
            Expr::Lit(_) => 0,
            Expr::Capture(n) => *n,
            Expr::Neg(e) => e.max_capture(),
            Expr::Bin(l, _, r) => l.max_capture().max(r.max_capture()),
        }
    }

    /// Evaluate with `captures[0]` bound to `$1`.
    pub fn eval(&self, captures: &[Option<&str>]) -> Result<Number> {
        match self {
            Expr::Lit(n) => Ok(*n),
            Expr::Capture(n) => {
                let text = captures
                    .get(n - 1)
                    .copied()
                    .flatten()
                    .ok_or_else(|| {
                        PiControlError::BadExpression(format!("capture ${n} is not available"))
                    })?;
                Number::parse(text)
            }
            Expr::Neg(e) => Ok(e.eval(captures)?.neg()),
            Expr::Bin(l, op, r) => l.eval(captures)?.apply(*op, r.eval(captures)?),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(Number),
    Capture(usize),
    Op(Op),
    LParen,
    RParen,
}

fn tokenize(src: &str) -> Result<Vec<Token>> {
    let bytes = src.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b' ' | b'\t' => i += 1,
            b'+' => {
                out.push(Token::Op(Op::Add));
                i += 1;
            }
            b'-' => {
                out.push(Token::Op(Op::Sub));
                i += 1;
            }
            b'*' => {
                out.push(Token::Op(Op::Mul));
                i += 1;
            }
            b'/' => {
                out.push(Token::Op(Op::Div));
                i += 1;
            }
            b'(' => {
                out.push(Token::LParen);
                i += 1;
            }
            b')' => {
                out.push(Token::RParen);
                i += 1;
            }
            b'$' => {
                let start = i + 1;
                let end = scan(bytes, start, |b| b.is_ascii_digit());
                let n: usize = src[start..end].parse().map_err(|_| {
                    PiControlError::BadExpression(format!("expected capture index at {i} in {src:?}"))
                })?;
                if n == 0 {
                    return Err(PiControlError::BadExpression("captures start at $1".into()));
                }
                out.push(Token::Capture(n));
                i = end;
            }
            b'0'..=b'9' | b'.' => {
                let end = scan(bytes, i, |b| b.is_ascii_digit() || b == b'.');
                out.push(Token::Num(Number::parse(&src[i..end])?));
                i = end;
            }
            _ => {
                return Err(PiControlError::BadExpression(format!(
                    "unexpected {:?} at {i} in {src:?}",
                    c as char
                )))
            }
        }
    }
    Ok(out)
}

fn scan(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| !pred(b))
        .map_or(bytes.len(), |off| from + off)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let t = self.peek();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(PiControlError::BadExpression("expression nested too deeply".into()));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr> {
        let mut lhs = self.term()?;
        while let Some(Token::Op(op @ (Op::Add | Op::Sub))) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Bin(Box::new(lhs), op, Box::new(rhs));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut lhs = self.unary()?;
        while let Some(Token::Op(op @ (Op::Mul | Op::Div))) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Bin(Box::new(lhs), op, Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr> {
        if let Some(Token::Op(Op::Sub)) = self.peek() {
            self.pos += 1;
            self.enter()?;
            let inner = self.unary()?;
            self.depth -= 1;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Expr> {
        match self.bump() {
            Some(Token::Num(n)) => Ok(Expr::Lit(n)),
            Some(Token::Capture(n)) => Ok(Expr::Capture(n)),
            Some(Token::LParen) => {
                self.enter()?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.bump() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(PiControlError::BadExpression("missing ')'".into())),
                }
            }
            Some(t) => Err(PiControlError::BadExpression(format!("unexpected token {t:?}"))),
            None => Err(PiControlError::BadExpression("unexpected end of expression".into())),
        }
    }
}
