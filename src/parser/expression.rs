//! Expression Grammar Checker
//!
//! Recursive-descent recognizer for template expressions. Tokens are read
//! inline; nothing is built, the checker only reports whether the input is
//! well formed.
//!
//! ```text
//! or-expr    := and-expr ('||' and-expr)*
//! and-expr   := cmp-expr ('&&' cmp-expr)*
//! cmp-expr   := add-expr (('=='|'!='|'<='|'>='|'<'|'>') add-expr)*
//! add-expr   := mul-expr (('+'|'-') mul-expr)*
//! mul-expr   := unary (('*'|'/'|'%') unary)*
//! unary      := '!' unary | postfix
//! postfix    := primary ( '(' args ')' | '[' or-expr ']' | '.' identifier )*
//! primary    := string | number | '(' or-expr ')' | identifier
//! args       := [ or-expr (',' or-expr)* ]
//! ```

use std::fmt;

/// Deepest nesting of parentheses, calls, indices, and `!` accepted.
pub const MAX_NESTING_DEPTH: usize = 256;

const COMPARISON_OPERATORS: &[&str] = &["==", "!=", "<=", ">=", "<", ">"];
const ADDITIVE_OPERATORS: &[&str] = &["+", "-"];
const MULTIPLICATIVE_OPERATORS: &[&str] = &["*", "/", "%"];

/// Why an expression is not well formed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionError {
    pub message: String,
    /// Character offset within the checked expression where parsing stopped
    pub offset: usize,
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.offset)
    }
}

impl std::error::Error for ExpressionError {}

type CheckResult = Result<(), ExpressionError>;

/// Check that `expression` is well formed.
///
/// Blank expressions are accepted. Unknown identifiers and functions are not
/// errors; only structure is checked.
pub fn check_expression(expression: &str) -> CheckResult {
    ExpressionChecker::new(expression).check()
}

/// Single-use recognizer over one expression
#[derive(Debug)]
pub struct ExpressionChecker<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> ExpressionChecker<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    pub fn check(mut self) -> CheckResult {
        if self.input.trim().is_empty() {
            return Ok(());
        }

        self.or_expr()?;

        self.skip_whitespace();
        match self.peek() {
            None => Ok(()),
            Some(ch) => Err(self.error(format!("Unexpected character '{}'", ch))),
        }
    }

    fn or_expr(&mut self) -> CheckResult {
        self.enter()?;
        self.and_expr()?;
        while self.match_operator("||") {
            self.and_expr()?;
        }
        self.depth -= 1;
        Ok(())
    }

    fn and_expr(&mut self) -> CheckResult {
        self.comparison_expr()?;
        while self.match_operator("&&") {
            self.comparison_expr()?;
        }
        Ok(())
    }

    fn comparison_expr(&mut self) -> CheckResult {
        self.additive_expr()?;
        while self.match_any_operator(COMPARISON_OPERATORS) {
            self.additive_expr()?;
        }
        Ok(())
    }

    fn additive_expr(&mut self) -> CheckResult {
        self.multiplicative_expr()?;
        while self.match_any_operator(ADDITIVE_OPERATORS) {
            self.multiplicative_expr()?;
        }
        Ok(())
    }

    fn multiplicative_expr(&mut self) -> CheckResult {
        self.unary_expr()?;
        while self.match_any_operator(MULTIPLICATIVE_OPERATORS) {
            self.unary_expr()?;
        }
        Ok(())
    }

    fn unary_expr(&mut self) -> CheckResult {
        if self.match_operator("!") {
            self.enter()?;
            self.unary_expr()?;
            self.depth -= 1;
            Ok(())
        } else {
            self.postfix_expr()
        }
    }

    fn postfix_expr(&mut self) -> CheckResult {
        self.primary_expr()?;

        loop {
            if self.match_char('(') {
                self.arguments()?;
                self.expect(')')?;
            } else if self.match_char('[') {
                self.or_expr()?;
                self.expect(']')?;
            } else if self.match_char('.') {
                self.identifier()?;
            } else {
                return Ok(());
            }
        }
    }

    fn primary_expr(&mut self) -> CheckResult {
        self.skip_whitespace();

        match self.peek() {
            None => Err(self.error("Unexpected end of expression")),
            Some('"') => self.string_literal(),
            Some(ch) if ch.is_ascii_digit() => {
                self.number_literal();
                Ok(())
            }
            Some('(') => {
                self.bump('(');
                self.or_expr()?;
                self.expect(')')
            }
            Some(_) => self.identifier(),
        }
    }

    fn identifier(&mut self) -> CheckResult {
        self.skip_whitespace();

        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !is_identifier_char(ch) {
                break;
            }
            self.bump(ch);
        }

        if self.pos == start {
            return Err(self.error("Expected identifier"));
        }
        Ok(())
    }

    fn arguments(&mut self) -> CheckResult {
        self.skip_whitespace();

        if matches!(self.peek(), Some(ch) if ch != ')') {
            self.or_expr()?;
            while self.match_char(',') {
                self.or_expr()?;
            }
        }
        Ok(())
    }

    /// `"..."` with backslash escapes; escapes are skipped, not interpreted
    fn string_literal(&mut self) -> CheckResult {
        let start = self.pos;
        self.bump('"');

        let mut chars = self.input[self.pos..].char_indices();
        while let Some((idx, ch)) = chars.next() {
            match ch {
                '"' => {
                    self.pos += idx + 1;
                    return Ok(());
                }
                '\\' => {
                    chars.next();
                }
                _ => {}
            }
        }

        self.pos = start;
        Err(self.error("Unterminated string literal"))
    }

    /// Digits and dots; `1.2.3` is accepted as written
    fn number_literal(&mut self) {
        while let Some(ch) = self.peek() {
            if !(ch.is_ascii_digit() || ch == '.') {
                break;
            }
            self.bump(ch);
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.bump(expected);
            true
        } else {
            false
        }
    }

    fn match_operator(&mut self, op: &str) -> bool {
        self.skip_whitespace();
        if self.input[self.pos..].starts_with(op) {
            self.pos += op.len();
            true
        } else {
            false
        }
    }

    /// `ops` must list longer operators before their prefixes
    fn match_any_operator(&mut self, ops: &[&str]) -> bool {
        ops.iter().any(|op| self.match_operator(op))
    }

    fn expect(&mut self, expected: char) -> CheckResult {
        if self.match_char(expected) {
            Ok(())
        } else {
            Err(self.error(format!("Expected '{}'", expected)))
        }
    }

    fn enter(&mut self) -> CheckResult {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!(
                "Expression nesting exceeds maximum depth of {}",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump(ch);
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    fn error(&self, message: impl Into<String>) -> ExpressionError {
        ExpressionError {
            message: message.into(),
            offset: self.input[..self.pos].chars().count(),
        }
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
