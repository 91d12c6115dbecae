//! Text to `Value`, by recursive descent over a character cursor.
//!
//! The reader never fails. Malformed input degrades: an unterminated string
//! closes at end of input, an unmatched `(` consumes to end of input and
//! yields the list as if it had been closed there, and any text the grammar
//! does not recognize as a more specific form falls through to symbol
//! parsing. There is no dotted-pair input syntax even though the printer
//! emits one; `.` between elements reads as an ordinary symbol.

use crate::language::{Value, cons, number, string, symbol};

/// Read one s-expression from the front of `input`. Empty or
/// whitespace-only input reads as nil. Trailing text is ignored.
pub fn read(input: &str) -> Value {
    Reader::new(input).read_sexpr()
}

struct Reader {
    input: Vec<char>,
    position: usize,
}

impl Reader {
    fn new(input: &str) -> Self {
        Reader {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> char {
        if self.position < self.input.len() {
            self.input[self.position]
        } else {
            '\0'
        }
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn read_sexpr(&mut self) -> Value {
        self.skip_whitespace();

        if self.is_eof() {
            return Value::Nil;
        }

        match self.current_char() {
            '\'' => self.read_quoted(),
            '(' => self.read_list(),
            '"' => self.read_string(),
            ch if ch.is_ascii_digit() || ch == '-' || ch == '+' => self.read_number(),
            _ => self.read_symbol(),
        }
    }

    /// `'X` desugars eagerly into `(quote X)`.
    fn read_quoted(&mut self) -> Value {
        self.advance();
        let quoted = self.read_sexpr();
        cons(symbol("quote"), cons(quoted, Value::Nil))
    }

    fn read_list(&mut self) -> Value {
        self.advance();
        self.skip_whitespace();

        let mut elements = Vec::new();
        while !self.is_eof() && self.current_char() != ')' {
            elements.push(self.read_sexpr());
            self.skip_whitespace();
        }

        if self.current_char() == ')' {
            self.advance();
        }

        elements
            .into_iter()
            .rev()
            .fold(Value::Nil, |acc, val| cons(val, acc))
    }

    fn read_string(&mut self) -> Value {
        self.advance();

        let mut text = String::new();
        while !self.is_eof() && self.current_char() != '"' {
            text.push(self.current_char());
            self.advance();
        }

        // An unterminated string closes silently at end of input.
        if self.current_char() == '"' {
            self.advance();
        }

        string(text)
    }

    /// Prefix-greedy decimal scan: `[+-]? digits [. digits] [eE [+-] digits]`.
    ///
    /// The scan is unguarded. Whatever prefix matches the grammar becomes
    /// the number and the remainder re-enters parsing at the next
    /// whitespace/delimiter boundary, so `1a` reads as the number 1
    /// followed by the symbol `a`. A sign with no digit after it is not a
    /// number at all and falls through to symbol parsing, which is how
    /// `+` and `-` reach their builtin aliases.
    fn read_number(&mut self) -> Value {
        let start = self.position;
        let mut text = String::new();

        if self.current_char() == '+' || self.current_char() == '-' {
            text.push(self.current_char());
            self.advance();
        }

        let mut digits = 0;
        while self.current_char().is_ascii_digit() {
            digits += 1;
            text.push(self.current_char());
            self.advance();
        }

        if self.current_char() == '.' {
            text.push('.');
            self.advance();
            while self.current_char().is_ascii_digit() {
                digits += 1;
                text.push(self.current_char());
                self.advance();
            }
        }

        if digits == 0 {
            self.position = start;
            return self.read_symbol();
        }

        // The exponent only counts when at least one digit follows it;
        // otherwise `1e` is the number 1 followed by the symbol `e`.
        if self.current_char() == 'e' || self.current_char() == 'E' {
            let mark = self.position;
            let mut exponent = String::new();
            exponent.push(self.current_char());
            self.advance();

            if self.current_char() == '+' || self.current_char() == '-' {
                exponent.push(self.current_char());
                self.advance();
            }

            let mut exponent_digits = 0;
            while self.current_char().is_ascii_digit() {
                exponent_digits += 1;
                exponent.push(self.current_char());
                self.advance();
            }

            if exponent_digits > 0 {
                text.push_str(&exponent);
            } else {
                self.position = mark;
            }
        }

        number(text.parse().unwrap_or(0.0))
    }

    fn read_symbol(&mut self) -> Value {
        let mut name = String::new();
        while !self.is_eof() {
            let ch = self.current_char();
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '\'' {
                break;
            }
            name.push(ch);
            self.advance();
        }
        symbol(&name)
    }
}
