//! Document-level TOML parsing.

mod datetime;
mod numbers;
mod strings;

use std::fs;
use std::io::Read;
use std::path::Path;

use log::{debug, trace};
use winnow::{
    error::{ContextError, ErrMode},
    token::take_while,
    Parser as _,
};

use crate::error::{Error, ErrorKind, IoError, ParseError};
use crate::{Array, Datetime, Table, TableArray, Value};

/// Parse a TOML document.
pub fn parse(input: &str) -> Result<Table, Error> {
    Parser::new(input).parse_document()
}

/// Parse a TOML document from a reader.
///
/// The stream is consumed eagerly to its end. Read failures surface as
/// [`Error::Io`] and no partial tree escapes.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Table, Error> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| IoError::new("failed to read input stream", e))?;
    debug!("read {} bytes from input stream", text.len());
    parse(&text)
}

/// Parse the TOML file at `path`.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Table, Error> {
    let path = path.as_ref();
    debug!("parsing TOML file {}", path.display());
    let text = fs::read_to_string(path)
        .map_err(|e| IoError::new(format!("failed to read {}", path.display()), e))?;
    parse(&text)
}

/// Full-input datetime parse, for `Datetime::from_str`.
pub(crate) fn datetime_from_str(s: &str) -> Option<Datetime> {
    let mut rest = s;
    match datetime::date_time(&mut rest) {
        Ok(dt) if rest.is_empty() => Some(dt),
        _ => None,
    }
}

/// Nesting bound for arrays and inline tables. Pathological inputs like
/// `a=[[[[…` must fail fast instead of exhausting the stack.
const MAX_NESTING: usize = 128;

/// The document cursor: the unconsumed input plus the 1-based number of the
/// line currently being read.
struct Parser<'i> {
    rest: &'i str,
    line: usize,
    depth: usize,
}

impl<'i> Parser<'i> {
    fn new(input: &'i str) -> Self {
        Parser {
            rest: input,
            line: 1,
            depth: 0,
        }
    }

    fn error(&self, kind: ErrorKind) -> Error {
        Error::Parse(ParseError::new(kind, self.line))
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self, n: usize) {
        self.rest = &self.rest[n..];
    }

    /// Advances past spaces and tabs only.
    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start_matches([' ', '\t']);
    }

    fn skip_comment(&mut self) {
        if self.rest.starts_with('#') {
            let end = self.rest.find('\n').unwrap_or(self.rest.len());
            self.rest = &self.rest[end..];
        }
    }

    fn skip_newline(&mut self) -> bool {
        if self.rest.starts_with("\r\n") {
            self.bump(2);
            self.line += 1;
            true
        } else if self.rest.starts_with('\n') {
            self.bump(1);
            self.line += 1;
            true
        } else {
            false
        }
    }

    /// Skips whitespace, comments and blank lines between document items.
    fn skip_blank(&mut self) {
        loop {
            self.skip_ws();
            self.skip_comment();
            if !self.skip_newline() {
                break;
            }
        }
    }

    /// Asserts that the remainder of the line is empty or a comment, and
    /// consumes it including the newline.
    fn eol_or_comment(&mut self) -> Result<(), Error> {
        self.skip_ws();
        self.skip_comment();
        if self.rest.is_empty() || self.skip_newline() {
            Ok(())
        } else {
            Err(self.error(ErrorKind::TrailingGarbage))
        }
    }

    /// Runs a winnow token parser on the remaining input, mapping any
    /// failure to `kind` at the current line. Token parsers never cross
    /// newlines, so the line counter is untouched.
    fn eat<T, P>(&mut self, mut parser: P, kind: ErrorKind) -> Result<T, Error>
    where
        P: winnow::Parser<&'i str, T, ErrMode<ContextError>>,
    {
        let before = self.rest;
        match parser.parse_next(&mut self.rest) {
            Ok(value) => Ok(value),
            Err(_) => {
                self.rest = before;
                Err(self.error(kind))
            }
        }
    }

    fn parse_document(mut self) -> Result<Table, Error> {
        let mut root = Table::new();
        // The current table as an index path from the root, re-resolved for
        // every assignment; a path step landing on a table array resolves to
        // its last element.
        let mut cursor: Vec<String> = Vec::new();
        loop {
            self.skip_blank();
            if self.rest.is_empty() {
                break;
            }
            if self.peek() == Some('[') {
                cursor = self.parse_header(&mut root)?;
            } else {
                let (key, value) = self.parse_key_value()?;
                let table = resolve_cursor(&mut root, &cursor);
                if table.contains_key(&key) {
                    return Err(self.error(ErrorKind::KeyDuplicate));
                }
                table.insert(key, value);
                self.eol_or_comment()?;
            }
        }
        Ok(root)
    }

    /// Parses `[a.b.c]` or `[[a.b.c]]`, applies the definition rules to the
    /// tree and returns the new cursor path.
    fn parse_header(&mut self, root: &mut Table) -> Result<Vec<String>, Error> {
        self.bump(1);
        let is_array = self.rest.starts_with('[');
        if is_array {
            self.bump(1);
        }
        let mut parts = Vec::new();
        loop {
            self.skip_ws();
            parts.push(self.parse_header_key()?);
            self.skip_ws();
            match self.peek() {
                Some('.') => self.bump(1),
                Some(']') => {
                    self.bump(1);
                    break;
                }
                None => return Err(self.error(ErrorKind::UnexpectedEnd)),
                Some(_) => return Err(self.error(ErrorKind::TrailingGarbage)),
            }
        }
        if is_array {
            if self.rest.starts_with(']') {
                self.bump(1);
            } else if self.rest.is_empty() {
                return Err(self.error(ErrorKind::UnexpectedEnd));
            } else {
                return Err(self.error(ErrorKind::TrailingGarbage));
            }
        }
        trace!(
            "{} header [{}] at line {}",
            if is_array { "table array" } else { "table" },
            parts.join("."),
            self.line
        );
        let path = if is_array {
            self.define_table_array(root, parts)?
        } else {
            self.define_table(root, parts)?
        };
        self.eol_or_comment()?;
        Ok(path)
    }

    fn parse_header_key(&mut self) -> Result<String, Error> {
        if self.rest.starts_with('"') {
            let key = strings::basic(&mut self.rest).map_err(|k| self.error(k))?;
            if key.is_empty() {
                return Err(self.error(ErrorKind::EmptyTableName));
            }
            Ok(key)
        } else {
            self.bare_key(ErrorKind::EmptyTableName)
        }
    }

    /// A bare key: the maximal run of `[A-Za-z0-9_-]`, which must be
    /// non-empty.
    fn bare_key(&mut self, kind: ErrorKind) -> Result<String, Error> {
        self.eat(
            take_while(1.., |c: char| {
                c.is_ascii_alphanumeric() || c == '_' || c == '-'
            }),
            kind,
        )
        .map(str::to_string)
    }

    /// Walks one step of a header prefix: descends into a table, into the
    /// last element of a table array, or creates an empty table.
    fn descend<'t>(&self, table: &'t mut Table, key: &str) -> Result<&'t mut Table, Error> {
        if !table.contains_key(key) {
            table.insert(key, Table::new());
        }
        match table.get_mut(key).expect("entry exists or was just created") {
            Value::Table(t) => Ok(t),
            Value::TableArray(tables) => {
                Ok(tables.last_mut().expect("table arrays are never empty"))
            }
            _ => Err(self.error(ErrorKind::KeyConflict)),
        }
    }

    fn define_table(&self, root: &mut Table, parts: Vec<String>) -> Result<Vec<String>, Error> {
        let (last, prefix) = parts.split_last().expect("header has at least one part");
        let mut table: &mut Table = root;
        for part in prefix {
            table = self.descend(table, part)?;
        }
        match table.get(last) {
            None => table.insert(last.clone(), Table::new()),
            // An implicitly created table (only sub-tables, no direct
            // values) is adopted by the header that names it.
            Some(Value::Table(existing)) => {
                if existing.has_direct_values() {
                    return Err(self.error(ErrorKind::TableRedefined));
                }
            }
            Some(_) => return Err(self.error(ErrorKind::KeyConflict)),
        }
        Ok(parts)
    }

    fn define_table_array(
        &self,
        root: &mut Table,
        parts: Vec<String>,
    ) -> Result<Vec<String>, Error> {
        let (last, prefix) = parts.split_last().expect("header has at least one part");
        let mut table: &mut Table = root;
        for part in prefix {
            table = self.descend(table, part)?;
        }
        if !table.contains_key(last) {
            let mut tables = TableArray::new();
            tables.push(Table::new());
            table.insert(last.clone(), tables);
            return Ok(parts);
        }
        match table.get_mut(last).expect("presence checked above") {
            Value::TableArray(tables) => {
                tables.push(Table::new());
                Ok(parts)
            }
            _ => Err(self.error(ErrorKind::KeyConflict)),
        }
    }

    fn parse_key(&mut self) -> Result<String, Error> {
        if self.rest.starts_with('"') {
            let key = strings::basic(&mut self.rest).map_err(|k| self.error(k))?;
            if key.is_empty() {
                return Err(self.error(ErrorKind::EmptyKey));
            }
            Ok(key)
        } else {
            self.bare_key(ErrorKind::EmptyKey)
        }
    }

    fn parse_key_value(&mut self) -> Result<(String, Value), Error> {
        let key = self.parse_key()?;
        self.skip_ws();
        if !self.rest.starts_with('=') {
            return Err(self.error(if self.rest.is_empty() {
                ErrorKind::UnexpectedEnd
            } else {
                ErrorKind::ExpectedEquals
            }));
        }
        self.bump(1);
        self.skip_ws();
        let value = self.parse_value()?;
        Ok((key, value))
    }

    /// Parses a single value, dispatching on its first character.
    fn parse_value(&mut self) -> Result<Value, Error> {
        match self.peek() {
            None | Some('\n') | Some('\r') | Some('#') => Err(self.error(ErrorKind::UnexpectedEnd)),
            Some('"') | Some('\'') => strings::parse(&mut self.rest, &mut self.line)
                .map(Value::String)
                .map_err(|k| self.error(k)),
            Some('t') | Some('f') => self
                .eat(numbers::boolean, ErrorKind::MalformedBool)
                .map(Value::Boolean),
            Some('[') => self.parse_array(),
            Some('{') => self.parse_inline_table(),
            Some(c) if c.is_ascii_digit() || c == '+' || c == '-' => {
                self.parse_number_or_datetime()
            }
            Some(_) => Err(self.error(ErrorKind::ExpectedValue)),
        }
    }

    fn parse_number_or_datetime(&mut self) -> Result<Value, Error> {
        let probe = &self.rest[..datetime::date_token_end(self.rest)];
        if datetime::looks_like_datetime(probe) {
            return self
                .eat(datetime::date_time, ErrorKind::MalformedDate)
                .map(Value::Datetime);
        }
        let token = number_token(self.rest);
        let value = if token.contains(&['.', 'e', 'E'][..]) {
            Value::Float(self.eat(numbers::float, ErrorKind::MalformedNumber)?)
        } else {
            Value::Integer(self.eat(numbers::integer, ErrorKind::MalformedNumber)?)
        };
        // Numeric residue after the parsed part (`1.2.3`, `1_`) is a
        // malformed number; anything else is left for the line-end check.
        if self
            .peek()
            .is_some_and(|c| matches!(c, '0'..='9' | '.' | '_' | '+' | '-' | 'e' | 'E'))
        {
            return Err(self.error(ErrorKind::MalformedNumber));
        }
        Ok(value)
    }

    fn parse_array(&mut self) -> Result<Value, Error> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(ErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        let result = self.parse_array_inner();
        self.depth -= 1;
        result
    }

    fn parse_array_inner(&mut self) -> Result<Value, Error> {
        self.bump(1);
        let mut array = Array::new();
        loop {
            // Arrays may span physical lines, with comments in between.
            self.skip_blank();
            match self.peek() {
                None => return Err(self.error(ErrorKind::ArrayUnterminated)),
                Some(']') => {
                    self.bump(1);
                    break;
                }
                _ => {}
            }
            let value = self.parse_value()?;
            if value.is_table() {
                // Tables are not permitted in arrays; that is what table
                // arrays are for.
                return Err(self.error(ErrorKind::ArrayHeterogeneous));
            }
            if let Some(first) = array.first() {
                let matches_first = if first.is_array() {
                    value.is_array()
                } else {
                    value.kind() == first.kind()
                };
                if !matches_first {
                    return Err(self.error(ErrorKind::ArrayHeterogeneous));
                }
            }
            array.push(value);
            self.skip_blank();
            match self.peek() {
                Some(',') => self.bump(1),
                Some(']') => {
                    self.bump(1);
                    break;
                }
                None => return Err(self.error(ErrorKind::ArrayUnterminated)),
                Some(_) => return Err(self.error(ErrorKind::TrailingGarbage)),
            }
        }
        Ok(Value::Array(array))
    }

    fn parse_inline_table(&mut self) -> Result<Value, Error> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(ErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        let result = self.parse_inline_table_inner();
        self.depth -= 1;
        result
    }

    fn parse_inline_table_inner(&mut self) -> Result<Value, Error> {
        self.bump(1);
        let mut table = Table::new();
        self.skip_ws();
        if self.peek() == Some('}') {
            self.bump(1);
            return Ok(Value::Table(table));
        }
        loop {
            self.skip_ws();
            if self.at_line_end() {
                return Err(self.error(ErrorKind::InlineTableUnterminated));
            }
            let key = self.parse_key()?;
            self.skip_ws();
            if !self.rest.starts_with('=') {
                return Err(self.error(if self.at_line_end() {
                    ErrorKind::InlineTableUnterminated
                } else {
                    ErrorKind::ExpectedEquals
                }));
            }
            self.bump(1);
            self.skip_ws();
            if self.at_line_end() {
                return Err(self.error(ErrorKind::InlineTableUnterminated));
            }
            let value = self.parse_value()?;
            if table.contains_key(&key) {
                return Err(self.error(ErrorKind::KeyDuplicate));
            }
            table.insert(key, value);
            self.skip_ws();
            match self.peek() {
                Some(',') => self.bump(1),
                Some('}') => {
                    self.bump(1);
                    break;
                }
                None | Some('\n') | Some('\r') | Some('#') => {
                    return Err(self.error(ErrorKind::InlineTableUnterminated))
                }
                Some(_) => return Err(self.error(ErrorKind::TrailingGarbage)),
            }
        }
        Ok(Value::Table(table))
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some('\n') | Some('\r') | Some('#'))
    }
}

/// Re-resolves the current-table path from the root. Steps landing on a
/// table array follow its last element.
fn resolve_cursor<'t>(root: &'t mut Table, path: &[String]) -> &'t mut Table {
    let mut table = root;
    for key in path {
        table = match table
            .get_mut(key)
            .expect("cursor path is validated at header time")
        {
            Value::Table(t) => t,
            Value::TableArray(tables) => tables.last_mut().expect("table arrays are never empty"),
            _ => unreachable!("cursor path never crosses values"),
        };
    }
    table
}

/// The maximal run of characters a number can be built from, used to decide
/// between the integer and float grammars and to delimit residue.
fn number_token(s: &str) -> &str {
    let end = s
        .find(|c: char| !matches!(c, '0'..='9' | '_' | '+' | '-' | '.' | 'e' | 'E'))
        .unwrap_or(s.len());
    &s[..end]
}
