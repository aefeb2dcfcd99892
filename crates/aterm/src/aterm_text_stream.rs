//!
//! The textual representation of terms.
//!
//! Integers are written in decimal, lists as `[t1,...,tn]` and function
//! applications as `f(t1,...,tn)`, or just `f` for constants. A function
//! name is put between double quotes when it would otherwise be read back as
//! something else, for example `"-1"` or `"a b"`. Inside quotes the
//! characters `\`, `"`, newline, tab and carriage return are escaped.
//!
//! Readers are lenient: they skip whitespace around list elements and
//! arguments, and they accept names that the writer would have quoted as long
//! as these do not contain delimiters.
//!
#![forbid(unsafe_code)]

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Bytes;
use std::io::Read;
use std::io::Write;

use thiserror::Error;

use termite_utilities::TermiteError;
use termite_utilities::debug_trace;

use crate::ATerm;
use crate::ATermData;
use crate::ATermList;
use crate::ATermRead;
use crate::ATermWrite;
use crate::TermPool;

/// The number of most recently read characters that is shown in parse errors.
const HISTORY_LIMIT: usize = 64;

/// The transformer that leaves every term unchanged.
pub fn identity(term: ATerm) -> ATerm {
    term
}

/// The errors that can occur while reading or writing terms in the text format.
#[derive(Error, Debug)]
pub enum TextATermError {
    #[error("{message}\nError occurred at line {line}, col {column} near: {near}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
        near: String,
    },

    #[error("Failed to access the text stream: {0}")]
    Io(#[from] io::Error),
}

/// Returns the name as it must be written in the text format, i.e., quoted and
/// escaped whenever it cannot be read back unquoted.
pub fn escape_function_name(name: &str) -> Cow<'_, str> {
    if requires_quotes(name) {
        let mut result = String::with_capacity(name.len() + 2);
        // Writing into a String cannot fail.
        let _ = write_function_name(&mut result, name);
        Cow::Owned(result)
    } else {
        Cow::Borrowed(name)
    }
}

/// Writes the text representation of `term` to `out`. The transformer is
/// applied to every function application right before it is written.
///
/// # Panics
///
/// When the transformer returns something other than a function application.
pub(crate) fn write_text<O, F>(out: &mut O, term: &ATerm, transformer: &F) -> fmt::Result
where
    O: fmt::Write,
    F: Fn(ATerm) -> ATerm,
{
    enum Pending {
        Term(ATerm),
        /// The remaining elements of a list whose first element has been written.
        Elements(ATerm),
        Text(&'static str),
    }

    // Deep terms, for example long lists, must not exhaust the call stack.
    let mut stack = vec![Pending::Term(term.clone())];

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Text(text) => out.write_str(text)?,
            Pending::Term(term) => match term.data() {
                ATermData::Int(value) => write!(out, "{value}")?,
                ATermData::EmptyList => out.write_str("[]")?,
                ATermData::List { head, tail } => {
                    out.write_char('[')?;
                    stack.push(Pending::Elements(tail));
                    stack.push(Pending::Term(head));
                }
                ATermData::Application { .. } => {
                    let transformed = transformer(term);
                    let ATermData::Application { symbol, arguments } = transformed.data() else {
                        panic!("The transformer must return a function application, returned {transformed:?}");
                    };

                    write_function_name(out, symbol.name())?;
                    if !arguments.is_empty() {
                        out.write_char('(')?;
                        stack.push(Pending::Text(")"));
                        for (index, argument) in arguments.into_iter().enumerate().rev() {
                            stack.push(Pending::Term(argument));
                            if index > 0 {
                                stack.push(Pending::Text(","));
                            }
                        }
                    }
                }
            },
            Pending::Elements(list) => match list.data() {
                ATermData::List { head, tail } => {
                    out.write_char(',')?;
                    stack.push(Pending::Elements(tail));
                    stack.push(Pending::Term(head));
                }
                _ => out.write_char(']')?,
            },
        }
    }

    Ok(())
}

/// Writes terms in the text format, one term per line by default.
///
/// The output is buffered. It is flushed by [ATermWrite::flush], and when the
/// writer is dropped.
pub struct TextATermWriter<W: Write, F = fn(ATerm) -> ATerm> {
    stream: BufWriter<W>,
    transformer: F,
    newline: bool,
}

impl<W: Write> TextATermWriter<W> {
    /// Creates a writer that writes every term unchanged, followed by a newline.
    pub fn new(writer: W) -> Self {
        Self::with_transformer(writer, identity, true)
    }
}

impl<W: Write, F: Fn(ATerm) -> ATerm> TextATermWriter<W, F> {
    /// Creates a writer that applies `transformer` to every function
    /// application before it is written. When `newline` is false terms are
    /// written without a separator.
    pub fn with_transformer(writer: W, transformer: F, newline: bool) -> Self {
        TextATermWriter {
            stream: BufWriter::new(writer),
            transformer,
            newline,
        }
    }

    /// Writes the given term.
    pub fn write_aterm(&mut self, term: &ATerm) -> Result<(), TextATermError> {
        let mut adapter = IoAdapter {
            inner: &mut self.stream,
            error: None,
        };

        if write_text(&mut adapter, term, &self.transformer).is_err() {
            let error = adapter
                .error
                .take()
                .unwrap_or_else(|| io::Error::other("Failed to format the term"));
            return Err(error.into());
        }

        self.end_record()
    }

    fn end_record(&mut self) -> Result<(), TextATermError> {
        if self.newline {
            self.stream.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl<W: Write, F: Fn(ATerm) -> ATerm> ATermWrite for TextATermWriter<W, F> {
    fn write_aterm(&mut self, term: &ATerm) -> Result<(), TermiteError> {
        Ok(TextATermWriter::write_aterm(self, term)?)
    }

    fn write_int(&mut self, value: i64) -> Result<(), TermiteError> {
        write!(self.stream, "{value}")?;
        Ok(self.end_record()?)
    }

    fn write_string(&mut self, value: &str) -> Result<(), TermiteError> {
        self.stream.write_all(escape_function_name(value).as_bytes())?;
        Ok(self.end_record()?)
    }

    fn flush(&mut self) -> Result<(), TermiteError> {
        self.stream.flush()?;
        Ok(())
    }
}

/// Forwards formatted output to an [io::Write] and keeps the first io error,
/// since [fmt::Error] carries no information.
struct IoAdapter<'a, W: Write> {
    inner: &'a mut W,
    error: Option<io::Error>,
}

impl<W: Write> fmt::Write for IoAdapter<'_, W> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        self.inner.write_all(text.as_bytes()).map_err(|error| {
            self.error = Some(error);
            fmt::Error
        })
    }
}

/// Reads terms in the text format, creating them in the given pool.
///
/// A stream can contain any number of terms. Terms are separated by a newline,
/// or by nothing at all when the first term ends with a closing bracket or
/// parenthesis.
///
/// Inside quoted names `\n`, `\t` and `\r` are control characters and any
/// other escaped character stands for itself, so `\a` reads as `a` even though
/// the writer never produces it.
pub struct TextATermReader<R: Read, F = fn(ATerm) -> ATerm> {
    stream: Bytes<BufReader<R>>,
    pool: TermPool,
    transformer: F,

    /// The lookahead character, None at a newline or at the end of the input.
    character: Option<u8>,

    line: usize,
    column: usize,
    history: VecDeque<u8>,
}

/// A term of which the opening parenthesis or bracket has been read.
enum Frame {
    Application { name: String, arguments: Vec<ATerm> },
    List { elements: Vec<ATerm> },
}

impl Frame {
    fn push(&mut self, term: ATerm) {
        match self {
            Frame::Application { arguments, .. } => arguments.push(term),
            Frame::List { elements } => elements.push(term),
        }
    }

    /// Returns the character that closes this frame.
    fn end(&self) -> u8 {
        match self {
            Frame::Application { .. } => b')',
            Frame::List { .. } => b']',
        }
    }
}

/// The errors that occur while parsing, before their position is attached.
enum ReadError {
    Syntax(String),
    Io(io::Error),
}

impl From<io::Error> for ReadError {
    fn from(error: io::Error) -> Self {
        ReadError::Io(error)
    }
}

impl<R: Read> TextATermReader<R> {
    /// Creates a reader that returns every term unchanged.
    pub fn new(reader: R, pool: &TermPool) -> Self {
        Self::with_transformer(reader, pool, identity)
    }
}

impl<R: Read, F: Fn(ATerm) -> ATerm> TextATermReader<R, F> {
    /// Creates a reader that applies `transformer` to every function
    /// application that it has read, innermost first.
    pub fn with_transformer(reader: R, pool: &TermPool, transformer: F) -> Self {
        TextATermReader {
            stream: BufReader::new(reader).bytes(),
            pool: pool.clone(),
            transformer,
            character: None,
            line: 1,
            column: 0,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    /// Reads the next term, returns None when the input contains no more terms.
    pub fn read_aterm(&mut self) -> Result<Option<ATerm>, TextATermError> {
        let result = self.parse_next().map_err(|error| match error {
            ReadError::Syntax(message) => TextATermError::Parse {
                message,
                line: self.line,
                column: self.column,
                near: String::from_utf8_lossy(self.history.make_contiguous()).into_owned(),
            },
            ReadError::Io(error) => TextATermError::Io(error),
        });

        // Positions of later errors are relative to the term in which they occur,
        // and the lookahead already belongs to the next term.
        self.column = 0;
        self.history.clear();
        if let Some(character) = self.character {
            self.column = 1;
            self.history.push_back(character);
        }
        result
    }

    /// Returns the pool in which the terms are created.
    pub fn pool(&self) -> &TermPool {
        &self.pool
    }

    /// Returns the line of the input that is currently being read, starting at one.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the column of the last character that was read.
    pub fn column(&self) -> usize {
        self.column
    }

    fn parse_next(&mut self) -> Result<Option<ATerm>, ReadError> {
        if self.character.is_none_or(is_whitespace) {
            self.character = self.next_char(true, false)?;
        }

        match self.character {
            Some(_) => {
                let term = self.parse_aterm()?;
                debug_trace!("Read term {term}");
                Ok(Some(term))
            }
            None => Ok(None),
        }
    }

    /// Parses a term, where the nesting of arguments and list elements is kept
    /// on an explicit stack so that deep terms do not exhaust the call stack.
    fn parse_aterm(&mut self) -> Result<ATerm, ReadError> {
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            let mut completed = self.parse_term_start(&mut stack)?;

            while let Some(term) = completed.take() {
                let Some(frame) = stack.last_mut() else {
                    return Ok(term);
                };

                frame.push(term);
                let end = frame.end();
                self.skip_whitespace()?;

                if self.character == Some(b',') {
                    self.character = self.next_char(true, true)?;
                } else if self.character == Some(end) {
                    self.character = self.next_char(true, false)?;
                    if let Some(frame) = stack.pop() {
                        completed = Some(self.close_frame(frame));
                    }
                } else {
                    return Err(ReadError::Syntax(format!(
                        "Missing {} while parsing a list term",
                        char::from(end)
                    )));
                }
            }
        }
    }

    /// Parses the beginning of a term. Returns the term when it is complete,
    /// or None when a frame for its arguments or elements has been opened.
    fn parse_term_start(&mut self, stack: &mut Vec<Frame>) -> Result<Option<ATerm>, ReadError> {
        match self.character {
            Some(b'[') => {
                self.character = self.next_char(true, true)?;
                if self.character == Some(b']') {
                    self.character = self.next_char(true, false)?;
                    return Ok(Some(self.pool.empty_list()));
                }

                stack.push(Frame::List { elements: Vec::new() });
                Ok(None)
            }
            Some(character) if character == b'-' || character.is_ascii_digit() => self.parse_aterm_int().map(Some),
            _ => {
                let name = if self.character == Some(b'"') {
                    self.parse_quoted_string()?
                } else {
                    self.parse_unquoted_string()?
                };

                if self.character == Some(b'(') {
                    self.character = self.next_char(true, true)?;
                    if self.character != Some(b')') {
                        stack.push(Frame::Application {
                            name,
                            arguments: Vec::new(),
                        });
                        return Ok(None);
                    }
                    self.character = self.next_char(true, false)?;
                }

                Ok(Some(self.close_frame(Frame::Application {
                    name,
                    arguments: Vec::new(),
                })))
            }
        }
    }

    /// Creates the term of a frame whose arguments or elements have all been read.
    fn close_frame(&self, frame: Frame) -> ATerm {
        match frame {
            Frame::Application { name, arguments } => {
                let symbol = self.pool.create_symbol(name, arguments.len());
                let term = self.pool.create_term(&symbol, &arguments);
                (self.transformer)(term)
            }
            Frame::List { elements } => ATermList::from_double_iter(&self.pool, elements.into_iter()).into(),
        }
    }

    fn parse_aterm_int(&mut self) -> Result<ATerm, ReadError> {
        let mut number = String::new();
        if self.character == Some(b'-') {
            number.push('-');
            self.character = self.next_char(true, true)?;
        }

        while let Some(digit) = self.character.filter(u8::is_ascii_digit) {
            number.push(char::from(digit));
            self.character = self.next_char(false, false)?;
        }

        if !number.ends_with(|character: char| character.is_ascii_digit()) {
            return Err(ReadError::Syntax("Expected a digit after '-'".to_string()));
        }

        let value = number
            .parse::<i64>()
            .map_err(|_| ReadError::Syntax(format!("Integer literal {number} does not fit in 64 bits")))?;
        Ok(self.pool.create_int(value))
    }

    /// Parses a quoted name, the lookahead is the opening quote.
    fn parse_quoted_string(&mut self) -> Result<String, ReadError> {
        let mut bytes = Vec::new();
        loop {
            match self.read_required()? {
                b'"' => break,
                b'\\' => bytes.push(match self.read_required()? {
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    escaped => escaped,
                }),
                character => bytes.push(character),
            }
        }

        self.character = self.next_char(true, false)?;
        into_name(bytes)
    }

    fn parse_unquoted_string(&mut self) -> Result<String, ReadError> {
        let mut bytes = Vec::new();
        while let Some(character) = self.character.filter(|character| !is_delimiter(*character)) {
            bytes.push(character);
            self.character = self.next_char(false, false)?;
        }

        if bytes.is_empty() {
            return Err(ReadError::Syntax(match self.character {
                Some(character) => format!("Expected a term, found '{}'", char::from(character)),
                None => "Expected a term, found the end of the line".to_string(),
            }));
        }

        into_name(bytes)
    }

    fn skip_whitespace(&mut self) -> Result<(), ReadError> {
        if self.character.is_some_and(is_whitespace) {
            self.character = self.next_char(true, false)?;
        }
        Ok(())
    }

    /// Returns the next character, or None at a newline that is not skipped.
    fn next_char(&mut self, skip_whitespace: bool, required: bool) -> Result<Option<u8>, ReadError> {
        loop {
            match self.read_char(required)? {
                Some(character) if skip_whitespace && is_whitespace(character) => continue,
                Some(b'\n') => return Ok(None),
                character => return Ok(character),
            }
        }
    }

    fn read_required(&mut self) -> Result<u8, ReadError> {
        self.read_char(true)?.ok_or_else(premature_end)
    }

    fn read_char(&mut self, required: bool) -> Result<Option<u8>, ReadError> {
        match self.stream.next().transpose()? {
            Some(character) => {
                if character == b'\n' {
                    self.line += 1;
                    self.column = 0;
                } else {
                    self.column += 1;
                }

                if self.history.len() == HISTORY_LIMIT {
                    self.history.pop_front();
                }
                self.history.push_back(character);
                Ok(Some(character))
            }
            None if required => Err(premature_end()),
            None => Ok(None),
        }
    }
}

impl<R: Read, F: Fn(ATerm) -> ATerm> ATermRead for TextATermReader<R, F> {
    fn read_aterm(&mut self) -> Result<Option<ATerm>, TermiteError> {
        Ok(TextATermReader::read_aterm(self)?)
    }
}

fn premature_end() -> ReadError {
    ReadError::Syntax("Premature end of file while parsing.".to_string())
}

fn into_name(bytes: Vec<u8>) -> Result<String, ReadError> {
    String::from_utf8(bytes).map_err(|_| ReadError::Syntax("The function name is not valid UTF-8".to_string()))
}

fn is_whitespace(character: u8) -> bool {
    matches!(character, b' ' | b'\t' | b'\n' | b'\r')
}

/// The characters that end an unquoted name.
fn is_delimiter(character: u8) -> bool {
    matches!(
        character,
        b'"' | b'(' | b')' | b']' | b',' | b' ' | b'\n' | b'\t' | b'\r'
    )
}

fn requires_quotes(name: &str) -> bool {
    match name.chars().next() {
        None => true,
        Some(first) => {
            first == '-'
                || first.is_ascii_digit()
                || name
                    .chars()
                    .any(|c| matches!(c, '\\' | '"' | '(' | ')' | '[' | ']' | ',' | ' ' | '\n' | '\t' | '\r'))
        }
    }
}

fn write_function_name<O: fmt::Write>(out: &mut O, name: &str) -> fmt::Result {
    if !requires_quotes(name) {
        return out.write_str(name);
    }

    out.write_char('"')?;
    for character in name.chars() {
        match character {
            '\\' => out.write_str("\\\\")?,
            '"' => out.write_str("\\\"")?,
            '\n' => out.write_str("\\n")?,
            '\t' => out.write_str("\\t")?,
            '\r' => out.write_str("\\r")?,
            _ => out.write_char(character)?,
        }
    }
    out.write_char('"')
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use test_case::test_case;

    use termite_utilities::random_test;
    use termite_utilities::test_logger;

    use crate::random_mixed_term;

    use super::*;

    fn read_all(pool: &TermPool, text: &str) -> Result<Vec<ATerm>, TextATermError> {
        let mut reader = TextATermReader::new(text.as_bytes(), pool);
        let mut result = Vec::new();
        while let Some(term) = reader.read_aterm()? {
            result.push(term);
        }
        Ok(result)
    }

    #[test_case("-5" ; "negative integer")]
    #[test_case("f(a,b)" ; "application")]
    #[test_case("\"a b\"(1)" ; "quoted name")]
    #[test_case("[]" ; "empty list")]
    #[test_case("[1,2,3]" ; "list of integers")]
    #[test_case("f(\u{b}b,\u{c}c)" ; "vertical tab and form feed in names")]
    #[test_case("f([a,[]],\"-1\",g(h(0)))" ; "nested")]
    fn test_canonical_text(text: &str) {
        test_logger();
        let pool = TermPool::new();

        let term = pool.from_string(text).unwrap();
        assert_eq!(term.to_string(), text);
    }

    #[test]
    fn test_structure() {
        let pool = TermPool::new();

        let term = pool.from_string("f(a,[1,-2])").unwrap();
        let ATermData::Application { symbol, arguments } = term.data() else {
            panic!("Expected a function application");
        };
        assert_eq!(symbol.name(), "f");
        assert_eq!(symbol.arity(), 2);
        assert!(arguments[0].is_application());
        assert_eq!(arguments[0].arity(), 0);

        let list: ATermList<ATerm> = arguments[1].clone().into();
        assert_eq!(list.to_vec(), vec![pool.create_int(1), pool.create_int(-2)]);
    }

    #[test]
    fn test_lenient_whitespace() {
        let pool = TermPool::new();

        let term = pool.from_string("  f( a , [ 1 ,2 ] , \"b c\" )  ").unwrap();
        assert_eq!(term.to_string(), "f(a,[1,2],\"b c\")");
        assert_eq!(pool.from_string("f()").unwrap().to_string(), "f");
    }

    #[test]
    fn test_missing_parenthesis() {
        let pool = TermPool::new();
        let mut reader = TextATermReader::new("f(1,2".as_bytes(), &pool);

        match reader.read_aterm() {
            Err(TextATermError::Parse { message, line, .. }) => {
                assert!(message.contains(')'), "unexpected message {message}");
                assert_eq!(line, 1);
            }
            result => panic!("Expected a parse error, got {result:?}"),
        }
    }

    #[test_case("" ; "empty")]
    #[test_case("  \n\t \n" ; "only whitespace")]
    fn test_end_of_input(text: &str) {
        let pool = TermPool::new();
        let mut reader = TextATermReader::new(text.as_bytes(), &pool);

        assert!(reader.read_aterm().unwrap().is_none());
        assert!(reader.read_aterm().unwrap().is_none());
    }

    #[test_case("f(" ; "unterminated arguments")]
    #[test_case("\"abc" ; "unterminated quote")]
    #[test_case("-" ; "minus without digits")]
    #[test_case("f(,a)" ; "missing argument")]
    #[test_case("[1 2]" ; "missing comma")]
    #[test_case("99999999999999999999" ; "integer overflow")]
    fn test_invalid_input(text: &str) {
        let pool = TermPool::new();
        let result = read_all(&pool, text);
        assert!(matches!(result, Err(TextATermError::Parse { .. })), "{text} should not parse");
    }

    #[test]
    fn test_error_context() {
        let pool = TermPool::new();
        let text = indoc! {"
            f(a)
            g(b,
        "};

        let mut reader = TextATermReader::new(text.as_bytes(), &pool);
        assert_eq!(reader.read_aterm().unwrap(), Some(pool.from_string("f(a)").unwrap()));

        let error = reader.read_aterm().unwrap_err();
        assert!(error.to_string().contains("Premature end of file"), "{error}");
        assert!(matches!(error, TextATermError::Parse { line: 3, .. }), "{error:?}");
    }

    #[test]
    fn test_error_position_in_long_line() {
        let pool = TermPool::new();
        let text = format!("f({})", "a,".repeat(40));

        // The error is found at the closing parenthesis, the last byte of the line.
        let error = read_all(&pool, &text).unwrap_err();
        match error {
            TextATermError::Parse {
                line, column, near, ..
            } => {
                assert_eq!(line, 1);
                assert_eq!(column, text.len());
                assert_eq!(near, &text[text.len() - HISTORY_LIMIT..]);
            }
            error => panic!("Unexpected error {error:?}"),
        }
    }

    #[test]
    fn test_error_position_in_second_term() {
        let pool = TermPool::new();
        let text = indoc! {"
            f(a)
            g(b,)
        "};

        let mut reader = TextATermReader::new(text.as_bytes(), &pool);
        assert_eq!(reader.read_aterm().unwrap(), Some(pool.from_string("f(a)").unwrap()));

        match reader.read_aterm().unwrap_err() {
            TextATermError::Parse {
                message,
                line,
                column,
                near,
            } => {
                assert_eq!(message, "Expected a term, found ')'");
                assert_eq!(line, 2);
                assert_eq!(column, 5);
                assert_eq!(near, "g(b,)");
            }
            error => panic!("Unexpected error {error:?}"),
        }
    }

    #[test]
    fn test_multiple_terms() {
        let pool = TermPool::new();
        let text = indoc! {"
            f(a)
            [1,2]
            -7
            \"x y\"
            g(b)h(c)
        "};

        let terms: Vec<String> = read_all(&pool, text).unwrap().iter().map(|t| t.to_string()).collect();
        assert_eq!(terms, ["f(a)", "[1,2]", "-7", "\"x y\"", "g(b)", "h(c)"]);
    }

    #[test_case("a", "a" ; "plain")]
    #[test_case("", "\"\"" ; "empty")]
    #[test_case("-x", "\"-x\"" ; "leading minus")]
    #[test_case("1a", "\"1a\"" ; "leading digit")]
    #[test_case("a b", "\"a b\"" ; "space")]
    #[test_case("f(x)", "\"f(x)\"" ; "parentheses")]
    #[test_case("[a]", "\"[a]\"" ; "brackets")]
    #[test_case("\"quoted\"", "\"\\\"quoted\\\"\"" ; "quotes")]
    #[test_case("back\\slash", "\"back\\\\slash\"" ; "backslash")]
    #[test_case("a\nb\tc\rd", "\"a\\nb\\tc\\rd\"" ; "control characters")]
    #[test_case("a-1", "a-1" ; "inner minus")]
    #[test_case("\x0Bb", "\x0Bb" ; "leading vertical tab")]
    #[test_case("\x0Cb", "\x0Cb" ; "leading form feed")]
    fn test_escape_function_name(name: &str, expected: &str) {
        assert_eq!(escape_function_name(name), expected);

        // Every escaped name reads back as the constant with that name.
        let pool = TermPool::new();
        let term = pool.from_string(expected).unwrap();
        assert_eq!(term.get_head_symbol().name(), name);
        assert_eq!(term.arity(), 0);
    }

    #[test]
    fn test_raw_newline_in_quotes() {
        let pool = TermPool::new();

        let term = pool.from_string("\"a\nb\"").unwrap();
        assert_eq!(term.get_head_symbol().name(), "a\nb");
        assert_eq!(term.to_string(), "\"a\\nb\"");
    }

    #[test]
    fn test_unknown_escape_is_literal() {
        let pool = TermPool::new();

        let term = pool.from_string("\"\\a\\(\"").unwrap();
        assert_eq!(term.get_head_symbol().name(), "a(");
        assert_eq!(term.to_string(), "\"a(\"");
    }

    #[test]
    fn test_random_round_trip() {
        random_test(100, |rng| {
            let pool = TermPool::new();
            let terms: Vec<ATerm> = (0..10).map(|_| random_mixed_term(rng, &pool, 5)).collect();

            let mut buffer = Vec::new();
            {
                let mut writer = TextATermWriter::new(&mut buffer);
                for term in &terms {
                    writer.write_aterm(term).unwrap();
                }
            }

            let read_back = read_all(&pool, std::str::from_utf8(&buffer).unwrap()).unwrap();
            assert_eq!(terms, read_back);
        });
    }

    #[test]
    fn test_reader_transformer() {
        let pool = TermPool::new();

        // Renames every constant a into b, including nested occurrences.
        let rename = |term: ATerm| {
            if term.arity() == 0 && term.get_head_symbol().name() == "a" {
                let pool = term.pool().clone();
                pool.create_constant(&pool.create_symbol("b", 0))
            } else {
                term
            }
        };

        let mut reader = TextATermReader::with_transformer("f(a,[a],c)".as_bytes(), &pool, rename);
        let term = reader.read_aterm().unwrap().unwrap();
        assert_eq!(term, pool.from_string("f(b,[b],c)").unwrap());
    }

    #[test]
    fn test_writer_transformer() {
        let pool = TermPool::new();
        let term = pool.from_string("f(a,g(a))").unwrap();

        let upper = |term: ATerm| {
            let symbol = term.get_head_symbol();
            let pool = term.pool().clone();
            let renamed = pool.create_symbol(symbol.name().to_uppercase(), symbol.arity());
            pool.create_term_iter(&renamed, term.arguments())
        };

        let mut buffer = Vec::new();
        {
            let mut writer = TextATermWriter::with_transformer(&mut buffer, upper, false);
            writer.write_aterm(&term).unwrap();
            writer.write_aterm(&pool.create_int(3)).unwrap();
        }

        assert_eq!(String::from_utf8(buffer).unwrap(), "F(A,G(A))3");
    }

    #[test]
    fn test_long_list() {
        let pool = TermPool::new();
        let elements: Vec<ATerm> = (0..100_000).map(|value| pool.create_int(value)).collect();
        let list: ATerm = ATermList::from_double_iter(&pool, elements.into_iter()).into();

        let text = list.to_string();
        assert!(text.starts_with("[0,1,2,"));
        assert!(text.ends_with(",99999]"));
        assert_eq!(pool.from_string(&text).unwrap(), list);
    }

    #[test]
    fn test_deeply_nested_term() {
        let pool = TermPool::new();
        let f = pool.create_symbol("f", 1);

        let mut term = pool.create_int(0);
        for _ in 0..100_000 {
            term = pool.create_term(&f, &[term]);
        }

        let text = term.to_string();
        assert!(text.starts_with("f(f(f("));
        assert!(text.ends_with("(0)))"));
        assert_eq!(pool.from_string(&text).unwrap(), term);
    }

    #[test]
    fn test_deeply_nested_list() {
        let pool = TermPool::new();
        let text = format!("{}{}", "[".repeat(100_000), "]".repeat(100_000));

        let mut term = pool.from_string(&text).unwrap();
        let mut depth = 0;
        while term.is_list() && !term.is_empty_list() {
            let list: ATermList<ATerm> = term.into();
            assert_eq!(list.len(), 1);
            term = list.head();
            depth += 1;
        }

        // The innermost list is the empty list.
        assert_eq!(depth, 99_999);
        assert!(term.is_empty_list());
    }
}
