use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::{
        data_structures::value::Value,
        error::{self, ErrorKind, ScriptError},
    },
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    fs::read_to_string,
    rc::Rc,
};

/// A token is a simple unit of the language.  The token can be a literal value, a word to be
/// executed, or a block of tokens that is executed as a single unit.
///
/// The token also holds the location in the original source code where it was found.
#[derive(Clone, PartialEq)]
pub enum Token {
    /// A word in the language to be executed.  The spelling is kept exactly as written, lookups
    /// lower-case the name.
    Word(SourceLocation, String),

    /// A signed 64-bit integer literal, in any of the supported bases.
    Int(SourceLocation, i64),

    /// A decimal floating point literal.
    Float(SourceLocation, f64),

    /// A string literal with the quotes stripped and escapes resolved.
    String(SourceLocation, String),

    /// A `{ ... }` block, tokenized recursively.  The body is shared so that blocks and word
    /// bodies can be executed many times without being copied.
    Block(SourceLocation, BlockBody),
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

/// The shared body of a block or of a user defined word.
pub type BlockBody = Rc<TokenList>;

/// Render the token the way it would be written in source code.  Used by the word listing.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Word(_, name) => write!(f, "{}", name),
            Token::Int(_, value) => write!(f, "{}", value),
            Token::Float(_, value) => write!(f, "{}", Value::Float(*value)),
            Token::String(_, text) => write!(f, "{}", quote_literal(text)),
            Token::Block(_, body) => {
                write!(f, "{{")?;

                for token in body.iter() {
                    write!(f, " {}", token)?;
                }

                write!(f, " }}")
            }
        }
    }
}

/// Print the token along with where it was found.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self)
    }
}

impl Token {
    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Token::Word(location, _) => location,
            Token::Int(location, _) => location,
            Token::Float(location, _) => location,
            Token::String(location, _) => location,
            Token::Block(location, _) => location,
        }
    }

    /// Check if the token is a word.
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_, _))
    }

    /// Check if the token is a block.
    pub fn is_block(&self) -> bool {
        matches!(self, Token::Block(_, _))
    }

    /// The lower-cased name of a word token, the form used for dispatch.  None for every other kind
    /// of token.
    pub fn word_name(&self) -> Option<String> {
        match self {
            Token::Word(_, name) => Some(name.to_lowercase()),
            _ => None,
        }
    }

    /// Is this a word token with the given, already lower-cased, name?
    pub fn is_word_named(&self, name: &str) -> bool {
        match self {
            Token::Word(_, word) => word.to_lowercase() == name,
            _ => false,
        }
    }
}

/// Re-quote a string literal so that it reads back as the same literal.
fn quote_literal(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}

/// Resolve the only escape the language knows, `\"`.  Every other backslash is literal text.
fn unescape(text: &str) -> String {
    text.replace("\\\"", "\"")
}

/// A chunk that starts and ends with an unescaped quote is a string literal on it's own.  The
/// lone `"` chunk is only an opening quote.
fn is_complete_string(chunk: &str) -> bool {
    chunk.len() >= 2
        && chunk.starts_with('"')
        && chunk.ends_with('"')
        && !chunk[..chunk.len() - 1].ends_with('\\')
}

/// Process a string literal.  Either the next chunk is a complete literal, or we keep consuming
/// raw text, whitespace included, until the closing unescaped quote is found.
fn process_string(buffer: &mut SourceBuffer) -> error::Result<Token> {
    let location = buffer.location().clone();
    let chunk = buffer.peek_raw_chunk();

    if is_complete_string(&chunk) {
        buffer.advance(chunk.chars().count());

        let text = unescape(&chunk[1..chunk.len() - 1]);
        return Ok(Token::String(location, text));
    }

    // Consume the opening quote.
    let _ = buffer.next_char();

    let mut text = String::new();

    loop {
        match buffer.next_char() {
            Some('\\') => {
                if buffer.peek_next() == Some('"') {
                    let _ = buffer.next_char();
                    text.push('"');
                } else {
                    text.push('\\');
                }
            }

            Some('"') => return Ok(Token::String(location, text)),

            Some(next) => text.push(next),

            None => {
                return ScriptError::new_as_result(
                    ErrorKind::Lex,
                    Some(location),
                    "string not closed".to_string(),
                    None,
                );
            }
        }
    }
}

/// Check that the text is a non-empty run of decimal digits.
fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Parse the unsigned magnitude of an integer literal in the given radix and only then apply the
/// sign.  Literals that do not fit into an i64 are rejected.
fn parse_integer(
    location: &SourceLocation,
    text: &str,
    digits: &str,
    radix: u32,
    negative: bool,
) -> error::Result<Token> {
    let out_of_range = || {
        ScriptError::new(
            ErrorKind::Lex,
            Some(location.clone()),
            format!("integer literal {} out of range", text),
            None,
        )
    };

    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| out_of_range())?;
    let magnitude = i128::from(magnitude);
    let value = if negative { -magnitude } else { magnitude };

    match i64::try_from(value) {
        Ok(value) => Ok(Token::Int(location.clone(), value)),
        Err(_) => Err(out_of_range()),
    }
}

/// Attempt to convert the chunk into a numeric literal.  Hex, octal and binary integers are checked
/// first, then decimal integers, then decimal floats.  Returns None if the text isn't a number at
/// all, in which case it is a word.
fn to_numeric(location: &SourceLocation, text: &str) -> error::Result<Option<Token>> {
    let (negative, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let prefixed = if let Some(digits) = magnitude.strip_prefix("0x") {
        Some((16, digits))
    } else if let Some(digits) = magnitude.strip_prefix("0o") {
        Some((8, digits))
    } else if let Some(digits) = magnitude.strip_prefix("0b") {
        Some((2, digits))
    } else {
        None
    };

    if let Some((radix, digits)) = prefixed {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Ok(None);
        }

        return parse_integer(location, text, digits, radix, negative).map(Some);
    }

    if is_digits(magnitude) {
        return parse_integer(location, text, magnitude, 10, negative).map(Some);
    }

    if let Some((whole, fraction)) = magnitude.split_once('.') {
        if is_digits(whole) && is_digits(fraction) {
            return match text.parse::<f64>() {
                Ok(value) => Ok(Some(Token::Float(location.clone(), value))),
                Err(error) => ScriptError::new_as_result(
                    ErrorKind::Lex,
                    Some(location.clone()),
                    format!("invalid float literal {}: {}", text, error),
                    None,
                ),
            };
        }
    }

    Ok(None)
}

/// Tokenize until the end of the buffer, or, when processing a block, until the chunk that closes
/// it.  The location of the block's opening brace is used to report a missing close.
fn process_tokens(
    buffer: &mut SourceBuffer,
    block_start: Option<&SourceLocation>,
) -> error::Result<TokenList> {
    let mut token_list = TokenList::new();

    loop {
        buffer.skip_whitespace();

        if buffer.peek_next().is_none() {
            break;
        }

        let location = buffer.location().clone();

        if buffer.peek_next() == Some('"') {
            token_list.push(process_string(buffer)?);
            continue;
        }

        let chunk = buffer.peek_chunk();
        buffer.advance(chunk.chars().count());

        let next_token = match chunk.as_str() {
            "{" => {
                let body = process_tokens(buffer, Some(&location))?;
                Token::Block(location, Rc::new(body))
            }

            "}" if block_start.is_some() => return Ok(token_list),

            _ => match to_numeric(&location, &chunk)? {
                Some(number) => number,
                None => Token::Word(location, chunk),
            },
        };

        token_list.push(next_token);
    }

    // We hit the end of the text.  That's only fine if we weren't inside of a block.
    match block_start {
        Some(location) => ScriptError::new_as_result(
            ErrorKind::Lex,
            Some(location.clone()),
            "block not closed".to_string(),
            None,
        ),
        None => Ok(token_list),
    }
}

/// Tokenize the source code from a string.
pub fn tokenize_from_source(path: &str, source: &str) -> error::Result<TokenList> {
    let mut buffer = SourceBuffer::new(path, source);

    process_tokens(&mut buffer, None)
}

/// Load the code from a file and then tokenize it.
pub fn tokenize_from_file(path: &str) -> error::Result<TokenList> {
    match read_to_string(path) {
        Ok(source) => tokenize_from_source(path, &source),
        Err(error) => ScriptError::new_as_result(
            ErrorKind::Io,
            None,
            format!("Could not read file {}: {}", path, error),
            None,
        ),
    }
}
