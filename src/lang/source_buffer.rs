use std::fmt::{ self,
                 Display,
                 Formatter };



/// The location in the source code where a token was found.  This structure is used all over the
/// interpreter to keep track where important things are found in the source code.  This is used
/// extensively in the error reporting.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source code.  For example code handed
    /// to `parse` will have a tag of "\<parse\>".
    path: String,

    /// The 1 based line number in the source code where the token was found.
    line: usize,

    /// The 1 based column number in the source code where the token was found.
    column: usize
}


impl Default for SourceLocation
{
    fn default() -> Self
    {
        Self::new()
    }
}


/// Used for error reporting to show where in the source code an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl SourceLocation
{
    /// Crate a new SourceLocation with default values.
    pub fn new() -> SourceLocation
    {
        SourceLocation { path: "unspecified".to_string(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with the path to the source code.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The path to the source code or a meaningful description of the source code.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 1 based line number in the source code.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number in the source code.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// Check if the given character separates raw chunks of source text.
pub fn is_whitespace(next: char) -> bool
{
    next == ' ' || next == '\t' || next == '\r' || next == '\n'
}



/// A buffer for processing source code.  This is used by the tokenizer to extract meaningful tokens
/// from the source code.  The buffer is a forward moving cursor over the characters of the code.  As
/// characters are consumed the location of the cursor in that source is maintained.
///
/// Unlike a plain character iterator the buffer can look ahead over the whole next chunk of text
/// without consuming it.  The tokenizer needs that to decide if a chunk starting with a quote is a
/// complete string literal on it's own.
pub struct SourceBuffer
{
    /// The characters of the source code being processed.
    chars: Vec<char>,

    /// Index of the next character to be consumed.
    position: usize,

    /// The logical location of the cursor in the source code.
    location: SourceLocation
}


impl SourceBuffer
{
    /// Create a new SourceBuffer with the path to, or meaningful tag for the source code and the
    /// source code itself.
    pub fn new(path: &str, source: &str) -> Self
    {
        SourceBuffer
            {
                chars: source.chars().collect(),
                position: 0,
                location: SourceLocation::new_from_path(path)
            }
    }

    /// The location the cursor is at in the source code being processed.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next character in the source code without consuming it.
    pub fn peek_next(&self) -> Option<char>
    {
        self.chars.get(self.position).copied()
    }

    /// Get and consume the next character in the source code.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = self.peek_next();

        if let Some(next_char) = next
        {
            self.position += 1;
            self.increment_location(next_char);
        }

        next
    }

    /// Look at the upcoming chunk of text without consuming it.  The chunk ends at whitespace, at
    /// the start of a comment, or at the end of the buffer.
    pub fn peek_chunk(&self) -> String
    {
        self.chars[self.position..]
            .iter()
            .take_while(|&&next| !is_whitespace(next) && next != '#')
            .collect()
    }

    /// Like peek_chunk, but a # does not end the chunk.  Used while looking at string literals
    /// where comments can not start.
    pub fn peek_raw_chunk(&self) -> String
    {
        self.chars[self.position..]
            .iter()
            .take_while(|&&next| !is_whitespace(next))
            .collect()
    }

    /// Consume the given number of characters.
    pub fn advance(&mut self, count: usize)
    {
        for _ in 0..count
        {
            if self.next_char().is_none()
            {
                break;
            }
        }
    }

    /// Skip over whitespace and comments.  Stopping only at either the end of the buffer or the
    /// start of the next chunk.
    pub fn skip_whitespace(&mut self)
    {
        while let Some(next) = self.peek_next()
        {
            if next == '#'
            {
                self.skip_to_end_of_line();
            }
            else if is_whitespace(next)
            {
                let _ = self.next_char();
            }
            else
            {
                break;
            }
        }
    }

    /// Skip the rest of the current line, leaving the new line itself in the buffer.
    fn skip_to_end_of_line(&mut self)
    {
        while let Some(next) = self.peek_next()
        {
            if next == '\n'
            {
                break;
            }

            let _ = self.next_char();
        }
    }

    /// Increment the location based on the next character.  Advance one column for regular
    /// characters.  Reset the colum to 1 and increment the line for new line characters.
    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.line += 1;
            self.location.column = 1;
        }
        else
        {
            self.location.column += 1;
        }
    }
}
