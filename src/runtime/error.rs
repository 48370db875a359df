use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter } };
use crate::{ runtime::interpreter::{ CallStack, Interpreter },
             lang::source_buffer::SourceLocation };



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The broad category of an error.  Callers use the kind to decide how to react to a failure,
/// the message is meant for people.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind
{
    /// Unterminated string or block, or a malformed literal, found while tokenizing.
    Lex,

    /// A pop or peek went deeper than the data stack.
    StackUnderflow,

    /// An operator was applied to values of the wrong type.
    Type,

    /// A word that is neither user defined, built-in, nor a number.
    UnknownWord,

    /// A stray `;` or `}`, or a malformed word definition.
    Syntax,

    /// Division or remainder by zero.
    DivisionByZero,

    /// Blocks and words nested deeper than the interpreter allows.
    CallDepth,

    /// An operation would build a value larger than the interpreter allows.
    Limit,

    /// Reading a source file failed.
    Io
}


impl Display for ErrorKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        let name = match self
            {
                ErrorKind::Lex            => "lex error",
                ErrorKind::StackUnderflow => "stack underflow",
                ErrorKind::Type           => "type error",
                ErrorKind::UnknownWord    => "unknown word",
                ErrorKind::Syntax         => "syntax error",
                ErrorKind::DivisionByZero => "division by zero",
                ErrorKind::CallDepth      => "call depth exceeded",
                ErrorKind::Limit          => "limit exceeded",
                ErrorKind::Io             => "I/O error"
            };

        write!(f, "{}", name)
    }
}



/// Any error that occurs while tokenizing or executing a script.
#[derive(Clone)]
pub struct ScriptError
{
    /// What kind of failure this is.
    kind: ErrorKind,

    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String,

    /// The user words being executed at the time of the error, if available.
    call_stack: Option<CallStack>
}


impl Error for ScriptError
{
}


/// Pretty print the ScriptError for the user.  The call stack is printed innermost word first.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.error)?,
            None => write!(f, "{}", self.error)?
        }

        if let Some(call_stack) = &self.call_stack
        {
            if !call_stack.is_empty()
            {
                write!(f, "\n\nCall stack\n")?;

                for item in call_stack.iter().rev()
                {
                    writeln!(f, "  {}", item)?;
                }
            }
        }

        Ok(())
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{} ({})", self, self.kind)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(kind: ErrorKind,
               location: Option<SourceLocation>,
               error: String,
               call_stack: Option<CallStack>) -> ScriptError
    {
        ScriptError
            {
                kind,
                location,
                error,
                call_stack
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(kind: ErrorKind,
                            location: Option<SourceLocation>,
                            error: String,
                            call_stack: Option<CallStack>) -> Result<T>
    {
        Err(ScriptError::new(kind, location, error, call_stack))
    }

    /// The category of the error.
    pub fn kind(&self) -> &ErrorKind
    {
        &self.kind
    }

    /// If available, the location in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }

    /// If available, the script's call stack at the time of the error.
    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }

    /// Fill in the location and call stack of errors raised by code that can't see the
    /// interpreter.  Whatever the error already knows is kept.
    pub fn with_context(mut self, location: &SourceLocation, call_stack: &CallStack) -> ScriptError
    {
        if self.location.is_none()
        {
            self.location = Some(location.clone());
        }

        if self.call_stack.is_none()
        {
            self.call_stack = Some(call_stack.clone());
        }

        self
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(ErrorKind::Io, None, format!("I/O error: {}", error), None)
    }
}



/// A convenience function for creating a ScriptError and wrapping in in a Result::Err using the
/// interpreter's current location and call stack.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: String) -> Result<T>
{
    let location = interpreter.current_location().clone();
    let call_stack = interpreter.call_stack().clone();

    ScriptError::new_as_result(kind, location, message, Some(call_stack))
}



pub fn script_error_str<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: &str) -> Result<T>
{
    script_error(interpreter, kind, message.to_string())
}
