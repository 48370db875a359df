use std::{ mem,
           rc::Rc };
use tracing::{ debug,
               trace };
use crate::{ lang::{ source_buffer::SourceLocation,
                     tokenizing::{ tokenize_from_file,
                                   tokenize_from_source,
                                   BlockBody,
                                   Token,
                                   TokenList } },
             runtime::{ built_ins::find_built_in,
                        data_structures::{ dictionary::{ Dictionary,
                                                         WordInfo },
                                           value::Value,
                                           value_stack::ValueStack },
                        error::{ self,
                                 script_error,
                                 script_error_str,
                                 ErrorKind },
                        interpreter::{ CallItem,
                                       CallStack,
                                       CodeManagement,
                                       Interpreter,
                                       InterpreterStack,
                                       OutputManagement,
                                       Registers,
                                       WordManagement } } };



/// How deeply blocks and user words may nest before execution is abandoned.
pub const MAX_CALL_DEPTH: usize = 512;

/// The path reported in source locations for code handed directly to `parse`.
pub const PARSE_PATH: &str = "<parse>";



/// One run over a token sequence, the top level code of a call or the body of a block or word.
struct Frame
{
    /// The tokens being run.
    tokens: BlockBody,

    /// The control registers of the run.  A block starts from fresh ones, a word body starts from
    /// its caller's and hands them back when it finishes.
    registers: Registers
}


impl Frame
{
    fn new(tokens: BlockBody) -> Frame
    {
        Frame
            {
                tokens,
                registers: Registers::new()
            }
    }
}



/// The interpreter for the vorth language.  It owns the data stack, the user dictionary, the
/// output of the current call and the registers of the code being run.
///
/// The stack and the dictionary persist across calls, so one instance is one session.
pub struct VorthInterpreter
{
    /// The data stack shared by all code run by the interpreter.
    stack: ValueStack,

    /// The user defined words.
    dictionary: Dictionary,

    /// Text written by the current, or the most recent, call.
    output: String,

    /// The last known location execution has reached in the source code.
    current_location: Option<SourceLocation>,

    /// The user words currently being executed.
    call_stack: CallStack,

    /// The innermost running token sequence.  The frames of the sequences that contain it live on
    /// the native stack while it runs.
    frame: Frame,

    /// How many frames are nested below the current one.
    depth: usize,

    /// Set by `bye`, never cleared.
    exiting: bool
}


impl Interpreter for VorthInterpreter
{
}


impl InterpreterStack for VorthInterpreter
{
    fn stack(&self) -> &ValueStack
    {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut ValueStack
    {
        &mut self.stack
    }

    fn push(&mut self, value: Value)
    {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Value>
    {
        self.stack.pop()
    }

    fn peek(&self, depth: usize) -> error::Result<Value>
    {
        Ok(self.stack.peek(depth)?.clone())
    }

    fn pop_as_int(&mut self) -> error::Result<i64>
    {
        let value = *self.stack.peek(0)?.as_int()?;

        let _ = self.stack.pop()?;
        Ok(value)
    }

    fn pop_as_string(&mut self) -> error::Result<String>
    {
        let value = self.stack.peek(0)?.as_string()?.clone();

        let _ = self.stack.pop()?;
        Ok(value)
    }
}


impl OutputManagement for VorthInterpreter
{
    fn output(&self) -> &str
    {
        &self.output
    }

    fn write_output(&mut self, text: &str)
    {
        self.output.push_str(text);
    }
}


impl WordManagement for VorthInterpreter
{
    fn current_location(&self) -> &Option<SourceLocation>
    {
        &self.current_location
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn define_word(&mut self, name: &str, location: SourceLocation, body: BlockBody)
    {
        let _ = self.dictionary.insert(name, location, body);
    }

    fn find_word(&self, word: &str) -> Option<&WordInfo>
    {
        self.dictionary.try_get(word)
    }

    fn execute_word_named(&mut self, location: &SourceLocation, word: &str) -> error::Result<()>
    {
        let name = word.to_lowercase();

        // User words shadow the built-ins.
        let body = self.dictionary.try_get(&name).map(|info| info.body.clone());

        if let Some(body) = body
        {
            self.call_stack.push(CallItem::new(name, location.clone()));

            let result = self.execute_word_body(body);

            let _ = self.call_stack.pop();
            return result;
        }

        match find_built_in(&name)
        {
            Some(built_in) => (built_in.handler)(self),
            None => script_error(self,
                                 ErrorKind::UnknownWord,
                                 format!("can't find word \"{}\" or parse it as number", word))
        }
    }

    fn call_stack(&self) -> &CallStack
    {
        &self.call_stack
    }
}


impl CodeManagement for VorthInterpreter
{
    fn registers(&self) -> &Registers
    {
        &self.frame.registers
    }

    fn registers_mut(&mut self) -> &mut Registers
    {
        &mut self.frame.registers
    }

    fn next_token(&mut self) -> Option<Token>
    {
        let next = self.frame.registers.pc + 1;
        let token = self.frame.tokens.get(next)?.clone();

        self.frame.registers.pc = next;
        Some(token)
    }

    fn execute_tokens(&mut self, tokens: BlockBody) -> error::Result<()>
    {
        self.run_nested(Frame::new(tokens)).map(|_| ())
    }

    fn request_exit(&mut self)
    {
        self.exiting = true;
    }

    fn is_exiting(&self) -> bool
    {
        self.exiting
    }

    fn process_source(&mut self, path: &str, source: &str) -> error::Result<String>
    {
        self.begin_call();

        if self.exiting
        {
            return Ok(String::new());
        }

        let result = tokenize_from_source(path, source).and_then(|tokens| self.run_top_level(tokens));

        self.finish_call(result)
    }

    fn process_source_file(&mut self, path: &str) -> error::Result<String>
    {
        self.begin_call();

        if self.exiting
        {
            return Ok(String::new());
        }

        let result = tokenize_from_file(path).and_then(|tokens| self.run_top_level(tokens));

        self.finish_call(result)
    }
}


impl VorthInterpreter
{
    pub fn new() -> VorthInterpreter
    {
        VorthInterpreter
            {
                stack: ValueStack::new(),
                dictionary: Dictionary::new(),
                output: String::new(),

                current_location: None,
                call_stack: CallStack::with_capacity(40),

                frame: Frame::new(Rc::new(TokenList::new())),
                depth: 0,

                exiting: false
            }
    }

    /// Run a piece of source code, returning the text it wrote.  The stack, dictionary and exit
    /// flag carry over from earlier calls.  On failure the text written before the error is still
    /// available from `output`.
    pub fn parse(&mut self, source: &str) -> error::Result<String>
    {
        self.process_source(PARSE_PATH, source)
    }

    fn begin_call(&mut self)
    {
        self.output.clear();
        self.call_stack.clear();
        self.current_location = None;
        self.depth = 0;
    }

    fn finish_call(&mut self, result: error::Result<()>) -> error::Result<String>
    {
        match result
        {
            Ok(()) => Ok(self.output.clone()),
            Err(error) =>
                {
                    debug!(kind = %error.kind(), "call failed: {}", error.error());
                    Err(error)
                }
        }
    }

    /// Run a frame nested inside the current one, returning the registers it finished with.  The
    /// caller's frame is restored whether or not the run succeeds.
    fn run_nested(&mut self, frame: Frame) -> error::Result<Registers>
    {
        if self.depth >= MAX_CALL_DEPTH
        {
            return script_error(self,
                                ErrorKind::CallDepth,
                                format!("execution nested deeper than {} levels", MAX_CALL_DEPTH));
        }

        self.depth += 1;

        let caller = mem::replace(&mut self.frame, frame);
        let result = self.run_frame();
        let finished = mem::replace(&mut self.frame, caller);

        self.depth -= 1;

        result.map(|_| finished.registers)
    }

    /// Run a user word's body as if it were written in place of the word.  Only the position is
    /// the body's own, skip, last if and repeat are shared with the caller in both directions.
    fn execute_word_body(&mut self, body: BlockBody) -> error::Result<()>
    {
        let registers = Registers { pc: 0, ..self.frame.registers.clone() };
        let finished = self.run_nested(Frame { tokens: body, registers })?;

        let registers = &mut self.frame.registers;

        registers.skip = finished.skip;
        registers.last_if = finished.last_if;
        registers.repeat = finished.repeat;

        Ok(())
    }

    /// Run the tokens of a call as the new top level frame.
    fn run_top_level(&mut self, tokens: TokenList) -> error::Result<()>
    {
        self.frame = Frame::new(Rc::new(tokens));
        self.run_frame()
    }

    /// The main loop.  Walk the current frame's tokens, running each unit unless it is suppressed
    /// by the skip register.
    fn run_frame(&mut self) -> error::Result<()>
    {
        while !self.exiting && self.frame.registers.pc < self.frame.tokens.len()
        {
            let token = self.frame.tokens[self.frame.registers.pc].clone();

            self.current_location = Some(token.location().clone());

            // An inlined word body counts down the skip for its own tokens.
            let inlines_body = self.frame.registers.skip == 0 && self.is_user_word(&token);

            let result = if self.starts_definition(&token)
                {
                    self.run_definition()
                }
                else
                {
                    self.run_unit(&token)
                };

            if let Err(error) = result
            {
                return Err(error.with_context(token.location(), &self.call_stack));
            }

            let registers = &mut self.frame.registers;

            if registers.skip > 0 && !inlines_body
            {
                registers.skip -= 1;
            }

            registers.pc += 1;
        }

        Ok(())
    }

    fn is_user_word(&self, token: &Token) -> bool
    {
        match token
        {
            Token::Word(_, name) => self.dictionary.try_get(name).is_some(),
            _                    => false
        }
    }

    /// A `:` starts a definition unless the user has redefined it.
    fn starts_definition(&self, token: &Token) -> bool
    {
        token.is_word_named(":") && self.dictionary.try_get(":").is_none()
    }

    /// A whole definition is one unit.  When suppressed it is passed over up to it's `;`, and a
    /// pending repeat count does not apply to it.
    fn run_definition(&mut self) -> error::Result<()>
    {
        if self.frame.registers.skip > 0
        {
            while let Some(token) = self.next_token()
            {
                if token.is_word_named(";")
                {
                    return Ok(());
                }
            }

            return script_error_str(self, ErrorKind::Syntax, "definition not closed");
        }

        self.frame.registers.repeat = 1;

        match find_built_in(":")
        {
            Some(built_in) => (built_in.handler)(self),
            None => script_error(self,
                                 ErrorKind::UnknownWord,
                                 "can't find word \":\" or parse it as number".to_string())
        }
    }

    /// Run a single token as many times as the repeat register asks, then reset the register.
    fn run_unit(&mut self, token: &Token) -> error::Result<()>
    {
        if self.frame.registers.skip > 0
        {
            return Ok(());
        }

        let count = mem::replace(&mut self.frame.registers.repeat, 1);

        for _ in 0..count.max(0)
        {
            if self.exiting
            {
                break;
            }

            trace!(token = %token, "executing");
            self.execute_token(token)?;
        }

        Ok(())
    }

    fn execute_token(&mut self, token: &Token) -> error::Result<()>
    {
        match token
        {
            Token::Int(_, value)        => self.push(Value::Int(*value)),
            Token::Float(_, value)      => self.push(Value::Float(*value)),
            Token::String(_, value)     => self.push(Value::String(value.clone())),
            Token::Block(_, body)       => return self.execute_tokens(body.clone()),
            Token::Word(location, name) => return self.execute_word_named(location, name)
        }

        Ok(())
    }
}


impl Default for VorthInterpreter
{
    fn default() -> Self
    {
        Self::new()
    }
}
