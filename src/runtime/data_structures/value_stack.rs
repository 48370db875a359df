use std::fmt::{ self, Display, Formatter };
use crate::runtime::{ data_structures::value::Value,
                      error::{ self, ErrorKind, ScriptError } };



/// The data stack of values managed by the interpreter.  Values are only added and removed at the
/// top, but can be read at any depth.  Reading past the bottom of the stack is a stack underflow
/// error, never a panic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueStack
{
    /// The values, oldest first.
    items: Vec<Value>,

    /// The maximum depth the stack has reached so far.
    max_depth: usize
}


fn stack_underflow<T>() -> error::Result<T>
{
    ScriptError::new_as_result(ErrorKind::StackUnderflow, None, "stack underflow".to_string(), None)
}


/// The listing used by `.stack`, oldest value first: `[1, 2.5, "abc"]`.
impl Display for ValueStack
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "[")?;

        for ( index, value ) in self.items.iter().enumerate()
        {
            if index > 0
            {
                write!(f, ", ")?;
            }

            write!(f, "{}", value.listing_form())?;
        }

        write!(f, "]")
    }
}


impl ValueStack
{
    pub fn new() -> ValueStack
    {
        ValueStack
            {
                items: Vec::with_capacity(20),
                max_depth: 0
            }
    }

    /// Push a value onto the top of the stack.
    pub fn push(&mut self, value: Value)
    {
        self.items.push(value);

        if self.items.len() > self.max_depth
        {
            self.max_depth = self.items.len();
        }
    }

    /// Remove and return the top value.
    pub fn pop(&mut self) -> error::Result<Value>
    {
        match self.items.pop()
        {
            Some(value) => Ok(value),
            None => stack_underflow()
        }
    }

    /// Read the value `depth` places down from the top, `peek(0)` being the top itself.
    pub fn peek(&self, depth: usize) -> error::Result<&Value>
    {
        if depth >= self.items.len()
        {
            return stack_underflow();
        }

        Ok(&self.items[self.items.len() - 1 - depth])
    }

    /// Make sure that at least `count` values are on the stack.  Words check this before touching
    /// the stack so that a failing word leaves it's operands alone.
    pub fn require(&self, count: usize) -> error::Result<()>
    {
        if self.items.len() < count
        {
            return stack_underflow();
        }

        Ok(())
    }

    /// Reverse the whole stack in place.
    pub fn reverse(&mut self)
    {
        self.items.reverse();
    }

    /// How many values are on the stack.
    pub fn len(&self) -> usize
    {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.items.is_empty()
    }

    /// The deepest the stack has been.
    pub fn max_depth(&self) -> usize
    {
        self.max_depth
    }

    /// Remove every value.
    pub fn clear(&mut self)
    {
        self.items.clear();
    }
}


#[cfg(test)]
mod tests
{
    use super::*;

    fn stack_of(values: &[i64]) -> ValueStack
    {
        let mut stack = ValueStack::new();

        for value in values
        {
            stack.push(Value::Int(*value));
        }

        stack
    }

    #[test]
    fn pop_is_last_in_first_out()
    {
        let mut stack = stack_of(&[1, 2]);

        assert_eq!(stack.pop().unwrap(), Value::Int(2));
        assert_eq!(stack.pop().unwrap(), Value::Int(1));
        assert_eq!(*stack.pop().unwrap_err().kind(), ErrorKind::StackUnderflow);
    }

    #[test]
    fn peek_counts_from_the_top()
    {
        let stack = stack_of(&[1, 2, 3]);

        assert_eq!(*stack.peek(0).unwrap(), Value::Int(3));
        assert_eq!(*stack.peek(2).unwrap(), Value::Int(1));
        assert_eq!(*stack.peek(3).unwrap_err().kind(), ErrorKind::StackUnderflow);
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn reverse_and_listing()
    {
        let mut stack = stack_of(&[1, 2]);

        stack.push(Value::String("a b".to_string()));
        stack.push(Value::Float(1.5));
        stack.reverse();

        assert_eq!(stack.to_string(), "[1.5, \"a b\", 2, 1]");
        assert_eq!(ValueStack::new().to_string(), "[]");
    }

    #[test]
    fn max_depth_is_tracked()
    {
        let mut stack = stack_of(&[1, 2, 3]);

        let _ = stack.pop();
        let _ = stack.pop();

        assert_eq!(stack.max_depth(), 3);
        assert!(stack.require(2).is_err());
        assert!(stack.require(1).is_ok());
    }
}
