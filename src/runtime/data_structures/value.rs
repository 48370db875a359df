use std::{ cmp::Ordering,
           fmt::{ self,
                   Display,
                   Formatter } };
use crate::runtime::error::{ self,
                             ErrorKind,
                             ScriptError };



/// The longest string, in bytes, that repeating text with `*` or `spaces` may build.
pub const MAX_STRING_LENGTH: usize = 256 * 1024 * 1024;



/// Core value enumeration used by the interpreter.  Every slot of the data stack holds exactly one
/// of these.
#[derive(Clone, Debug, PartialEq)]
pub enum Value
{
    /// We have an integer value.  Represented as an i64.
    Int(i64),

    /// A floating-point value  Represented as a f64.
    Float(f64),

    /// A string value, represented by a Rust string.
    String(String)
}


/// The comparison operators understood by Value::compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison
{
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual
}


/// Convert an arbitrary data type to a Value.
pub trait ToValue
{
    /// Implement to handle the actual conversion.
    fn to_value(&self) -> Value;
}


/// The textual form of the value.  This is what `.` prints and what strings are concatenated
/// with.  Integral floats keep a trailing `.0` so that they can be told apart from integers.
impl Display for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Value::Int(value)    => write!(f, "{}", value),
            Value::Float(value)  =>
                {
                    if value.is_finite() && value.fract() == 0.0
                    {
                        write!(f, "{:.1}", value)
                    }
                    else
                    {
                        write!(f, "{}", value)
                    }
                },
            Value::String(value) => write!(f, "{}", value)
        }
    }
}


/// Define implementations for converting between Values and the raw data types they represent.
macro_rules! value_conversion
{
    ($data_type:ty , $variant:ident , $as_ident:ident) =>
    {
        #[doc = concat!("Convert a value to ", stringify!($data_type), ".")]
        impl Value
        {
            pub fn $as_ident(&self) -> error::Result<&$data_type>
            {
                match self
                {
                    Value::$variant(value) => Ok(value),
                    _ => ScriptError::new_as_result(ErrorKind::Type,
                                                    None,
                                                    format!("expected {} value, got {}",
                                                            Value::$variant(Default::default())
                                                                .type_name(),
                                                            self.type_name()),
                                                    None)
                }
            }
        }


        #[doc = concat!("Allow conversion from ", stringify!($data_type), " to a Value.")]
        impl ToValue for $data_type
        {
            fn to_value(&self) -> Value
            {
                Value::$variant(self.clone())
            }
        }

    };
}


// Implement the simple conversions for the value enumeration types.
value_conversion!(i64,    Int,    as_int);
value_conversion!(f64,    Float,  as_float);
value_conversion!(String, String, as_string);


/// Comparison results are pushed as integers.
impl ToValue for bool
{
    fn to_value(&self) -> Value
    {
        Value::Int(if *self { 1 } else { 0 })
    }
}


impl ToValue for &str
{
    fn to_value(&self) -> Value
    {
        Value::String((*self).to_string())
    }
}


impl ToValue for usize
{
    fn to_value(&self) -> Value
    {
        Value::Int(*self as i64)
    }
}


/// Create a type error for the given operator and operands.
fn type_error<T>(operator: &str, a: &Value, b: &Value) -> error::Result<T>
{
    ScriptError::new_as_result(ErrorKind::Type,
                               None,
                               format!("can't apply {} to {} and {}",
                                       operator,
                                       a.type_name(),
                                       b.type_name()),
                               None)
}


/// Check that a string about to be built stays within MAX_STRING_LENGTH bytes.  None means the
/// length overflowed while being computed.
pub fn check_string_length(length: Option<usize>, operator: &str) -> error::Result<()>
{
    match length
    {
        Some(length) if length <= MAX_STRING_LENGTH => Ok(()),
        _ => ScriptError::new_as_result(ErrorKind::Limit,
                                        None,
                                        format!("{} would build a string longer than {} bytes",
                                                operator,
                                                MAX_STRING_LENGTH),
                                        None)
    }
}


fn division_by_zero<T>(operator: &str) -> error::Result<T>
{
    ScriptError::new_as_result(ErrorKind::DivisionByZero,
                               None,
                               format!("division by zero in {}", operator),
                               None)
}


impl Value
{
    /// Is the value a string?
    pub fn is_string(&self) -> bool
    {
        matches!(self, Value::String(_))
    }

    /// Is either of the two values a string?
    pub fn either_is_string(a: &Value, b: &Value) -> bool
    {
        a.is_string() || b.is_string()
    }

    /// Is the value any kind of numeric variant type?
    pub fn is_numeric(&self) -> bool
    {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Are both values numeric types?
    pub fn both_are_numeric(a: &Value, b: &Value) -> bool
    {
        a.is_numeric() && b.is_numeric()
    }

    /// The name of the value's type as reported by the `type` word.
    pub fn type_name(&self) -> &'static str
    {
        match self
        {
            Value::Int(_)    => "int",
            Value::Float(_)  => "float",
            Value::String(_) => "string"
        }
    }

    /// Numbers are true when they're not zero, strings when they're not empty.
    pub fn is_truthy(&self) -> bool
    {
        match self
        {
            Value::Int(value)    => *value != 0,
            Value::Float(value)  => *value != 0.0,
            Value::String(value) => !value.is_empty()
        }
    }

    /// Convert a numeric value to a float.  Only meaningful for values passing is_numeric().
    fn get_float_val(&self) -> f64
    {
        match self
        {
            Value::Int(value)   => *value as f64,
            Value::Float(value) => *value,
            Value::String(_)    => f64::NAN
        }
    }

    /// Is the value a numeric zero?
    fn is_zero(&self) -> bool
    {
        match self
        {
            Value::Int(value)   => *value == 0,
            Value::Float(value) => *value == 0.0,
            Value::String(_)    => false
        }
    }
}


/// Helper function to handle numeric operations.  Handlers for int or floating point operations are
/// passed in as arguments.  Mixing an int with a float promotes the int.
fn math_op(a: &Value,
           b: &Value,
           operator: &str,
           fop: fn(f64, f64) -> f64,
           iop: fn(i64, i64) -> i64) -> error::Result<Value>
{
    match ( a, b )
    {
        ( Value::Int(a), Value::Int(b) )     => Ok(Value::Int(iop(*a, *b))),
        _ if Value::both_are_numeric(a, b) => Ok(Value::Float(fop(a.get_float_val(),
                                                                  b.get_float_val()))),
        _                                  => type_error(operator, a, b)
    }
}


impl Value
{
    /// `a b +`, numeric sum, or the concatenation of both textual forms if either is a string.
    pub fn add(&self, other: &Value) -> error::Result<Value>
    {
        if Value::either_is_string(self, other)
        {
            return Ok(Value::String(format!("{}{}", self, other)));
        }

        math_op(self, other, "+", |a, b| a + b, i64::wrapping_add)
    }

    /// `a b -`, numeric difference.  With a string on the left every occurrence of the right
    /// operand's textual form is deleted from it.
    pub fn subtract(&self, other: &Value) -> error::Result<Value>
    {
        if let Value::String(text) = self
        {
            let pattern = other.to_string();

            if pattern.is_empty()
            {
                return Ok(self.clone());
            }

            return Ok(Value::String(text.replace(&pattern, "")));
        }

        math_op(self, other, "-", |a, b| a - b, i64::wrapping_sub)
    }

    /// `a b *`, numeric product, or a string repeated an integer number of times.
    pub fn multiply(&self, other: &Value) -> error::Result<Value>
    {
        match ( self, other )
        {
            ( Value::String(text), Value::Int(count) ) |
            ( Value::Int(count), Value::String(text) ) =>
                {
                    let count = usize::try_from(*count).unwrap_or(0);

                    check_string_length(text.len().checked_mul(count), "*")?;
                    Ok(Value::String(text.repeat(count)))
                },

            _ => math_op(self, other, "*", |a, b| a * b, i64::wrapping_mul)
        }
    }

    /// `a b /`, true division, always a float for numbers.  A string divided by an integer is cut
    /// into chunks of that many characters, so this can produce any number of values.
    pub fn divide(&self, other: &Value) -> error::Result<Vec<Value>>
    {
        match ( self, other )
        {
            ( Value::String(text), Value::Int(size) ) =>
                {
                    if *size <= 0
                    {
                        return ScriptError::new_as_result(ErrorKind::Type,
                                                          None,
                                                          format!("can't split a string into \
                                                                   chunks of size {}", size),
                                                          None);
                    }

                    let characters: Vec<char> = text.chars().collect();
                    let size = usize::try_from(*size).unwrap_or(usize::MAX);

                    Ok(characters.chunks(size)
                                 .map(|chunk| Value::String(chunk.iter().collect()))
                                 .collect())
                },

            _ if Value::both_are_numeric(self, other) =>
                {
                    if other.is_zero()
                    {
                        return division_by_zero("/");
                    }

                    Ok(vec![ Value::Float(self.get_float_val() / other.get_float_val()) ])
                },

            _ => type_error("/", self, other)
        }
    }

    /// `a b //`, division truncated toward zero.  Integers stay integers, a float operand gives
    /// the truncated quotient as a float.
    pub fn int_divide(&self, other: &Value) -> error::Result<Value>
    {
        if Value::both_are_numeric(self, other) && other.is_zero()
        {
            return division_by_zero("//");
        }

        math_op(self, other, "//", |a, b| (a / b).trunc(), i64::wrapping_div)
    }

    /// `a b %`, the remainder of integer division, carrying the sign of the dividend.
    pub fn remainder(&self, other: &Value) -> error::Result<Value>
    {
        match ( self, other )
        {
            ( Value::Int(_), Value::Int(0) ) => division_by_zero("%"),
            ( Value::Int(a), Value::Int(b) ) => Ok(Value::Int(a.wrapping_rem(*b))),
            _                                => type_error("%", self, other)
        }
    }

    /// Compare two values.  Numbers compare numerically, strings lexicographically.  Strings and
    /// numbers are never equal, and can't be ordered against each other.
    pub fn compare(&self, other: &Value, comparison: Comparison) -> error::Result<bool>
    {
        let ordering = match ( self, other )
            {
                ( Value::Int(a), Value::Int(b) )       => Some(a.cmp(b)),
                ( Value::String(a), Value::String(b) ) => Some(a.cmp(b)),
                _ if Value::both_are_numeric(self, other) =>
                    self.get_float_val().partial_cmp(&other.get_float_val()),
                _ => None
            };

        let result = match ( comparison, ordering )
            {
                ( Comparison::Equal, ordering )          => ordering == Some(Ordering::Equal),
                ( Comparison::NotEqual, ordering )       => ordering != Some(Ordering::Equal),
                ( Comparison::Less, Some(ordering) )     => ordering == Ordering::Less,
                ( Comparison::LessEqual, Some(ordering) )    => ordering != Ordering::Greater,
                ( Comparison::Greater, Some(ordering) )  => ordering == Ordering::Greater,
                ( Comparison::GreaterEqual, Some(ordering) ) => ordering != Ordering::Less,
                ( _, None ) => return type_error("comparison", self, other)
            };

        Ok(result)
    }
}


impl Value
{
    /// Convert a string to a string that could be used directly within source code.  For example,
    /// new lines are converted to the \n escape sequence, etc.  The string is also enclosed in
    /// double quotes.
    ///
    /// Mainly used for stack printing.
    pub fn stringify(text: &str) -> String
    {
        let mut result = String::new();

        result.push('"');

        for character in text.chars() {
            match character {
                '"'  => result.push_str("\\\""),
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                '\\' => result.push_str("\\\\"),
                _    => result.push(character)
            }
        }

        result.push('"');

        result
    }

    /// The form used in stack listings, strings are quoted.
    pub fn listing_form(&self) -> String
    {
        match self
        {
            Value::String(text) => Value::stringify(text),
            _                   => self.to_string()
        }
    }
}
