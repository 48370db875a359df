// Table driven tests of the interpreter's words, run through the public parse API.


use test_case::test_case;
use vorth::runtime::data_structures::value::Value;
use vorth::runtime::error::{ErrorKind, Result};
use vorth::runtime::interpreter::vorth_interpreter::VorthInterpreter;
use vorth::runtime::interpreter::{InterpreterStack, OutputManagement, WordManagement};

fn run(source: &str) -> Result<String> {
    let mut interpreter = VorthInterpreter::new();

    interpreter.parse(source)
}

fn stack_after(source: &str) -> String {
    let mut interpreter = VorthInterpreter::new();

    interpreter.parse(source).unwrap();
    interpreter.stack().to_string()
}

fn error_kind(source: &str) -> ErrorKind {
    *run(source).unwrap_err().kind()
}


#[test_case("42 .", "42"; "decimal")]
#[test_case("-42 .", "-42"; "negative decimal")]
#[test_case("0x1F .", "31"; "hex")]
#[test_case("0xff .", "255"; "hex lower case digits")]
#[test_case("-0x1F .", "-31"; "negative hex")]
#[test_case("0o17 .", "15"; "octal")]
#[test_case("-0o17 .", "-15"; "negative octal")]
#[test_case("0b101 .", "5"; "binary")]
#[test_case("-0b101 .", "-5"; "negative binary")]
#[test_case("9223372036854775807 .", "9223372036854775807"; "largest integer")]
#[test_case("-9223372036854775808 .", "-9223372036854775808"; "smallest integer")]
#[test_case("-0x8000000000000000 .", "-9223372036854775808"; "smallest integer in hex")]
#[test_case("1.5 .", "1.5"; "float")]
#[test_case("-0.25 .", "-0.25"; "negative float")]
#[test_case("2.0 .", "2.0"; "integral float keeps its point")]
fn number_literals(source: &str, expected: &str) {
    assert_eq!(run(source).unwrap(), expected);
}


#[test_case("2 3 + .", "5"; "add ints")]
#[test_case("2 0.5 + .", "2.5"; "add promotes to float")]
#[test_case("\"ab\" \"cd\" + .", "abcd"; "concatenate")]
#[test_case("\"a\" 1 + .", "a1"; "concatenate number on the right")]
#[test_case("1.5 \"a\" + .", "1.5a"; "concatenate number on the left")]
#[test_case("10 4 - .", "6"; "subtract")]
#[test_case("\"banana\" \"an\" - .", "ba"; "subtract deletes substrings")]
#[test_case("\"a1b1\" 1 - .", "ab"; "subtract deletes number text")]
#[test_case("6 7 * .", "42"; "multiply")]
#[test_case("\"ab\" 3 * .", "ababab"; "repeat string")]
#[test_case("3 \"ab\" * .", "ababab"; "repeat string count first")]
#[test_case("\"ab\" -1 * .", ""; "negative repeat is empty")]
#[test_case("1 2 / .", "0.5"; "divide gives float")]
#[test_case("4 2 / .", "2.0"; "divide integral result")]
#[test_case("7 2 // .", "3"; "int divide")]
#[test_case("-7 2 // .", "-3"; "int divide truncates toward zero")]
#[test_case("7.5 2 // .", "3.0"; "int divide with float")]
#[test_case("7 2 % .", "1"; "remainder")]
#[test_case("-7 2 % .", "-1"; "remainder has sign of dividend")]
#[test_case("7 2 mod .", "1"; "mod alias")]
#[test_case("9223372036854775807 1 + .", "-9223372036854775808"; "add wraps")]
fn arithmetic(source: &str, expected: &str) {
    assert_eq!(run(source).unwrap(), expected);
}


#[test]
fn divide_mod_pushes_remainder_then_quotient() {
    assert_eq!(stack_after("13 5 /mod"), "[3, 2]");
}

#[test]
fn string_divide_pushes_every_chunk() {
    assert_eq!(stack_after("\"abcde\" 2 /"), "[\"ab\", \"cd\", \"e\"]");
    assert_eq!(stack_after("\"\" 3 /"), "[]");
}


#[test_case("1 2 < .", "1"; "less")]
#[test_case("2 1 < .", "0"; "not less")]
#[test_case("2 2 <= .", "1"; "less equal")]
#[test_case("1.5 1 > .", "1"; "greater mixed")]
#[test_case("1 1 >= .", "1"; "greater equal")]
#[test_case("2 2.0 = .", "1"; "int equals float")]
#[test_case("2 3 != .", "1"; "not equal")]
#[test_case("\"a\" \"b\" < .", "1"; "strings order")]
#[test_case("\"abc\" \"abc\" = .", "1"; "strings equal")]
#[test_case("\"1\" 1 = .", "0"; "string never equals number")]
#[test_case("\"1\" 1 != .", "1"; "string always differs from number")]
fn comparisons(source: &str, expected: &str) {
    assert_eq!(run(source).unwrap(), expected);
}


#[test_case("5 dup", "[5, 5]"; "dup")]
#[test_case("1 2 drop", "[1]"; "drop")]
#[test_case("1 2 swap", "[2, 1]"; "swap")]
#[test_case("1 2 over", "[1, 2, 1]"; "over")]
#[test_case("1 2 3 rot", "[2, 3, 1]"; "rot")]
#[test_case("1 2 3 reverse", "[3, 2, 1]"; "reverse")]
#[test_case("reverse", "[]"; "reverse empty")]
#[test_case("1 2 2dup", "[1, 2, 1, 2]"; "two dup")]
#[test_case("1 2 2drop", "[]"; "two drop")]
#[test_case("1 2 3 4 2swap", "[3, 4, 1, 2]"; "two swap")]
#[test_case("1 2 3 4 2over", "[1, 2, 3, 4, 1, 2]"; "two over")]
#[test_case("7 7 depth", "[7, 7, 2]"; "depth")]
#[test_case("1 \"a b\" 2.5", "[1, \"a b\", 2.5]"; "listing quotes strings")]
fn stack_words(source: &str, expected: &str) {
    assert_eq!(stack_after(source), expected);
}


#[test_case("65 chr .", "A"; "chr")]
#[test_case("\"abc\" ord .", "97"; "ord")]
#[test_case("1 type .", "int"; "type of int")]
#[test_case("1.0 type .", "float"; "type of float")]
#[test_case("\"x\" type .", "string"; "type of string")]
#[test_case("1 . br 2 .", "1\n2"; "br")]
#[test_case("1 . cr 2 .", "1\n2"; "cr")]
#[test_case("1 . space 2 .", "1 2"; "space")]
#[test_case("3 spaces", "   "; "spaces")]
#[test_case("-2 spaces", ""; "negative spaces")]
#[test_case("72 emit 105 emit", "Hi"; "emit")]
#[test_case("1 \"x\" .stack", "[1, \"x\"]"; "stack listing")]
#[test_case("1 2 .s", "[1, 2]"; "stack listing alias")]
#[test_case("\"a\\\"b\" .stack", "[\"a\\\"b\"]"; "stack listing escapes quotes")]
fn value_and_output_words(source: &str, expected: &str) {
    assert_eq!(run(source).unwrap(), expected);
}


#[test_case("\"hello\" .", "hello"; "one chunk string")]
#[test_case("\"hello world\" .", "hello world"; "spanning string")]
#[test_case("\"a  b\" .", "a  b"; "whitespace kept")]
#[test_case("\" \\\" \" .", " \" "; "escaped quote across chunks")]
#[test_case("\"say \\\"hi\\\"\" .", "say \"hi\""; "escaped quotes")]
#[test_case("\"a\\nb\" .", "a\\nb"; "other backslashes are literal")]
#[test_case("\"a # b\" .", "a # b"; "hash inside string")]
#[test_case("\"{ x }\" .", "{ x }"; "braces inside string")]
#[test_case("1 # the rest is ignored\n2 + .", "3"; "comment")]
#[test_case("5#x\n.", "5"; "comment inside chunk")]
fn strings_and_comments(source: &str, expected: &str) {
    assert_eq!(run(source).unwrap(), expected);
}


#[test_case("+", ErrorKind::StackUnderflow; "add with empty stack")]
#[test_case("5 +", ErrorKind::StackUnderflow; "add with one value")]
#[test_case("drop", ErrorKind::StackUnderflow; "drop")]
#[test_case("1 swap", ErrorKind::StackUnderflow; "swap")]
#[test_case("1 2 rot", ErrorKind::StackUnderflow; "rot")]
#[test_case("1 2 3 2over", ErrorKind::StackUnderflow; "two over")]
#[test_case(".", ErrorKind::StackUnderflow; "print")]
#[test_case("if", ErrorKind::StackUnderflow; "if")]
#[test_case("\"a\" 1 <", ErrorKind::Type; "ordering string and number")]
#[test_case("1 \"a\" -", ErrorKind::Type; "subtract string from number")]
#[test_case("\"a\" \"b\" *", ErrorKind::Type; "multiply strings")]
#[test_case("\"a\" 1.5 *", ErrorKind::Type; "multiply string by float")]
#[test_case("1.5 2 %", ErrorKind::Type; "remainder of float")]
#[test_case("\"abc\" 0 /", ErrorKind::Type; "zero chunk size")]
#[test_case("1 \"a\" /", ErrorKind::Type; "divide by string")]
#[test_case("\"ab\" 2 //", ErrorKind::Type; "int divide string")]
#[test_case("\"a\" chr", ErrorKind::Type; "chr of string")]
#[test_case("-1 chr", ErrorKind::Type; "chr of bad code")]
#[test_case("1 ord", ErrorKind::Type; "ord of int")]
#[test_case("\"\" ord", ErrorKind::Type; "ord of empty string")]
#[test_case("\"3\" spaces", ErrorKind::Type; "spaces of string")]
#[test_case("1.5 times 1", ErrorKind::Type; "times of float")]
#[test_case("1 0 /", ErrorKind::DivisionByZero; "divide by zero")]
#[test_case("1.0 0.0 /", ErrorKind::DivisionByZero; "float divide by zero")]
#[test_case("1 0 //", ErrorKind::DivisionByZero; "int divide by zero")]
#[test_case("1 0 %", ErrorKind::DivisionByZero; "remainder by zero")]
#[test_case("1 0 /mod", ErrorKind::DivisionByZero; "divide mod by zero")]
#[test_case("frobnicate", ErrorKind::UnknownWord; "unknown word")]
#[test_case("0x", ErrorKind::UnknownWord; "prefix without digits")]
#[test_case("1.", ErrorKind::UnknownWord; "float without fraction")]
#[test_case(";", ErrorKind::Syntax; "stray semicolon")]
#[test_case("}", ErrorKind::Syntax; "stray close brace")]
#[test_case("\"abc", ErrorKind::Lex; "string not closed")]
#[test_case("{ 1 2", ErrorKind::Lex; "block not closed")]
#[test_case("99999999999999999999", ErrorKind::Lex; "integer too large")]
fn error_kinds(source: &str, expected: ErrorKind) {
    assert_eq!(error_kind(source), expected);
}


#[test_case("-"; "subtract with empty stack")]
#[test_case("1 -"; "subtract with one value")]
#[test_case("*"; "multiply with empty stack")]
#[test_case("1 *"; "multiply with one value")]
#[test_case("/"; "divide with empty stack")]
#[test_case("1 /"; "divide with one value")]
#[test_case("//"; "int divide with empty stack")]
#[test_case("1 //"; "int divide with one value")]
#[test_case("%"; "remainder with empty stack")]
#[test_case("1 %"; "remainder with one value")]
#[test_case("mod"; "mod with empty stack")]
#[test_case("1 mod"; "mod with one value")]
#[test_case("/mod"; "divide mod with empty stack")]
#[test_case("1 /mod"; "divide mod with one value")]
#[test_case("="; "equal with empty stack")]
#[test_case("1 ="; "equal with one value")]
#[test_case("!="; "not equal with empty stack")]
#[test_case("1 !="; "not equal with one value")]
#[test_case("<"; "less with empty stack")]
#[test_case("1 <"; "less with one value")]
#[test_case("<="; "less or equal with empty stack")]
#[test_case("1 <="; "less or equal with one value")]
#[test_case(">"; "greater with empty stack")]
#[test_case("1 >"; "greater with one value")]
#[test_case(">="; "greater or equal with empty stack")]
#[test_case("1 >="; "greater or equal with one value")]
#[test_case("dup"; "dup with empty stack")]
#[test_case("chr"; "chr with empty stack")]
#[test_case("ord"; "ord with empty stack")]
#[test_case("type"; "type with empty stack")]
#[test_case("spaces"; "spaces with empty stack")]
#[test_case("emit"; "emit with empty stack")]
#[test_case("times"; "times with empty stack")]
#[test_case("over"; "over with empty stack")]
#[test_case("1 over"; "over short of values")]
#[test_case("2dup"; "two dup with empty stack")]
#[test_case("1 2dup"; "two dup short of values")]
#[test_case("2drop"; "two drop with empty stack")]
#[test_case("1 2drop"; "two drop short of values")]
#[test_case("2swap"; "two swap with empty stack")]
#[test_case("1 2 3 2swap"; "two swap short of values")]
fn missing_operands(source: &str) {
    assert_eq!(error_kind(source), ErrorKind::StackUnderflow);
}


#[test_case("9223372036854775807 spaces", "[9223372036854775807]"; "spaces")]
#[test_case("\"ab\" 9223372036854775807 *", "[\"ab\", 9223372036854775807]"; "repeat string")]
#[test_case("9223372036854775807 \"ab\" *", "[9223372036854775807, \"ab\"]"; "repeat string with count first")]
fn oversized_strings_are_refused(source: &str, stack: &str) {
    let mut interpreter = VorthInterpreter::new();
    let error = interpreter.parse(source).unwrap_err();

    assert_eq!(*error.kind(), ErrorKind::Limit);
    assert_eq!(interpreter.stack().to_string(), stack);
}


#[test]
fn five_five_add_succeeds() {
    assert_eq!(stack_after("5 5 +"), "[10]");
}

#[test]
fn failed_word_leaves_its_operands() {
    let mut interpreter = VorthInterpreter::new();

    assert!(interpreter.parse("1 \"a\" <").is_err());
    assert_eq!(interpreter.parse(".stack").unwrap(), "[1, \"a\"]");

    assert!(interpreter.parse("\"b\" chr").is_err());
    assert_eq!(interpreter.stack().len(), 3);
}

#[test]
fn unknown_word_message() {
    let error = run("1 2 Frobnicate").unwrap_err();

    assert_eq!(error.error(), "can't find word \"Frobnicate\" or parse it as number");
}

#[test]
fn lex_error_messages() {
    assert_eq!(run("\"abc").unwrap_err().error(), "string not closed");
    assert_eq!(run("{ 1 2").unwrap_err().error(), "block not closed");
}

#[test]
fn errors_carry_their_location() {
    let error = run("1 2\n  foo").unwrap_err();
    let location = error.location().clone().unwrap();

    assert_eq!(location.path(), "<parse>");
    assert_eq!(location.line(), 2);
    assert_eq!(location.column(), 3);
    assert!(error.to_string().starts_with("<parse> (2, 3): "));
}

#[test]
fn errors_carry_the_call_stack() {
    let error = run(": inner missing ; : outer inner ; outer").unwrap_err();
    let call_stack = error.call_stack().clone().unwrap();
    let words: Vec<&str> = call_stack.iter().map(|item| item.word().as_str()).collect();

    assert_eq!(words, vec!["outer", "inner"]);
    assert!(error.to_string().contains("Call stack"));
}

#[test]
fn words_are_case_insensitive() {
    assert_eq!(run("1 2 SWAP .stack").unwrap(), "[2, 1]");
    assert_eq!(run(": Double dup + ; 3 DOUBLE .").unwrap(), "6");
}

#[test]
fn stack_persists_between_calls() {
    let mut interpreter = VorthInterpreter::new();

    assert_eq!(interpreter.parse("1 2").unwrap(), "");
    assert_eq!(interpreter.parse("+ .").unwrap(), "3");
    assert!(interpreter.stack().is_empty());
}

#[test]
fn output_is_kept_after_an_error() {
    let mut interpreter = VorthInterpreter::new();

    assert!(interpreter.parse("1 . 2 . nope 3 .").is_err());
    assert_eq!(interpreter.output(), "12");

    assert_eq!(interpreter.parse("4 .").unwrap(), "4");
    assert_eq!(interpreter.output(), "4");
}

#[test]
fn push_and_peek_through_the_stack_trait() {
    let mut interpreter = VorthInterpreter::new();

    interpreter.push(Value::Int(3));
    interpreter.push(Value::String("x".to_string()));

    assert_eq!(interpreter.peek(1).unwrap(), Value::Int(3));
    assert_eq!(*interpreter.peek(2).unwrap_err().kind(), ErrorKind::StackUnderflow);
    assert_eq!(*interpreter.pop_as_int().unwrap_err().kind(), ErrorKind::Type);
    assert_eq!(interpreter.pop_as_string().unwrap(), "x");
    assert_eq!(interpreter.pop_as_int().unwrap(), 3);
}

#[test]
fn stack_tracks_max_depth() {
    let mut interpreter = VorthInterpreter::new();

    interpreter.parse("1 2 3 drop drop").unwrap();

    assert_eq!(interpreter.stack().len(), 1);
    assert_eq!(interpreter.stack().max_depth(), 3);
}

#[test]
fn no_user_words_at_start() {
    let interpreter = VorthInterpreter::default();

    assert!(interpreter.dictionary().is_empty());
    assert!(interpreter.find_word("dup").is_none());
}
