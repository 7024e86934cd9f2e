use log::debug;

use crate::ast::scanner::{scan_identifier, scan_literal, skip_spaces};
use crate::ast::{Expression, Operand, Operator};
use crate::error::{ParseError, ParseResult};

impl Expression {
    /// Parses a formula string into an expression.
    ///
    /// The parser is a two-state machine: it alternates between scanning an
    /// operand (function call, literal, or variable, tried in that order) and
    /// a binary operator, skipping whitespace between tokens. Free-standing
    /// parenthesized grouping is not part of the grammar; grouping happens
    /// through function-argument lists.
    pub fn parse(input: &str) -> ParseResult<Expression> {
        debug!("parsing formula: {input}");

        let mut operands: Vec<Operand> = Vec::new();
        let mut operators: Vec<Operator> = Vec::new();
        let mut pos = 0;
        let mut expect_operand = true;

        loop {
            skip_spaces(input, &mut pos);
            if pos >= input.len() {
                break;
            }
            if expect_operand {
                operands.push(parse_operand(input, &mut pos)?);
                expect_operand = false;
            } else {
                match Operator::from_symbol(input.as_bytes()[pos]) {
                    Some(operator) => {
                        operators.push(operator);
                        pos += 1;
                        expect_operand = true;
                    }
                    None => return Err(ParseError::ExpectedOperator(pos)),
                }
            }
        }

        if operands.is_empty() {
            return Err(ParseError::EmptyFormula);
        }
        if expect_operand {
            // The input ended right after an operator.
            return Err(ParseError::MissingOperand);
        }
        debug_assert_eq!(operands.len(), operators.len() + 1);
        Ok(Expression {
            operands,
            operators,
        })
    }
}

/// Tries the operand alternatives in order. A single character of lookahead
/// distinguishes them, so no backtracking across kinds is needed beyond
/// resetting the cursor when an identifier turns out not to start a call.
fn parse_operand(input: &str, pos: &mut usize) -> ParseResult<Operand> {
    if let Some(call) = scan_function_call(input, pos)? {
        return Ok(call);
    }
    if let Some(value) = scan_literal(input, pos) {
        return Ok(Operand::Literal(value));
    }
    if let Some(name) = scan_identifier(input, pos) {
        return Ok(Operand::Variable(name.to_string()));
    }
    Err(ParseError::ExpectedOperand(*pos))
}

/// Scans `name(arg, ...)`. Returns `Ok(None)` when the cursor is not at a
/// function call at all (no identifier, or an identifier without a following
/// `(`), leaving the cursor untouched so the literal and variable scanners
/// get their turn.
fn scan_function_call(input: &str, pos: &mut usize) -> ParseResult<Option<Operand>> {
    let start = *pos;
    let Some(name) = scan_identifier(input, pos) else {
        return Ok(None);
    };
    let mut cursor = *pos;
    skip_spaces(input, &mut cursor);
    if input.as_bytes().get(cursor) != Some(&b'(') {
        *pos = start;
        return Ok(None);
    }
    cursor += 1;

    let args = scan_arguments(input, name, &mut cursor)?;
    *pos = cursor;
    Ok(Some(Operand::FunctionCall {
        name: name.to_string(),
        args,
    }))
}

/// Consumes a balanced argument list, the opening `(` already eaten. A comma
/// at nesting depth 1 separates top-level arguments; each argument substring
/// is parsed recursively as a full expression.
fn scan_arguments(input: &str, name: &str, pos: &mut usize) -> ParseResult<Vec<Operand>> {
    let bytes = input.as_bytes();
    let mut args: Vec<Operand> = Vec::new();
    let mut depth = 1u32;
    let mut arg_start = *pos;

    while let Some(&byte) = bytes.get(*pos) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    args.push(parse_argument(input, name, arg_start, *pos, args.len())?);
                    *pos += 1;
                    return Ok(args);
                }
            }
            b',' if depth == 1 => {
                args.push(parse_argument(input, name, arg_start, *pos, args.len())?);
                arg_start = *pos + 1;
            }
            _ => {}
        }
        *pos += 1;
    }

    Err(ParseError::UnterminatedCall(name.to_string()))
}

fn parse_argument(
    input: &str,
    name: &str,
    start: usize,
    end: usize,
    index: usize,
) -> ParseResult<Operand> {
    let text = &input[start..end];
    if text.trim().is_empty() {
        return Err(ParseError::EmptyArgument {
            name: name.to_string(),
            index,
        });
    }
    Ok(Operand::Expression(Expression::parse(text)?))
}
