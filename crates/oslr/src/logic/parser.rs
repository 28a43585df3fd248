//! Text syntax for literals, Horn clauses and candidate pools
//!
//! ```text
//! literal  ::= ["~" | "not "] name ["(" [term ("," term)*] ")"]
//! clause   ::= literal [":-" literal ("," literal)*] ["."]
//! pool     ::= (literal ["." | ","])*
//! ```
//!
//! Identifiers starting with an uppercase letter or `_` are variables.
//! Everything else (lowercase words, numbers, single-quoted atoms) is a
//! constant. Names are interned into the caller's [`Interner`].

use crate::error::{OslrError, Result};
use crate::logic::core::clause::HornClause;
use crate::logic::core::literal::{Literal, PredicateSymbol};
use crate::logic::core::term::Term;
use crate::logic::interner::Interner;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, multispace1, satisfy},
    combinator::{all_consuming, map, opt, recognize},
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

/// A term before interning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawTerm<'a> {
    Variable(&'a str),
    Constant(&'a str),
}

/// A literal before interning
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawLiteral<'a> {
    negated: bool,
    predicate: &'a str,
    args: Vec<RawTerm<'a>>,
}

/// Parse a single literal such as `edge(X, a)` or `~edge(X, Y)`.
pub fn parse_literal(input: &str, interner: &mut Interner) -> Result<Literal> {
    let (_, raw) = all_consuming(ws(parse_raw_literal))(input)
        .map_err(|e| OslrError::Parse(format!("invalid literal {:?}: {}", input, e)))?;
    build_literal(&raw, interner)
}

/// Parse a Horn clause such as `path(X,Y) :- edge(X,Z), path(Z,Y).`
pub fn parse_horn_clause(input: &str, interner: &mut Interner) -> Result<HornClause> {
    let (_, (head, body)) = all_consuming(parse_raw_clause)(input)
        .map_err(|e| OslrError::Parse(format!("invalid clause {:?}: {}", input, e)))?;

    let head = build_literal(&head, interner)?;
    let body = body
        .iter()
        .map(|raw| build_literal(raw, interner))
        .collect::<Result<Vec<_>>>()?;
    Ok(HornClause::new(head, body))
}

/// Parse a candidate pool: literals separated by `.`, `,` or whitespace.
///
/// The order of the returned literals is the order in the text, which is
/// the index order the refinement engine works with.
pub fn parse_literals(input: &str, interner: &mut Interner) -> Result<Vec<Literal>> {
    let (_, raws) = all_consuming(parse_raw_pool)(input)
        .map_err(|e| OslrError::Parse(format!("invalid literal list: {}", e)))?;
    raws.iter().map(|raw| build_literal(raw, interner)).collect()
}

fn build_literal(raw: &RawLiteral<'_>, interner: &mut Interner) -> Result<Literal> {
    let arity = u8::try_from(raw.args.len()).map_err(|_| {
        OslrError::Parse(format!(
            "predicate {} has {} arguments, at most {} are supported",
            raw.predicate,
            raw.args.len(),
            u8::MAX
        ))
    })?;
    let predicate = PredicateSymbol::new(interner.intern_predicate(raw.predicate), arity);
    let args = raw
        .args
        .iter()
        .map(|arg| match arg {
            RawTerm::Variable(name) => Term::variable(interner, name),
            RawTerm::Constant(name) => Term::constant(interner, name),
        })
        .collect();

    Ok(if raw.negated {
        Literal::negative(predicate, args)
    } else {
        Literal::positive(predicate, args)
    })
}

// =============================================================================
// nom parsers
// =============================================================================

fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, inner, multispace0)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn parse_variable_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_uppercase() || c == '_'),
        take_while(is_ident_char),
    ))(input)
}

fn parse_lower_word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
        take_while(is_ident_char),
    ))(input)
}

fn parse_single_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), take_while1(|c: char| c != '\''), char('\''))(input)
}

fn parse_predicate_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_lowercase()),
        take_while(is_ident_char),
    ))(input)
}

fn parse_term(input: &str) -> IResult<&str, RawTerm<'_>> {
    alt((
        map(parse_variable_name, RawTerm::Variable),
        map(alt((parse_single_quoted, parse_lower_word)), RawTerm::Constant),
    ))(input)
}

fn parse_negation(input: &str) -> IResult<&str, bool> {
    map(
        opt(alt((tag("~"), terminated(tag("not"), multispace1)))),
        |negation| negation.is_some(),
    )(input)
}

fn parse_raw_literal(input: &str) -> IResult<&str, RawLiteral<'_>> {
    let (input, negated) = parse_negation(input)?;
    let (input, _) = multispace0(input)?;
    let (input, predicate) = parse_predicate_name(input)?;
    let (input, args) = opt(delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), parse_term),
        preceded(multispace0, char(')')),
    ))(input)?;

    Ok((
        input,
        RawLiteral {
            negated,
            predicate,
            args: args.unwrap_or_default(),
        },
    ))
}

#[allow(clippy::type_complexity)]
fn parse_raw_clause(input: &str) -> IResult<&str, (RawLiteral<'_>, Vec<RawLiteral<'_>>)> {
    let (input, head) = ws(parse_raw_literal)(input)?;
    let (input, body) = opt(preceded(
        tag(":-"),
        separated_list1(char(','), ws(parse_raw_literal)),
    ))(input)?;
    let (input, _) = opt(ws(char('.')))(input)?;
    Ok((input, (head, body.unwrap_or_default())))
}

fn parse_raw_pool(input: &str) -> IResult<&str, Vec<RawLiteral<'_>>> {
    terminated(
        many0(terminated(
            ws(parse_raw_literal),
            opt(ws(alt((char('.'), char(','))))),
        )),
        multispace0,
    )(input)
}
