use std::str::FromStr;

use lunar_tokens::token::{Literal, TokenKind};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_until, take_while1};
use nom::character::complete::{alpha1, alphanumeric1, char, digit1, one_of};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::error::{context, ContextError, ErrorKind, FromExternalError, ParseError};
use nom::multi::many0_count;
use nom::sequence::pair;
use nom::IResult;

type Result<'a, O> = IResult<&'a str, O, ScanError<'a>>;

/// The error produced while scanning a single token.
///
/// Unterminated strings and comments are raised as [nom::Err::Failure] so that no other
/// alternative is attempted, and carry the input starting at the opening delimiter.
#[derive(Debug, PartialEq)]
pub enum ScanError<'a> {
    UnterminatedString(&'a str),
    UnterminatedComment(&'a str),
    Nom(&'a str, ErrorKind),
}

impl<'a> ParseError<&'a str> for ScanError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        ScanError::Nom(input, kind)
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> ContextError<&'a str> for ScanError<'a> {}

impl<'a, E> FromExternalError<&'a str, E> for ScanError<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: E) -> Self {
        ScanError::Nom(input, kind)
    }
}

/// Parses a single significant token from the start of `src`
pub fn parse_token(src: &str) -> Result<(TokenKind, Option<Literal>)> {
    context(
        "token",
        alt((
            parse_word,
            map(parse_number, |n| (TokenKind::Number, Some(Literal::Number(n)))),
            map(parse_string, |s| (TokenKind::String, Some(Literal::String(s)))),
            map(parse_operator, |kind| (kind, None)),
            map(parse_punctuation, |kind| (kind, None)),
        )),
    )(src)
}

/// Recognizes whitespace and comments, which never produce tokens
pub fn parse_insignificant(src: &str) -> Result<&str> {
    context(
        "insignificant",
        recognize(many0_count(alt((
            context(
                "whitespace",
                take_while1(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n')),
            ),
            parse_block_comment,
            parse_line_comment,
        )))),
    )(src)
}

fn parse_block_comment(src: &str) -> Result<&str> {
    let (body, _) = tag::<_, _, ScanError>("--[[")(src)?;
    recognize(pair(take_until("]]"), tag("]]")))(body)
        .map(|(rest, _)| (rest, &src[..src.len() - rest.len()]))
        .map_err(|_: nom::Err<ScanError>| nom::Err::Failure(ScanError::UnterminatedComment(src)))
}

fn parse_line_comment(src: &str) -> Result<&str> {
    context(
        "line comment",
        recognize(pair(tag("--"), take_till(|c: char| c == '\n'))),
    )(src)
}

fn recognize_identifier(input: &str) -> Result<&str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn parse_word(src: &str) -> Result<(TokenKind, Option<Literal>)> {
    context(
        "word",
        map(recognize_identifier, |word| match TokenKind::keyword(word) {
            Some(TokenKind::True) => (TokenKind::True, Some(Literal::Boolean(true))),
            Some(TokenKind::False) => (TokenKind::False, Some(Literal::Boolean(false))),
            Some(TokenKind::Nil) => (TokenKind::Nil, Some(Literal::Nil)),
            Some(keyword) => (keyword, None),
            None => (TokenKind::Identifier, None),
        }),
    )(src)
}

fn parse_number(src: &str) -> Result<f64> {
    context(
        "number",
        map_res(
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            f64::from_str,
        ),
    )(src)
}

fn parse_string(src: &str) -> Result<String> {
    let (body, quote) = one_of::<_, _, ScanError>("\"'")(src)?;
    let (rest, contents) = take_till::<_, _, ScanError>(|c: char| c == quote || c == '\n')(body)?;
    match char::<_, ScanError>(quote)(rest) {
        Ok((rest, _)) => Ok((rest, contents.to_string())),
        Err(_) => Err(nom::Err::Failure(ScanError::UnterminatedString(src))),
    }
}

fn parse_operator(src: &str) -> Result<TokenKind> {
    context(
        "operator",
        alt((
            value(TokenKind::Ellipsis, tag("...")),
            value(TokenKind::Concat, tag("..")),
            value(TokenKind::Dot, char('.')),
            value(TokenKind::DoubleSlash, tag("//")),
            value(TokenKind::Slash, char('/')),
            value(TokenKind::DoubleColon, tag("::")),
            value(TokenKind::Colon, char(':')),
            value(TokenKind::Eq, tag("==")),
            value(TokenKind::Assign, char('=')),
            value(TokenKind::NotEq, tag("~=")),
            value(TokenKind::NotEq, tag("!=")),
            value(TokenKind::Tilde, char('~')),
            alt((
                value(TokenKind::LShift, tag("<<")),
                value(TokenKind::Lte, tag("<=")),
                value(TokenKind::Lt, char('<')),
                value(TokenKind::RShift, tag(">>")),
                value(TokenKind::Gte, tag(">=")),
                value(TokenKind::Gt, char('>')),
                value(TokenKind::Plus, char('+')),
                value(TokenKind::Minus, char('-')),
                value(TokenKind::Star, char('*')),
                value(TokenKind::Percent, char('%')),
                value(TokenKind::Caret, char('^')),
                value(TokenKind::Hash, char('#')),
                value(TokenKind::Ampersand, char('&')),
                value(TokenKind::Pipe, char('|')),
            )),
        )),
    )(src)
}

fn parse_punctuation(src: &str) -> Result<TokenKind> {
    context(
        "punctuation",
        alt((
            value(TokenKind::LParen, char('(')),
            value(TokenKind::RParen, char(')')),
            value(TokenKind::LBrace, char('{')),
            value(TokenKind::RBrace, char('}')),
            value(TokenKind::LBracket, char('[')),
            value(TokenKind::RBracket, char(']')),
            value(TokenKind::Comma, char(',')),
            value(TokenKind::SemiColon, char(';')),
        )),
    )(src)
}
