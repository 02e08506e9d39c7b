//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ValueError;
use crate::parser::ast::*;
use crate::parser::lexer::{lex, Quantity, Token};

/// Functions whose arguments are left for the browser to evaluate
const OPAQUE_FUNCTIONS: &[&str] = &["calc", "min", "max", "clamp", "var", "env", "fit-content"];

/// Parse a `grid-template-columns`/`grid-template-rows` value
pub fn parse_track_list(input: &str) -> Result<TrackList, Vec<ValueError>> {
    if input.trim().eq_ignore_ascii_case("none") {
        return Ok(TrackList::default());
    }
    let len = input.len();
    let tokens = lex(input).map_err(|e| vec![e])?;

    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    track_list_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(ValueError::from).collect())
}

/// Parse a sizing or gap value (`100px`, `50%`, `auto`, `calc(...)`)
pub fn parse_size(input: &str) -> Result<SizeValue, Vec<ValueError>> {
    let len = input.len();
    let tokens = lex(input).map_err(|e| vec![e])?;

    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    size_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(ValueError::from).collect())
}

/// Parse a grid line reference (`3`, `-1`, `span 2`, `auto`)
pub fn parse_grid_line(input: &str) -> Result<GridLine, Vec<ValueError>> {
    let len = input.len();
    let tokens = lex(input).map_err(|e| vec![e])?;

    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    grid_line_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(ValueError::from).collect())
}

/// Case-insensitive identifier match
fn keyword<'a, I>(name: &'static str) -> impl Parser<'a, I, (), extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    select! {
        Token::Ident(s) => s,
    }
    .filter(move |s: &String| s.eq_ignore_ascii_case(name))
    .ignored()
}

/// `calc(...)` and friends; arguments only need to be balanced
fn opaque_function_parser<'a, I>() -> impl Parser<'a, I, String, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let token_tree = recursive(|tree| {
        choice((
            tree.clone()
                .repeated()
                .collect::<Vec<()>>()
                .delimited_by(just(Token::ParenOpen), just(Token::ParenClose))
                .ignored(),
            any()
                .filter(|t: &Token| !matches!(t, Token::ParenOpen | Token::ParenClose))
                .ignored(),
        ))
    });

    select! {
        Token::Ident(name) => name,
    }
    .filter(|name: &String| OPAQUE_FUNCTIONS.contains(&name.to_ascii_lowercase().as_str()))
    .map(|name| name.to_ascii_lowercase())
    .then_ignore(
        token_tree
            .repeated()
            .collect::<Vec<()>>()
            .delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
    )
}

fn length_from_quantity(q: &Quantity) -> Option<Length> {
    LengthUnit::from_suffix(&q.unit).map(|unit| Length::new(q.value, unit))
}

fn breadth_parser<'a, I>() -> impl Parser<'a, I, Breadth, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let dimension = select! {
        Token::Dimension(q) => q,
    }
    .try_map(|q: Quantity, span| {
        if q.unit == "fr" {
            if q.value < 0.0 {
                Err(Rich::custom(span, "flex factor cannot be negative"))
            } else {
                Ok(Breadth::Flex(q.value))
            }
        } else {
            length_from_quantity(&q)
                .map(Breadth::Length)
                .ok_or_else(|| Rich::custom(span, format!("unknown unit '{}'", q.unit)))
        }
    });

    let percentage = select! {
        Token::Percentage(p) => Breadth::Length(Length::new(p, LengthUnit::Percent)),
    };

    let zero = select! {
        Token::Number(n) => n,
    }
    .try_map(|n: f64, span| {
        if n == 0.0 {
            Ok(Breadth::Length(Length::zero()))
        } else {
            Err(Rich::custom(span, format!("number {} needs a unit", n)))
        }
    });

    let named = select! {
        Token::Ident(s) => s,
    }
    .try_map(|s: String, span| match s.to_ascii_lowercase().as_str() {
        "auto" => Ok(Breadth::Auto),
        "min-content" => Ok(Breadth::MinContent),
        "max-content" => Ok(Breadth::MaxContent),
        _ => Err(Rich::custom(span, format!("unexpected keyword '{}'", s))),
    });

    choice((
        opaque_function_parser().map(Breadth::Computed),
        dimension,
        percentage,
        zero,
        named,
    ))
}

fn track_size_parser<'a, I>() -> impl Parser<'a, I, TrackSize, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let breadth = breadth_parser();

    let minmax = keyword("minmax")
        .ignore_then(
            breadth
                .clone()
                .then_ignore(just(Token::Comma))
                .then(breadth.clone())
                .delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
        )
        .try_map(|(min, max), span| {
            if min.is_flex() {
                Err(Rich::custom(
                    span,
                    "minmax() minimum cannot be a flexible length",
                ))
            } else {
                Ok(TrackSize::MinMax(min, max))
            }
        });

    let fit_content = keyword("fit-content")
        .ignore_then(
            breadth
                .clone()
                .delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
        )
        .map(TrackSize::FitContent);

    choice((minmax, fit_content, breadth.map(TrackSize::Breadth)))
}

fn track_list_parser<'a, I>() -> impl Parser<'a, I, TrackList, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let track_size = track_size_parser();

    let line_names = select! {
        Token::Ident(s) => s,
    }
    .repeated()
    .collect::<Vec<_>>()
    .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
    .map(TrackEntry::LineNames);

    let repeat_count = choice((
        keyword("auto-fit").to(RepeatCount::AutoFit),
        keyword("auto-fill").to(RepeatCount::AutoFill),
        select! {
            Token::Number(n) => n,
        }
        .try_map(|n: f64, span| {
            if n >= 1.0 && n.fract() == 0.0 && n <= 10_000.0 {
                Ok(RepeatCount::Count(n as u32))
            } else {
                Err(Rich::custom(span, "repeat() count must be a positive integer"))
            }
        }),
    ));

    let repeat_entry = choice((
        line_names.clone(),
        track_size.clone().map(TrackEntry::Track),
    ));

    let repeat = keyword("repeat")
        .ignore_then(
            repeat_count
                .then_ignore(just(Token::Comma))
                .then(repeat_entry.repeated().at_least(1).collect::<Vec<_>>())
                .delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
        )
        .map(|(count, entries)| TrackEntry::Repeat { count, entries });

    choice((repeat, line_names, track_size.map(TrackEntry::Track)))
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|entries| TrackList { entries })
}

fn size_parser<'a, I>() -> impl Parser<'a, I, SizeValue, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let dimension = select! {
        Token::Dimension(q) => q,
    }
    .try_map(|q: Quantity, span| {
        length_from_quantity(&q)
            .map(SizeValue::Length)
            .ok_or_else(|| Rich::custom(span, format!("unknown unit '{}'", q.unit)))
    });

    let percentage = select! {
        Token::Percentage(p) => SizeValue::Length(Length::new(p, LengthUnit::Percent)),
    };

    let zero = select! {
        Token::Number(n) => n,
    }
    .try_map(|n: f64, span| {
        if n == 0.0 {
            Ok(SizeValue::Length(Length::zero()))
        } else {
            Err(Rich::custom(span, format!("number {} needs a unit", n)))
        }
    });

    let named = select! {
        Token::Ident(s) => SizeValue::Keyword(s.to_ascii_lowercase()),
    };

    choice((
        opaque_function_parser().map(SizeValue::Computed),
        dimension,
        percentage,
        zero,
        named,
    ))
    .then_ignore(end())
}

fn grid_line_parser<'a, I>() -> impl Parser<'a, I, GridLine, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let integer = select! {
        Token::Number(n) => n,
    }
    .try_map(|n: f64, span| {
        if n.fract() == 0.0 && n != 0.0 && n.abs() <= 10_000.0 {
            Ok(n as i32)
        } else {
            Err(Rich::custom(span, "grid line must be a non-zero integer"))
        }
    });

    let span_count = keyword("span")
        .ignore_then(integer.clone())
        .try_map(|n, span| {
            if n > 0 {
                Ok(GridLine::Span(n as u32))
            } else {
                Err(Rich::custom(span, "span count must be positive"))
            }
        });

    choice((
        keyword("auto").to(GridLine::Auto),
        span_count,
        integer.map(GridLine::Line),
    ))
    .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_track_list() {
        let list = parse_track_list("1fr 1fr 1fr").expect("Should parse");
        assert_eq!(list.track_count(), 3);
        assert!(list.uses_flex());
    }

    #[test]
    fn test_parse_repeat_with_minmax() {
        let list = parse_track_list("repeat(auto-fit, minmax(200px, 1fr))").expect("Should parse");
        assert_eq!(list.entries.len(), 1);
        assert!(list.has_auto_fit());
        assert!(list.uses_minmax());
        assert_eq!(list.definite_track_count(), None);
    }

    #[test]
    fn test_parse_repeat_count() {
        let list = parse_track_list("200px repeat(4, [col] 1fr) auto").expect("Should parse");
        assert_eq!(list.track_count(), 6);
    }

    #[test]
    fn test_nested_parentheses_do_not_split() {
        let list = parse_track_list("minmax(calc(100% - 2rem), 1fr) fit-content(300px)")
            .expect("Should parse");
        assert_eq!(list.track_count(), 2);
        match &list.entries[0] {
            TrackEntry::Track(TrackSize::MinMax(Breadth::Computed(name), Breadth::Flex(_))) => {
                assert_eq!(name, "calc")
            }
            other => panic!("Expected minmax track, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_none_is_empty() {
        let list = parse_track_list("none").expect("Should parse");
        assert_eq!(list.track_count(), 0);
    }

    #[test]
    fn test_unbalanced_parens_is_error() {
        assert!(parse_track_list("repeat(3, 1fr").is_err());
        assert!(parse_track_list("minmax(100px, 1fr))").is_err());
    }

    #[test]
    fn test_unknown_unit_is_error() {
        let errs = parse_track_list("1fr 20qq").unwrap_err();
        assert!(!errs.is_empty());
    }

    #[test]
    fn test_flex_minimum_rejected() {
        assert!(parse_track_list("minmax(1fr, 200px)").is_err());
    }

    #[test]
    fn test_parse_sizes() {
        assert_eq!(
            parse_size("100px"),
            Ok(SizeValue::Length(Length::new(100.0, LengthUnit::Px)))
        );
        assert_eq!(
            parse_size("50%"),
            Ok(SizeValue::Length(Length::new(50.0, LengthUnit::Percent)))
        );
        assert_eq!(parse_size("0"), Ok(SizeValue::Length(Length::zero())));
        assert_eq!(parse_size("AUTO"), Ok(SizeValue::Keyword("auto".to_string())));
        assert_eq!(
            parse_size("calc(100vh - 64px)"),
            Ok(SizeValue::Computed("calc".to_string()))
        );
        assert!(parse_size("100").is_err());
        assert!(parse_size("10px 20px").is_err());
    }

    #[test]
    fn test_parse_grid_lines() {
        assert_eq!(parse_grid_line("3"), Ok(GridLine::Line(3)));
        assert_eq!(parse_grid_line("-1"), Ok(GridLine::Line(-1)));
        assert_eq!(parse_grid_line("span 2"), Ok(GridLine::Span(2)));
        assert_eq!(parse_grid_line("auto"), Ok(GridLine::Auto));
        assert!(parse_grid_line("0").is_err());
        assert!(parse_grid_line("1.5").is_err());
        assert!(parse_grid_line("span 0").is_err());
        assert!(parse_grid_line("header").is_err());
    }
}
