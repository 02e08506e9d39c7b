//! Lexer for CSS grid values using logos

use logos::Logos;

use crate::error::{Span, ValueError};

/// A number followed by a unit, e.g. `1fr` or `12.5px`
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

fn quantity(lex: &mut logos::Lexer<Token>) -> Option<Quantity> {
    let slice = lex.slice();
    let split = slice.find(|c: char| c.is_ascii_alphabetic())?;
    let value = slice[..split].parse::<f64>().ok()?;
    Some(Quantity {
        value,
        unit: slice[split..].to_ascii_lowercase(),
    })
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(",")]
    Comma,
    #[token("/")]
    Slash,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,

    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)[a-zA-Z]+", quantity)]
    Dimension(Quantity),

    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)%", |lex| {
        let s = lex.slice();
        s[..s.len() - 1].parse::<f64>().ok()
    })]
    Percentage(f64),

    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Identifiers cover keywords (`auto`, `span`), hyphenated names
    // (`auto-fit`, `min-content`) and custom properties (`--gutter`)
    #[regex(r"-?-?[a-zA-Z_][a-zA-Z0-9_-]*", |lex| lex.slice().to_string())]
    Ident(String),
}

/// Lex a value into tokens with spans, failing on the first unknown character
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, ValueError> {
    let mut tokens = Vec::new();
    for (tok, span) in Token::lexer(input).spanned() {
        match tok {
            Ok(t) => tokens.push((t, span)),
            Err(()) => return Err(ValueError::unexpected_char(&input[span.clone()], span)),
        }
    }
    Ok(tokens)
}
