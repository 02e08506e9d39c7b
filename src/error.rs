//! Error types for value parsing and configuration loading

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A CSS value that could not be parsed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("{message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ValueError {
    /// Error for a character the lexer does not recognize
    pub fn unexpected_char(text: &str, span: Span) -> Self {
        ValueError::Syntax {
            span,
            message: format!("unexpected character '{}'", text),
            expected: Vec::new(),
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            ValueError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ValueError::Syntax {
                span,
                message,
                expected,
            } => {
                let label = if expected.is_empty() {
                    message.clone()
                } else {
                    format!("{}\nExpected: {}", message, expected.join(", "))
                };
                render_report(source, filename, span, message, &label)
            }
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ValueError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found {
                Some(tok) => format!("unexpected {}", format_token(tok)),
                None => "unexpected end of value".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of value".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("'{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ValueError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Ident(s) => format!("'{}'", s),
        Token::Number(n) => format!("number {}", n),
        Token::Percentage(p) => format!("{}%", p),
        Token::Dimension(q) => format!("'{}{}'", q.value, q.unit),
        Token::ParenOpen => "'('".to_string(),
        Token::ParenClose => "')'".to_string(),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Slash => "'/'".to_string(),
        Token::Plus => "'+'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Star => "'*'".to_string(),
    }
}

/// A grid-template-areas text that does not describe a valid area grid
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AreaError {
    #[error("unterminated quoted row")]
    UnterminatedRow { span: Span },

    #[error("unexpected text outside quoted rows")]
    StrayText { span: Span },

    #[error("\"{token}\" is not a valid area name")]
    InvalidName { token: String, span: Span },

    #[error("row {row} has {found} cells but row 1 has {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
        span: Span,
    },

    #[error("area \"{name}\" must form a single rectangle")]
    NotRectangular { name: String, span: Span },
}

impl AreaError {
    pub fn span(&self) -> &Span {
        match self {
            Self::UnterminatedRow { span }
            | Self::StrayText { span }
            | Self::InvalidName { span, .. }
            | Self::RaggedRow { span, .. }
            | Self::NotRectangular { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let message = self.to_string();
        render_report(source, filename, self.span(), &message, &message)
    }
}

fn render_report(source: &str, filename: &str, span: &Span, message: &str, label: &str) -> String {
    let mut buf = Vec::new();
    let written = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(
            Label::new((filename, span.clone()))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut buf);
    match written {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => message.to_string(),
    }
}

/// Errors that can occur when loading snapshots, policies, palettes or metrics
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_error_display() {
        let err = AreaError::RaggedRow {
            row: 2,
            found: 1,
            expected: 2,
            span: 4..5,
        };
        assert_eq!(err.to_string(), "row 2 has 1 cells but row 1 has 2");
        assert_eq!(err.span(), &(4..5));
    }

    #[test]
    fn test_value_error_format_includes_message() {
        let err = ValueError::unexpected_char("#", 4..5);
        let report = err.format("1fr #fff", "gridTemplateColumns");
        assert!(report.contains("unexpected character '#'"));
    }

    #[test]
    fn test_config_error_from_toml() {
        let err: ConfigError = toml::from_str::<toml::Value>("a = ")
            .map_err(ConfigError::from)
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to parse TOML"));
    }
}
