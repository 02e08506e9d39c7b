//! Parser for `grid-template-areas` text
//!
//! Accepts either CSS syntax (one quoted string per row, possibly several
//! on a line) or the plain form used in the property panel (one row per
//! line, no quotes). Cells are separated by whitespace; a run of dots is an
//! empty cell.

use std::collections::HashMap;

use logos::Logos;

use crate::error::{AreaError, Span};

/// Name used for empty cells
pub const EMPTY_CELL: &str = ".";

/// A rectangular grid of area names
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AreaGrid {
    cells: Vec<Vec<String>>,
}

/// Zero-based, inclusive cell bounds of one named area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaBounds {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl AreaGrid {
    /// Build a grid from rows of cell names without validation
    pub fn from_rows(cells: Vec<Vec<String>>) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn column_count(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Area names in order of first appearance (row-major), excluding `.`
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for cell in self.cells.iter().flatten() {
            if cell != EMPTY_CELL && !names.contains(&cell.as_str()) {
                names.push(cell);
            }
        }
        names
    }

    /// Bounding box of every occurrence of `name`
    pub fn bounds(&self, name: &str) -> Option<AreaBounds> {
        let mut bounds: Option<AreaBounds> = None;
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell != name {
                    continue;
                }
                bounds = Some(match bounds {
                    None => AreaBounds {
                        min_row: r,
                        max_row: r,
                        min_col: c,
                        max_col: c,
                    },
                    Some(b) => AreaBounds {
                        min_row: b.min_row.min(r),
                        max_row: b.max_row.max(r),
                        min_col: b.min_col.min(c),
                        max_col: b.max_col.max(c),
                    },
                });
            }
        }
        bounds
    }
}

/// Tokens of an areas template
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
enum AreaToken {
    /// A complete `"a b"` row; rows never continue onto the next line
    #[regex(r#""[^"\n]*""#)]
    QuotedRow,
    #[regex(r#""[^"\n]*"#)]
    UnterminatedRow,
    #[regex(r"\.+", priority = 10)]
    Dots,
    // Anything else up to whitespace or a quote; validated as a name later
    #[regex(r#"[^ \t\r\f\n"]+"#)]
    Name,
    #[token("\n")]
    Newline,
}

/// A cell token with its position in the source
struct RawCell {
    name: String,
    span: Span,
}

/// Parse and validate an areas template
pub fn parse_areas(source: &str) -> Result<AreaGrid, AreaError> {
    let tokens = lex_areas(source, 0)?;
    let quoted = tokens.iter().any(|(token, _)| {
        matches!(token, AreaToken::QuotedRow | AreaToken::UnterminatedRow)
    });
    let rows = if quoted {
        quoted_rows(source, &tokens)?
    } else {
        plain_rows(source, &tokens)?
    };
    let grid_rows: Vec<Vec<RawCell>> = rows.into_iter().filter(|row| !row.is_empty()).collect();

    if let Some(first) = grid_rows.first() {
        let expected = first.len();
        for (r, row) in grid_rows.iter().enumerate().skip(1) {
            if row.len() != expected {
                let span = row[0].span.start..row[row.len() - 1].span.end;
                return Err(AreaError::RaggedRow {
                    row: r + 1,
                    found: row.len(),
                    expected,
                    span,
                });
            }
        }
    }

    let grid = AreaGrid {
        cells: grid_rows
            .iter()
            .map(|row| row.iter().map(|c| c.name.clone()).collect())
            .collect(),
    };
    check_rectangles(&grid, &grid_rows)?;
    Ok(grid)
}

/// Lex `text`, shifting spans by `offset` so they point into the full source
fn lex_areas(text: &str, offset: usize) -> Result<Vec<(AreaToken, Span)>, AreaError> {
    AreaToken::lexer(text)
        .spanned()
        .map(|(token, span)| {
            let span = offset + span.start..offset + span.end;
            match token {
                Ok(token) => Ok((token, span)),
                Err(()) => Err(AreaError::StrayText { span }),
            }
        })
        .collect()
}

/// Rows from `"a b" "c d"` syntax; only whitespace may sit between rows
fn quoted_rows(source: &str, tokens: &[(AreaToken, Span)]) -> Result<Vec<Vec<RawCell>>, AreaError> {
    let mut rows = Vec::new();
    for (token, span) in tokens {
        match token {
            AreaToken::QuotedRow => {
                let body = span.start + 1..span.end - 1;
                let inner = lex_areas(&source[body.clone()], body.start)?;
                rows.push(row_cells(source, &inner)?);
            }
            AreaToken::UnterminatedRow => {
                return Err(AreaError::UnterminatedRow { span: span.clone() })
            }
            AreaToken::Newline => {}
            AreaToken::Name | AreaToken::Dots => {
                return Err(AreaError::StrayText { span: span.clone() })
            }
        }
    }
    Ok(rows)
}

/// One row per line
fn plain_rows(source: &str, tokens: &[(AreaToken, Span)]) -> Result<Vec<Vec<RawCell>>, AreaError> {
    tokens
        .split(|(token, _)| *token == AreaToken::Newline)
        .map(|line| row_cells(source, line))
        .collect()
}

fn row_cells(source: &str, tokens: &[(AreaToken, Span)]) -> Result<Vec<RawCell>, AreaError> {
    tokens
        .iter()
        .map(|(token, span)| make_cell(*token, &source[span.clone()], span.clone()))
        .collect()
}

fn make_cell(token: AreaToken, text: &str, span: Span) -> Result<RawCell, AreaError> {
    match token {
        AreaToken::Dots => Ok(RawCell {
            name: EMPTY_CELL.to_string(),
            span,
        }),
        AreaToken::Name => {
            let valid = text
                .chars()
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '-')
                && text
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
            if valid {
                Ok(RawCell {
                    name: text.to_string(),
                    span,
                })
            } else {
                Err(AreaError::InvalidName {
                    token: text.to_string(),
                    span,
                })
            }
        }
        AreaToken::QuotedRow | AreaToken::UnterminatedRow | AreaToken::Newline => {
            Err(AreaError::StrayText { span })
        }
    }
}

/// Every name must fill its bounding box completely
fn check_rectangles(grid: &AreaGrid, raw: &[Vec<RawCell>]) -> Result<(), AreaError> {
    let mut first_span: HashMap<&str, Span> = HashMap::new();
    for cell in raw.iter().flatten() {
        first_span
            .entry(cell.name.as_str())
            .or_insert_with(|| cell.span.clone());
    }

    for name in grid.names() {
        let Some(b) = grid.bounds(name) else {
            continue;
        };
        let filled = (b.min_row..=b.max_row)
            .all(|r| (b.min_col..=b.max_col).all(|c| grid.cells[r][c] == name));
        if !filled {
            let span = first_span.get(name).cloned().unwrap_or(0..0);
            return Err(AreaError::NotRectangular {
                name: name.to_string(),
                span,
            });
        }
    }
    Ok(())
}
