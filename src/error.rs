//! Error types for SVG parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum SvgError {
    #[error("malformed SVG at {span:?}: {message}")]
    Syntax { span: Span, message: String },

    #[error("root element is <{found}>, expected <svg>")]
    NotSvg { found: String, span: Span },
}

impl SvgError {
    /// Build a syntax error from a roxmltree error, mapping its row/column to a byte span
    pub fn from_xml(source: &str, err: &roxmltree::Error) -> Self {
        let pos = err.pos();
        let start = byte_offset(source, pos.row as usize, pos.col as usize);
        let end = source[start..]
            .chars()
            .next()
            .map_or(start, |c| start + c.len_utf8());

        SvgError::Syntax {
            span: start..end,
            message: err.to_string(),
        }
    }

    /// Source span the error points at
    pub fn span(&self) -> &Span {
        match self {
            SvgError::Syntax { span, .. } | SvgError::NotSvg { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let span = self.span().clone();
        let message = match self {
            SvgError::Syntax { message, .. } => message.clone(),
            SvgError::NotSvg { .. } => self.to_string(),
        };

        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", filename, self),
        }
    }
}

/// Convert a 1-based row/column text position into a byte offset
fn byte_offset(source: &str, row: usize, col: usize) -> usize {
    let mut offset = 0;
    for (index, line) in source.split_inclusive('\n').enumerate() {
        if index + 1 == row {
            let within: usize = line
                .chars()
                .take(col.saturating_sub(1))
                .map(char::len_utf8)
                .sum();
            return (offset + within).min(source.len());
        }
        offset += line.len();
    }
    source.len()
}
