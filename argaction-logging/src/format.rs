//! Line templates
//!
//! A template is plain text with `{placeholder}` fields. Known placeholders are
//! `asctime`, `name`, `levelname` and `message`; anything else in braces is
//! copied through unchanged.

use crate::error::{LoggingError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    AscTime,
    Name,
    LevelName,
    Message,
}

/// One event ready to be rendered
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub time: DateTime<Local>,
    /// Event target, rendered as `{name}`
    pub target: &'a str,
    pub level: Level,
    pub message: &'a str,
}

/// Parsed line template with its date format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    datefmt: String,
}

impl Template {
    /// Parse `format`; `datefmt` must be a valid strftime pattern
    pub fn parse(format: &str, datefmt: &str) -> Result<Self> {
        if StrftimeItems::new(datefmt).any(|item| matches!(item, Item::Error)) {
            return Err(LoggingError::InvalidDateFormat(datefmt.to_string()));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = format;

        while let Some(start) = rest.find('{') {
            let Some(length) = rest[start + 1..].find(['{', '}']).map(|offset| offset + 1) else {
                break;
            };
            // An unmatched `{` is literal text; scanning resumes at the next one
            if rest[start + length..].starts_with('{') {
                literal.push_str(&rest[..start + length]);
                rest = &rest[start + length..];
                continue;
            }
            let field = match &rest[start + 1..start + length] {
                "asctime" => Some(Segment::AscTime),
                "name" => Some(Segment::Name),
                "levelname" => Some(Segment::LevelName),
                "message" => Some(Segment::Message),
                _ => None,
            };

            match field {
                Some(segment) => {
                    literal.push_str(&rest[..start]);
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                None => literal.push_str(&rest[..start + length + 1]),
            }
            rest = &rest[start + length + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            segments,
            datefmt: datefmt.to_string(),
        })
    }

    pub fn render(&self, record: &LogRecord<'_>) -> String {
        let mut line = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::AscTime => {
                    // datefmt was validated in `parse`, so formatting cannot fail
                    let _ = write!(line, "{}", record.time.format(&self.datefmt));
                }
                Segment::Name => line.push_str(record.target),
                Segment::LevelName => line.push_str(level_name(&record.level)),
                Segment::Message => line.push_str(record.message),
            }
        }
        line
    }
}

/// Upper-case level name as it appears in log lines
pub fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        _ => "ERROR",
    }
}
