/// Slot templates — parsing and substitution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("template parse error in '{template}': {reason}")]
    Parse { template: String, reason: String },
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Named substitution slot: `{slot_name}`.
    Slot(String),
}

/// A parsed template — a sequence of literal and slot segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    source: String,
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{slot}` → `Slot`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let fail = |reason: &str| TemplateError::Parse {
            template: input.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal_buf.push('{');
                }
                '{' => {
                    if !literal_buf.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(&mut literal_buf)));
                    }

                    let mut name = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => return Err(fail("nested braces are not allowed")),
                            other => name.push(other),
                        }
                    }

                    if !closed {
                        return Err(fail("unclosed brace"));
                    }
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(fail("empty braces"));
                    }
                    segments.push(TemplateSegment::Slot(name.to_string()));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal_buf.push('}');
                }
                '}' => return Err(fail("unmatched closing brace")),
                other => literal_buf.push(other),
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        Ok(Template {
            source: input.to_string(),
            segments,
        })
    }

    /// The template text as it was written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Slot names referenced by this template, in order of appearance.
    /// A slot used twice is reported twice.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            TemplateSegment::Slot(name) => Some(name.as_str()),
            TemplateSegment::Literal(_) => None,
        })
    }

    /// Render the template, asking `fill` for the text of each slot.
    pub fn render<'a, F>(&self, mut fill: F) -> String
    where
        F: FnMut(&str) -> &'a str,
    {
        let mut out = String::with_capacity(self.source.len() + 32);
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Slot(name) => out.push_str(fill(name)),
            }
        }
        out
    }
}
