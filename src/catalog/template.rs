//! Anchored URI template matching.
//!
//! Matching rule: literal spans match byte-for-byte, each `{placeholder}`
//! captures one or more characters excluding `/`, and the whole URI must be
//! consumed. A placeholder followed by a literal captures up to the first
//! viable occurrence of that literal (no backtracking); a trailing
//! placeholder captures the remainder. Adjacent placeholders cannot be split
//! unambiguously and are rejected at parse time.

use thiserror::Error;

use super::types::TemplateValues;

/// A parsed URI template such as `greeting://{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    pattern: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Rejected URI template patterns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unbalanced braces in URI template `{pattern}`")]
    Unbalanced { pattern: String },
    #[error("empty placeholder in URI template `{pattern}`")]
    EmptyPlaceholder { pattern: String },
    #[error("adjacent placeholders in URI template `{pattern}` cannot be matched unambiguously")]
    AdjacentPlaceholders { pattern: String },
    #[error("duplicate placeholder `{name}` in URI template `{pattern}`")]
    DuplicatePlaceholder { pattern: String, name: String },
}

impl UriTemplate {
    pub fn parse(pattern: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut names: Vec<String> = Vec::new();
        let mut chars = pattern.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(TemplateError::Unbalanced {
                                    pattern: pattern.to_string(),
                                })
                            }
                            other => name.push(other),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::Unbalanced {
                            pattern: pattern.to_string(),
                        });
                    }
                    if name.is_empty() {
                        return Err(TemplateError::EmptyPlaceholder {
                            pattern: pattern.to_string(),
                        });
                    }
                    if names.contains(&name) {
                        return Err(TemplateError::DuplicatePlaceholder {
                            pattern: pattern.to_string(),
                            name,
                        });
                    }
                    if literal.is_empty() {
                        if matches!(segments.last(), Some(Segment::Placeholder(_))) {
                            return Err(TemplateError::AdjacentPlaceholders {
                                pattern: pattern.to_string(),
                            });
                        }
                    } else {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    names.push(name.clone());
                    segments.push(Segment::Placeholder(name));
                }
                '}' => {
                    return Err(TemplateError::Unbalanced {
                        pattern: pattern.to_string(),
                    })
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
        })
    }

    /// The original template pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Placeholder names in order of appearance.
    pub fn placeholder_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    pub fn has_placeholders(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Placeholder(_)))
    }

    /// Match a concrete URI against this template, returning the captured
    /// placeholder values when the whole URI matches.
    pub fn extract(&self, uri: &str) -> Option<TemplateValues> {
        let mut values = TemplateValues::new();
        let mut rest = uri;

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(literal) => {
                    rest = rest.strip_prefix(literal.as_str())?;
                }
                Segment::Placeholder(name) => {
                    let capture = match self.segments.get(index + 1) {
                        Some(Segment::Literal(literal)) => {
                            let split = rest
                                .match_indices(literal.as_str())
                                .map(|(at, _)| at)
                                .find(|&at| at >= 1)?;
                            let capture = &rest[..split];
                            rest = &rest[split..];
                            capture
                        }
                        // Adjacent placeholders are rejected at parse time.
                        Some(Segment::Placeholder(_)) => return None,
                        None => std::mem::take(&mut rest),
                    };
                    if capture.is_empty() || capture.contains('/') {
                        return None;
                    }
                    values.insert(name.clone(), capture.to_string());
                }
            }
        }

        if rest.is_empty() {
            Some(values)
        } else {
            None
        }
    }
}
