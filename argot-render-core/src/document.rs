use serde::{Deserialize, Serialize};

use crate::markleft;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Left margin, in columns.
    #[serde(default)]
    pub indent: usize,
    /// Render with a leading "- " marker and a hanging indent.
    #[serde(default)]
    pub bullet: bool,
}

impl ParagraphStyle {
    pub fn indented(indent: usize) -> Self {
        Self {
            indent,
            bullet: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub spans: Vec<String>,
}

impl Paragraph {
    pub fn new(style: ParagraphStyle) -> Self {
        Self {
            style,
            spans: Vec::new(),
        }
    }

    pub fn add_span(&mut self, text: impl Into<String>) -> &mut Self {
        self.spans.push(text.into());
        self
    }

    pub fn text(&self) -> String {
        self.spans.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.trim().is_empty())
    }
}

/// An ordered sequence of paragraphs, ready for a renderer to wrap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_markleft(content: &str, style: &ParagraphStyle) -> Self {
        Self {
            paragraphs: markleft::parse(content, style),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(Paragraph::is_empty)
    }
}
