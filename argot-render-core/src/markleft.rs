//! A small markdown-like format for long command descriptions.
//!
//! Blank lines separate paragraphs and single line breaks fold into spaces.
//! A line starting with `- ` opens a bullet paragraph; following lines that
//! are not blank continue it.

use crate::document::{Paragraph, ParagraphStyle};

pub fn parse(content: &str, style: &ParagraphStyle) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut current: Option<Paragraph> = None;

    for line in content.split('\n') {
        let line = line.trim_end_matches('\r').trim();

        if line.is_empty() {
            paragraphs.extend(current.take());
            continue;
        }

        if let Some(item) = line.strip_prefix("- ") {
            paragraphs.extend(current.take());
            let mut bullet = Paragraph::new(ParagraphStyle {
                bullet: true,
                ..style.clone()
            });
            bullet.add_span(item.trim());
            current = Some(bullet);
            continue;
        }

        current
            .get_or_insert_with(|| Paragraph::new(style.clone()))
            .add_span(line);
    }

    paragraphs.extend(current);
    paragraphs
}
