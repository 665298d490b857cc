// Borderless column layout for help listings. Widths are measured on the
// visible text, so coloured cells still line up.

pub fn strip_ansi(text: &str) -> String {
    let mut result = String::new();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\x1B' {
            // Skip the escape sequence up to and including its final 'm'
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
    indent: usize,
    gap: usize,
}

impl Table {
    pub fn new(indent: usize, gap: usize) -> Self {
        Self {
            rows: Vec::new(),
            column_widths: Vec::new(),
            indent,
            gap,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            let width = visible_width(cell);
            if i >= self.column_widths.len() {
                self.column_widths.push(width);
            } else if width > self.column_widths[i] {
                self.column_widths[i] = width;
            }
        }
        self.rows.push(row);
    }

    fn pad_cell(text: &str, width: usize) -> String {
        let padding = width.saturating_sub(visible_width(text));
        format!("{}{}", text, " ".repeat(padding))
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        for row in &self.rows {
            let last = row.len().saturating_sub(1);
            let cells: Vec<String> = row.iter().enumerate()
                .map(|(i, cell)| {
                    // The last column is never padded, so lines carry no trailing blanks
                    if i == last {
                        cell.clone()
                    } else {
                        Self::pad_cell(cell, self.column_widths[i])
                    }
                })
                .collect();

            let line = format!("{}{}", " ".repeat(self.indent), cells.join(&" ".repeat(self.gap)));
            output.push_str(line.trim_end());
            output.push('\n');
        }

        output
    }
}
