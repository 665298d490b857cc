use anyhow::Result;
use ansi_term::Colour::{Blue, Cyan, Yellow};
use ansi_term::Style;
use argot_render_core::{
    CommandHelp, CommandListHelp, Document, HelpView, ParagraphStyle, Renderer,
};

mod table;
mod wrap;
pub use table::{strip_ansi, visible_width, Table};
pub use wrap::{wrap, wrap_words};

const DEFAULT_WIDTH: usize = 80;
const SECTION_INDENT: usize = 4;

pub struct CliRenderer {
    width: usize,
    color: bool,
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            color: true,
        }
    }

    /// A renderer that emits no escape sequences.
    pub fn plain() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            color: false,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(20);
        self
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn section(&self, output: &mut String, title: &str) {
        output.push('\n');
        output.push_str(&self.paint(Blue.bold(), title));
        output.push('\n');
    }

    fn render_document(&self, output: &mut String, document: &Document) {
        for (i, paragraph) in document.paragraphs.iter().enumerate() {
            if i > 0 && !paragraph.style.bullet {
                output.push('\n');
            }
            let (text, hanging) = if paragraph.style.bullet {
                (format!("- {}", paragraph.text()), 2)
            } else {
                (paragraph.text(), 0)
            };
            for line in wrap(&text, self.width, paragraph.style.indent, hanging) {
                output.push_str(&line);
                output.push('\n');
            }
        }
    }

    fn render_command_list(&self, help: &CommandListHelp) -> Result<String> {
        let mut output = format!("usage: {} <command> [<args>]\n", help.program);

        if !help.commands.is_empty() {
            output.push_str("\nThe available commands are:\n");
            let mut table = Table::new(3, 3);
            for command in &help.commands {
                table.add_row(vec![
                    self.paint(Style::new().fg(Cyan), &command.name),
                    command.summary.clone(),
                ]);
            }
            output.push_str(&table.render());
        }

        output.push('\n');
        output.push_str(&self.paint(
            Style::new().dimmed(),
            &format!("See '{} help <command>' for more information on a specific command.", help.program),
        ));
        output.push('\n');
        Ok(output)
    }

    fn synopsis_lines(&self, help: &CommandHelp, indent: usize, lead: &str) -> Vec<String> {
        let mut pieces: Vec<String> = Vec::new();
        if !lead.is_empty() {
            pieces.push(lead.to_string());
        }
        pieces.push(help.program.clone());
        pieces.extend(help.name.split(' ').map(String::from));

        // Continuation lines line up under the first parameter
        let head: usize = pieces.iter().map(|p| visible_width(p) + 1).sum();
        let hanging = if head < self.width / 2 { head } else { SECTION_INDENT };

        pieces.extend(help.synopsis());
        wrap_words(&pieces, self.width, indent, hanging)
    }

    fn render_usage(&self, help: &CommandHelp) -> Result<String> {
        let mut output = String::new();
        for line in self.synopsis_lines(help, 0, "usage:") {
            output.push_str(&line);
            output.push('\n');
        }
        Ok(output)
    }

    fn render_command(&self, help: &CommandHelp) -> Result<String> {
        let mut output = String::new();
        let indent = ParagraphStyle::indented(SECTION_INDENT);

        self.section(&mut output, "NAME");
        let name_line = if help.summary.is_empty() {
            format!("{} {}", help.program, help.name)
        } else {
            format!("{} {} - {}", help.program, help.name, help.summary)
        };
        for line in wrap(&name_line, self.width, SECTION_INDENT, 2) {
            output.push_str(&line);
            output.push('\n');
        }

        self.section(&mut output, "SYNOPSIS");
        for line in self.synopsis_lines(help, SECTION_INDENT, "") {
            output.push_str(&line);
            output.push('\n');
        }

        let description = help.description_document(&indent);
        if !description.is_empty() {
            self.section(&mut output, "DESCRIPTION");
            self.render_document(&mut output, &description);
        }

        if !help.options.is_empty() {
            self.section(&mut output, "OPTIONS");
            for (i, option) in help.options.iter().enumerate() {
                if i > 0 {
                    output.push('\n');
                }
                let mut forms = option.forms().join(", ");
                if let Some(value) = &option.value {
                    forms.push_str(&format!(" <{}>", value));
                }
                output.push_str(&" ".repeat(SECTION_INDENT));
                output.push_str(&self.paint(Style::new().fg(Yellow), &forms));
                if option.required {
                    output.push(' ');
                    output.push_str(&self.paint(Style::new().dimmed(), "(required)"));
                }
                output.push('\n');

                if let Some(text) = &option.description {
                    let nested = ParagraphStyle::indented(SECTION_INDENT * 2);
                    self.render_document(&mut output, &Document::from_markleft(text, &nested));
                }
            }
        }

        if !help.arguments.is_empty() {
            self.section(&mut output, "ARGUMENTS");
            for (i, argument) in help.arguments.iter().enumerate() {
                if i > 0 {
                    output.push('\n');
                }
                let mut name = format!("<{}>", argument.name);
                if argument.repeated {
                    name.push_str("...");
                }
                output.push_str(&" ".repeat(SECTION_INDENT));
                output.push_str(&self.paint(Style::new().fg(Yellow), &name));
                if argument.required {
                    output.push(' ');
                    output.push_str(&self.paint(Style::new().dimmed(), "(required)"));
                }
                output.push('\n');

                if let Some(text) = &argument.description {
                    let nested = ParagraphStyle::indented(SECTION_INDENT * 2);
                    self.render_document(&mut output, &Document::from_markleft(text, &nested));
                }
            }
        }

        Ok(output)
    }
}

impl Renderer for CliRenderer {
    fn render(&self, view: &HelpView) -> Result<String> {
        match view {
            HelpView::CommandList(help) => self.render_command_list(help),
            HelpView::Command(help) => self.render_command(help),
            HelpView::Usage(help) => self.render_usage(help),
        }
    }
}
