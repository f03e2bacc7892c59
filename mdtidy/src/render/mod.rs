//! Tree to canonical Markdown rendering
//!
//! The renderer is driven by a depth-first walk over the comrak tree. For each
//! node it is called once on entering and once on leaving; each node kind acts
//! on entry, exit or both. Block nodes get a blank line before them unless they
//! open their container (or the document), or sit in an item of a tight list.
//!
//! Renderer state is scoped to one walk: list frames (ordered flag, counter,
//! looseness bookkeeping) live on a stack that grows on entering a list and
//! shrinks on leaving it. Build a new [`Renderer`] for every document.

mod emitter;

use crate::options::{HeadingStyle, HookOutcome, Options};
use crate::text::{
    clean_without_trim, escape_link_title, link_destination, needs_escaping, string_width,
    terminal_string_width, BOLD_ON, RESET,
};
use comrak::arena_tree::NodeEdge;
use comrak::nodes::{
    AstNode, ListType, NodeCodeBlock, NodeLink, NodeList, NodeTable, NodeValue, TableAlignment,
};
use emitter::Emitter;

/// One entry per list currently being walked.
#[derive(Debug)]
struct ListFrame {
    ordered: bool,
    tight: bool,
    /// Next ordinal for ordered lists.
    counter: usize,
    /// Whether the current item holds a paragraph (loose lists only).
    paragraph: bool,
}

#[derive(Debug, Clone, Copy)]
enum Container {
    Item { tight: bool },
    Quote,
}

#[derive(Debug)]
struct HeadingState {
    level: u8,
    setext: bool,
}

/// Renders one comrak document to canonical Markdown.
pub struct Renderer<'o> {
    options: &'o Options,
    out: Emitter,
    lists: Vec<ListFrame>,
    containers: Vec<Container>,
    /// Set on entering a container, cleared by its first block.
    fresh: bool,
    last_normal_text: String,
    /// The next text node was backslash-escaped in the source.
    escaped: bool,
    heading: Option<HeadingState>,
    /// Column alignments of the table being walked.
    table: Option<Vec<TableAlignment>>,
    in_table_cell: bool,
}

impl<'o> Renderer<'o> {
    pub fn new(options: &'o Options) -> Self {
        Renderer {
            options,
            out: Emitter::new(),
            lists: Vec::new(),
            containers: Vec::new(),
            fresh: false,
            last_normal_text: String::new(),
            escaped: false,
            heading: None,
            table: None,
            in_table_cell: false,
        }
    }

    /// Walks `root` and returns the rendered Markdown.
    pub fn render<'a>(mut self, root: &'a AstNode<'a>) -> String {
        for edge in root.traverse() {
            match edge {
                NodeEdge::Start(node) => self.render_node(node, true),
                NodeEdge::End(node) => self.render_node(node, false),
            }
        }
        self.finish()
    }

    /// Consumes the renderer, returning everything written so far.
    pub fn finish(self) -> String {
        self.out.into_string()
    }

    /// Current list nesting depth.
    pub fn list_depth(&self) -> usize {
        self.lists.len()
    }

    /// Renders a single node edge. Children are never visited from here; the
    /// walker calls back for each of them.
    pub fn render_node<'a>(&mut self, node: &'a AstNode<'a>, entering: bool) {
        let options = self.options;
        if let Some(hook) = &options.hook {
            if hook.render_node(&mut self.out, node, entering) == HookOutcome::Handled {
                return;
            }
        }

        let data = node.data.borrow();
        match &data.value {
            NodeValue::Text(text) => {
                if entering {
                    self.text(text);
                }
            }
            NodeValue::SoftBreak => {
                if entering {
                    self.softbreak();
                }
            }
            NodeValue::LineBreak => {
                if entering {
                    self.hardbreak();
                }
            }
            NodeValue::Emph => self.emphasis(node),
            NodeValue::Strong => self.strong(entering),
            NodeValue::Strikethrough => self.out.write("~~"),
            NodeValue::BlockQuote => self.block_quote(entering),
            NodeValue::Link(link) => self.link(link, entering, false),
            NodeValue::Image(link) => self.link(link, entering, true),
            NodeValue::Code(code) => {
                if entering {
                    self.code(&code.literal);
                }
            }
            NodeValue::CodeBlock(block) => {
                if entering {
                    self.code_block(block);
                }
            }
            NodeValue::Document => {}
            NodeValue::Paragraph => self.paragraph(entering),
            NodeValue::HtmlInline(html) => {
                if entering {
                    self.out.write(html);
                }
            }
            NodeValue::HtmlBlock(html) => {
                if entering {
                    self.html_block(&html.literal);
                }
            }
            NodeValue::Heading(heading) => self.heading(node, heading.level, entering),
            NodeValue::ThematicBreak => {
                if entering {
                    self.horizontal_rule();
                }
            }
            NodeValue::List(list) => self.list(list, entering),
            NodeValue::Item(_) => self.list_item(node, entering),
            NodeValue::Escaped => self.escaped = entering,
            NodeValue::Table(table) => self.table(table, entering),
            NodeValue::TableRow(header) => self.table_row(*header, entering),
            NodeValue::TableCell => self.table_cell(entering),
            other => {
                if entering {
                    tracing::trace!(node = ?other, "no rendering rule, skipping");
                }
            }
        }
    }

    /// Separates a block from whatever precedes it.
    fn block_separator(&mut self) {
        let fresh = std::mem::replace(&mut self.fresh, false);
        if self.out.is_empty() {
            return;
        }
        self.out.ensure_newline();
        if fresh || self.in_tight_item() {
            return;
        }
        self.out.write("\n");
    }

    fn in_tight_item(&self) -> bool {
        matches!(self.containers.last(), Some(Container::Item { tight: true }))
    }

    /// Closes a container prefix, writing it out alone if the container was
    /// empty.
    fn close_prefix(&mut self) {
        self.out.ensure_newline();
        if let Some(unused) = self.out.pop_prefix() {
            self.out.write(unused.trim_end());
            self.out.write("\n");
        }
    }

    fn text(&mut self, literal: &str) {
        let escape = needs_escaping(literal, &self.last_normal_text)
            || std::mem::replace(&mut self.escaped, false);
        self.last_normal_text = literal.to_string();
        if !self.lists.is_empty() && literal == "\n" {
            return;
        }
        let mut clean = clean_without_trim(literal);
        if clean.is_empty() {
            return;
        }
        if self.in_table_cell {
            clean = clean.replace('|', "\\|");
        }
        if escape && !(self.in_table_cell && literal == "|") {
            self.out.write("\\");
        }
        self.out.write(&clean);
    }

    fn softbreak(&mut self) {
        if self.heading.is_some() {
            self.out.write(" ");
        } else if self.out.last_output_len() > 0 {
            self.out.write("\n");
        }
    }

    fn hardbreak(&mut self) {
        if self.heading.is_some() {
            self.out.write(" ");
        } else {
            self.out.write("  \n");
        }
    }

    fn emphasis<'a>(&mut self, node: &'a AstNode<'a>) {
        if node.first_child().is_none() {
            return;
        }
        self.out.write("*");
    }

    fn strong(&mut self, entering: bool) {
        let terminal = self.options.terminal;
        if entering {
            if terminal {
                self.out.write(BOLD_ON);
            }
            self.out.write("**");
        } else {
            self.out.write("**");
            if terminal {
                self.out.write(RESET);
            }
        }
    }

    fn block_quote(&mut self, entering: bool) {
        if entering {
            self.block_separator();
            self.out.push_prefix("> ", "> ");
            self.containers.push(Container::Quote);
            self.fresh = true;
        } else {
            self.containers.pop();
            self.close_prefix();
            self.fresh = false;
        }
    }

    fn link(&mut self, link: &NodeLink, entering: bool, image: bool) {
        if entering {
            if image {
                self.out.write("!");
            }
            self.out.write("[");
            return;
        }

        self.out.write("](");
        self.out.write(&link_destination(&link.url));
        if !link.title.is_empty() {
            self.out.write(" \"");
            self.out.write(&escape_link_title(&link.title));
            self.out.write("\"");
        }
        self.out.write(")");
    }

    fn code(&mut self, literal: &str) {
        let fence = "`".repeat(longest_backtick_run(literal) + 1);
        let pad = literal.starts_with('`')
            || literal.ends_with('`')
            || (literal.len() > 1
                && literal.starts_with(' ')
                && literal.ends_with(' ')
                && !literal.bytes().all(|b| b == b' '));
        self.out.write(&fence);
        if pad {
            self.out.write(" ");
        }
        if self.in_table_cell {
            self.out.write(&literal.replace('|', "\\|"));
        } else {
            self.out.write(literal);
        }
        if pad {
            self.out.write(" ");
        }
        self.out.write(&fence);
    }

    fn code_block(&mut self, block: &NodeCodeBlock) {
        self.block_separator();

        let language = fence_language(&block.info);
        let formatted = language
            .and_then(|lang| self.options.code_formatters.format_code(lang, &block.literal));
        let content = formatted.as_deref().unwrap_or(&block.literal);

        // A backtick fence can't carry an info string holding a backtick.
        let fence_char = match language {
            Some(lang) if lang.contains('`') => b'~',
            _ => b'`',
        };
        let fence = char::from(fence_char)
            .to_string()
            .repeat(3.max(longest_fence_run(content, fence_char) + 1));
        self.out.write(&fence);
        if let Some(lang) = language {
            self.out.write(lang);
        }
        self.out.write("\n");
        self.out.write(content);
        self.out.ensure_newline();
        self.out.write(&fence);
        self.out.write("\n");
    }

    fn paragraph(&mut self, entering: bool) {
        if entering {
            self.block_separator();
            if let Some(frame) = self.lists.last_mut() {
                if !frame.tight {
                    frame.paragraph = true;
                }
            }
        } else {
            self.out.write("\n");
        }
    }

    fn html_block(&mut self, literal: &str) {
        self.block_separator();
        self.out.write(literal);
        self.out.ensure_newline();
    }

    fn heading<'a>(&mut self, node: &'a AstNode<'a>, level: u8, entering: bool) {
        if entering {
            self.block_separator();
            let has_text = node.first_child().is_some();
            let setext =
                self.options.heading_style == HeadingStyle::Setext && level <= 2 && has_text;
            if !setext {
                self.out.write(&"#".repeat(level as usize));
                if has_text {
                    self.out.write(" ");
                }
            }
            self.heading = Some(HeadingState { level, setext });
            return;
        }

        let Some(state) = self.heading.take() else {
            return;
        };
        if state.setext {
            let title = self.out.current_line();
            let width = if self.options.terminal {
                terminal_string_width(title)
            } else {
                string_width(title)
            };
            let underline = if state.level == 1 { "=" } else { "-" };
            self.out.write("\n");
            self.out.write(&underline.repeat(width.max(1)));
        }
        self.out.write("\n");
    }

    fn horizontal_rule(&mut self) {
        self.block_separator();
        self.out.write("---\n");
    }

    fn table(&mut self, table: &NodeTable, entering: bool) {
        if entering {
            self.block_separator();
            self.table = Some(table.alignments.clone());
        } else {
            self.table = None;
        }
    }

    /// Rows are written as `| a | b |` without column padding; the header row
    /// is followed by the delimiter row.
    fn table_row(&mut self, header: bool, entering: bool) {
        if entering {
            self.out.write("|");
            return;
        }
        self.out.write("\n");
        if header {
            let delimiter = self
                .table
                .as_deref()
                .map(delimiter_row)
                .unwrap_or_default();
            self.out.write(&delimiter);
        }
    }

    fn table_cell(&mut self, entering: bool) {
        self.in_table_cell = entering;
        self.out.write(if entering { " " } else { " |" });
    }

    fn list(&mut self, list: &NodeList, entering: bool) {
        if entering {
            self.block_separator();
            self.lists.push(ListFrame {
                ordered: matches!(list.list_type, ListType::Ordered),
                tight: list.tight,
                counter: 1,
                paragraph: false,
            });
        } else {
            self.lists.pop();
            self.fresh = false;
        }
    }

    fn list_item<'a>(&mut self, node: &'a AstNode<'a>, entering: bool) {
        if entering {
            let (marker, tight) = match self.lists.last_mut() {
                Some(frame) if frame.ordered => {
                    let marker = format!("{}.", frame.counter);
                    frame.counter += 1;
                    (marker, frame.tight)
                }
                Some(frame) => ("-".to_string(), frame.tight),
                None => ("-".to_string(), true),
            };
            let indent = " ".repeat(marker.len() + 1);
            self.out.push_prefix(format!("{marker} "), indent);
            self.containers.push(Container::Item { tight });
            self.fresh = true;
            return;
        }

        self.containers.pop();
        self.close_prefix();
        self.fresh = false;
        let last = node.next_sibling().is_none();
        if let Some(frame) = self.lists.last_mut() {
            if frame.paragraph {
                if !last {
                    self.out.write("\n");
                }
                frame.paragraph = false;
            }
        }
    }
}

/// First whitespace-separated token of an info string, minus one leading `.`.
fn fence_language(info: &str) -> Option<&str> {
    info.split_whitespace()
        .map(|token| token.strip_prefix('.').unwrap_or(token))
        .find(|token| !token.is_empty())
}

fn longest_backtick_run(s: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for b in s.bytes() {
        if b == b'`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Longest run of `fence` that opens a line, the only kind that can close a
/// fence early.
fn longest_fence_run(content: &str, fence: u8) -> usize {
    content
        .lines()
        .map(|line| {
            line.trim_start_matches(' ')
                .bytes()
                .take_while(|&b| b == fence)
                .count()
        })
        .max()
        .unwrap_or(0)
}

fn delimiter_row(alignments: &[TableAlignment]) -> String {
    let mut row = String::from("|");
    for alignment in alignments {
        row.push_str(match alignment {
            TableAlignment::None => " --- |",
            TableAlignment::Left => " :--- |",
            TableAlignment::Center => " :---: |",
            TableAlignment::Right => " ---: |",
        });
    }
    row.push('\n');
    row
}
