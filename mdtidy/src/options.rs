//! Renderer options and the node interception hook

use crate::codefmt::CodeFormatterRegistry;
use comrak::nodes::AstNode;
use std::fmt;

/// How level 1 and 2 headings are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadingStyle {
    /// `#`-prefixed headings at every level
    #[default]
    Atx,
    /// `=` / `-` underlines for levels 1 and 2, `#` prefixes from level 3
    Setext,
}

/// Result of consulting a [`RenderNodeHook`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The hook rendered the node; default handling is skipped.
    Handled,
    /// Default handling applies.
    Unhandled,
}

/// Interception point consulted before the renderer's own handling of a node.
///
/// Called once on entering and once on leaving every node. Text written to
/// `out` goes through the renderer's emitter, so container prefixes (list
/// indentation, `> ` quote markers) are applied to it.
pub trait RenderNodeHook {
    fn render_node<'a>(
        &self,
        out: &mut dyn fmt::Write,
        node: &'a AstNode<'a>,
        entering: bool,
    ) -> HookOutcome;
}

/// Options for formatting
pub struct Options {
    /// Emit ANSI bold escapes around strong text.
    pub terminal: bool,
    pub heading_style: HeadingStyle,
    /// Optional override for rendering individual nodes.
    pub hook: Option<Box<dyn RenderNodeHook>>,
    /// Formatters for fenced code blocks, looked up by language tag.
    pub code_formatters: CodeFormatterRegistry,
    /// Enable the table extension when parsing. Tables are never rendered.
    pub tables: bool,
}

impl Options {
    /// Options that leave every code block untouched.
    pub fn without_code_formatting() -> Self {
        Options {
            code_formatters: CodeFormatterRegistry::new(),
            ..Options::default()
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            terminal: false,
            heading_style: HeadingStyle::default(),
            hook: None,
            code_formatters: CodeFormatterRegistry::default(),
            tables: true,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("terminal", &self.terminal)
            .field("heading_style", &self.heading_style)
            .field("hook", &self.hook.is_some())
            .field("code_formatters", &self.code_formatters.list_formatters())
            .field("tables", &self.tables)
            .finish()
    }
}
