//! Parser wiring
//!
//! Parsing is comrak's job. This module only fixes the extension set the
//! formatter expects: tables, strikethrough and autolinks on top of
//! CommonMark. Fenced code, space-required ATX headings and the
//! no-intraword rule for `_` are CommonMark behavior already.
//!
//! Backslash escapes are kept as `Escaped` nodes wrapping the escaped
//! character, so the renderer can write them back.

use comrak::nodes::AstNode;
use comrak::{Arena, ComrakOptions};

pub fn parser_options(tables: bool) -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = tables;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.render.escaped_char_spans = true;
    options
}

/// Parse Markdown source into a comrak tree allocated in `arena`.
pub fn parse_document<'a>(
    arena: &'a Arena<AstNode<'a>>,
    source: &str,
    tables: bool,
) -> &'a AstNode<'a> {
    comrak::parse_document(arena, source, &parser_options(tables))
}
