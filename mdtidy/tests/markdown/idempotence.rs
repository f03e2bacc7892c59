//! Formatting already formatted Markdown must not change it.

use crate::common::{read_fixture, render};

fn assert_idempotent(src: &str) {
    let once = render(src);
    let twice = render(&once);
    assert_eq!(once, twice, "second pass changed the output");
}

#[test]
fn test_kitchensink_is_stable() {
    assert_idempotent(&read_fixture("kitchensink.md"));
}

#[test]
fn test_nested_containers_are_stable() {
    assert_idempotent(
        "> - a\n>   - b\n>\n> 1. c\n>\n>    ```\n>    code\n>    ```\n\n- x\n\n  > quoted\n  > more\n\n- y\n",
    );
}

#[test]
fn test_loose_and_tight_lists_are_stable() {
    assert_idempotent("1. a\n2. b\n\ntext\n\n- one\n\n- two\n  - nested\n");
}

#[test]
fn test_setext_and_emphasis_are_stable() {
    assert_idempotent("Title\n===\n\n_a_ __b__ ***c*** `d`\n\nSub\n---\n");
}

#[test]
fn test_already_canonical_input_is_unchanged() {
    let canonical = "# Title\n\nParagraph with *em* and **strong**.\n\n- a\n- b\n\n1. one\n2. two\n\n> quote\n\n```rust\nlet x = 1;\n```\n\n---\n";
    assert_eq!(render(canonical), canonical);
}

#[test]
fn test_escapes_are_stable() {
    assert_idempotent("1\\. a\n\n\\# b\n\n\\- c *d\\*e*\n\n[x](<a)b> \"t\\\\\")\n");
}

#[test]
fn test_tables_are_stable() {
    assert_idempotent("intro\n\n| a | b |\n|:-|-:|\n| `x` | y \\| z |\n| 1 |\n\nafter\n");
}
