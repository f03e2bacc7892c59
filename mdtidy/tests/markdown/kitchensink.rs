//! Formatting of a document touching every supported construct.

use crate::common::{read_fixture, render};
use insta::assert_snapshot;

#[test]
fn test_kitchensink_blocks() {
    let output = render(&read_fixture("kitchensink.md"));
    let (head, _) = output
        .split_once("Final")
        .expect("final paragraph to be rendered");

    assert_snapshot!(head, @r#"
# Document Title

Some *emphasis*, **strong** text and `code`.
A second line with a [link](http://example.com "Example").

## Section

- first
- second
  - nested one
  - nested two
- third

1. three
2. seven

> quoted line
> continues
>
> second paragraph

### Code

```rust
fn main(){}
```

---
"#);
}

#[test]
fn test_kitchensink_tail_keeps_hard_break() {
    let output = render(&read_fixture("kitchensink.md"));
    assert!(
        output.ends_with("---\n\nFinal ~~struck~~ words.  \nAfter a hard break.\n"),
        "unexpected tail: {output:?}"
    );
}

#[test]
fn test_kitchensink_has_no_trailing_blank_lines() {
    let output = render(&read_fixture("kitchensink.md"));
    assert!(!output.ends_with("\n\n"));
    for line in output.lines() {
        if line.ends_with(' ') {
            assert!(line.ends_with("words.  "), "trailing space in {line:?}");
        }
    }
}
