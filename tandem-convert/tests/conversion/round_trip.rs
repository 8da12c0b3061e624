//! Round-trip tests: Markdown → editor HTML → Markdown.
//!
//! The round trip must be idempotent: a second pass over already-converted
//! output produces no further changes, and normalization must converge
//! rather than oscillate.

use insta::assert_snapshot;
use proptest::prelude::*;
use tandem_convert::{html_to_markdown, markdown_to_html};

fn round_trip(md: &str) -> String {
    let html = markdown_to_html(md).expect("markdown_to_html");
    html_to_markdown(&html).expect("html_to_markdown")
}

#[test]
fn strikethrough_survives() {
    assert_eq!(round_trip("~~gone~~").trim(), "~~gone~~");
}

#[test]
fn table_survives() {
    let result = round_trip("| A | B |\n| --- | --- |\n| 1 | 2 |");
    assert_eq!(result.trim(), "| A | B |\n| --- | --- |\n| 1 | 2 |");
}

#[test]
fn task_list_survives() {
    let result = round_trip("- [ ] todo\n- [x] done");
    assert_eq!(result.trim(), "- [ ] todo\n- [x] done");
}

#[test]
fn nested_task_list_survives() {
    let result = round_trip("- [ ] outer\n  - [x] inner");
    assert_eq!(result.trim(), "- [ ] outer\n  - [x] inner");
}

#[test]
fn autolink_survives() {
    let result = round_trip("https://example.com");
    assert!(result.contains("https://example.com"));
}

#[test]
fn loose_list_becomes_tight() {
    let result = round_trip("- a\n\n- b");
    assert_eq!(result.trim(), "- a\n- b");
}

#[test]
fn emphasis_with_embedded_link_stays_single_span() {
    let input = "*Note that icons are [hidden by default](https://example.com/docs). \
                 Select **Icon Visibility**\u{00A0}for each command.*";
    let result = round_trip(input);
    assert!(result.contains("[hidden by default](https://example.com/docs)"));
    assert!(result.contains("**Icon Visibility**"));
    assert!(!result.contains("&#x20;"));
    assert!(!result.contains("&#xA0;"));
    assert!(!result.contains("\\***\\*"));
    // stable under a second pass
    assert_eq!(round_trip(&result), result);
}

#[test]
fn escaped_punctuation_remains_readable() {
    let input = "*Literal brackets \\[x\\] and stars \\*\\*not bold\\*\\* with \
                 [link](https://example.com).*";
    let result = round_trip(input);
    assert!(result.contains("[link](https://example.com)"));
    assert_eq!(round_trip(&result), result);
}

#[test]
fn unicode_around_emphasis_boundaries() {
    let input = "*Emoji 😀 and CJK 漢字 with [link](https://example.com/u) text.*";
    let result = round_trip(input);
    assert!(result.contains("[link](https://example.com/u)"));
    assert!(result.contains("😀"));
    assert!(result.contains("漢字"));
    assert_eq!(round_trip(&result), result);
}

#[test]
fn kitchensink_round_trip_snapshot() {
    let input = concat!(
        "# Kitchen Sink\n",
        "\n",
        "Some **bold** text with a [link](https://example.com) and *emphasis*.\n",
        "\n",
        "- first item\n",
        "- second item\n",
        "\n",
        "1. one\n",
        "2. two\n",
        "\n",
        "- [ ] open task\n",
        "- [x] closed task\n",
        "\n",
        "> a quote\n",
        "\n",
        "```rust\n",
        "fn main() {}\n",
        "```\n",
        "\n",
        "| A | B |\n",
        "| --- | --- |\n",
        "| 1 | 2 |\n",
        "\n",
        "---\n",
        "\n",
        "Final paragraph with `code` and ~~strike~~.\n",
    );
    let result = round_trip(input);
    assert_snapshot!(result, @r"
    # Kitchen Sink

    Some **bold** text with a [link](https://example.com) and *emphasis*.

    - first item
    - second item

    1. one
    2. two

    - [ ] open task
    - [x] closed task

    > a quote

    ```rust
    fn main() {}
    ```

    | A | B |
    | --- | --- |
    | 1 | 2 |

    ---

    Final paragraph with `code` and ~~strike~~.
    ");
    // a kitchen-sink document is a fixed point of the round trip
    assert_eq!(round_trip(&result), result);
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..6).prop_map(|words| words.join(" "))
}

fn block() -> impl Strategy<Value = String> {
    prop_oneof![
        sentence(),
        (1..4u32, sentence()).prop_map(|(depth, text)| {
            format!("{} {}", "#".repeat(depth as usize), text)
        }),
        sentence().prop_map(|text| format!("**{text}** and *more*")),
        prop::collection::vec(word(), 1..4)
            .prop_map(|items| items.iter().map(|w| format!("- {w}")).collect::<Vec<_>>().join("\n")),
        (any::<bool>(), word()).prop_map(|(checked, text)| {
            format!("- [{}] {text}", if checked { "x" } else { " " })
        }),
        word().prop_map(|text| format!("```\n{text}\n```")),
        sentence().prop_map(|text| format!("> {text}")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // for all documents m: round_trip(round_trip(m)) == round_trip(m)
    #[test]
    fn round_trip_is_idempotent(blocks in prop::collection::vec(block(), 1..5)) {
        let document = blocks.join("\n\n");
        let once = round_trip(&document);
        let twice = round_trip(&once);
        prop_assert_eq!(once, twice);
    }
}
