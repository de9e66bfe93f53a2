use commit_sections::{CommitMessage, HeaderSet, SectionMap, build, known, parse, sections_of};

fn map(entries: &[(&str, &str)]) -> SectionMap {
    entries.iter().copied().collect()
}

#[test]
fn build_then_parse_reproduces_sections() {
    let sections = map(&[
        ("summary", "Make the frobnicator faster.\n\nIt was slow."),
        ("test plan", "cargo test"),
        ("reviewed by", "alice, bob"),
        ("differential revision", "D1234"),
    ]);
    let vocab = HeaderSet::from_sections(&sections);

    let reparsed = parse(&build(&sections), Some(&vocab));
    assert_eq!(reparsed, sections);
    assert_eq!(
        reparsed.headers().collect::<Vec<_>>(),
        sections.headers().collect::<Vec<_>>()
    );
}

#[test]
fn phabricator_message() {
    let message = "\
[frob] Make the frobnicator faster

Summary:
The cache was never consulted.
FBOnly: internal note

Test Plan: cargo test
Tests: also by hand

Reviewers: alice

Reviewed By: alice

Subscribers: bob

Differential Revision: https://phabricator.example.com/D1234
";
    let commit = CommitMessage::new(message).with_id("0123abcd");
    let sections = sections_of(&commit, Some(&HeaderSet::phabricator()));

    assert_eq!(
        sections.headers().collect::<Vec<_>>(),
        vec![
            "",
            known::SUMMARY,
            known::TEST_PLAN,
            known::TESTS,
            known::REVIEWERS,
            known::REVIEWED_BY,
            known::SUBSCRIBERS,
            known::DIFFERENTIAL_REVISION,
        ]
    );
    assert_eq!(
        sections.preamble(),
        Some("[frob] Make the frobnicator faster")
    );
    assert_eq!(
        sections.get(known::SUMMARY),
        Some("The cache was never consulted.\nFBOnly: internal note")
    );
    assert_eq!(
        sections.get(known::DIFFERENTIAL_REVISION),
        Some("https://phabricator.example.com/D1234")
    );

    let mut rebuilt = sections.clone();
    rebuilt.remove(known::REVIEWERS);
    rebuilt.remove(known::SUBSCRIBERS);
    rebuilt.remove("");
    assert_eq!(
        build(&rebuilt),
        "\
Summary:
The cache was never consulted.
FBOnly: internal note

Test Plan: cargo test

Tests: also by hand

Reviewed By: alice

Differential Revision: https://phabricator.example.com/D1234"
    );
}

#[test]
fn nested_header_moves_content_to_inner_section() {
    let mut vocab = HeaderSet::phabricator();
    vocab.insert("FBOnly");

    let sections = parse("Summary: FBOnly: secret\nmore secret", Some(&vocab));
    assert_eq!(sections, map(&[("fbonly", "secret\nmore secret")]));
}

#[test]
fn preamble_does_not_survive_rebuild_as_preamble() {
    // The nameless section renders with a bare colon, which no longer parses
    // as a header, so it stays in the preamble with the colon attached.
    let sections = map(&[("", "title"), ("summary", "body")]);
    let built = build(&sections);
    assert_eq!(built, ": title\n\nSummary: body");

    let reparsed = parse(&built, Some(&HeaderSet::phabricator()));
    assert_eq!(reparsed, map(&[("", ": title"), ("summary", "body")]));
}

#[test]
fn section_map_survives_toml() {
    let sections = parse(
        "Title\n\nSummary:\n  a\n  b\nTest Plan: none",
        Some(&HeaderSet::phabricator()),
    );
    let toml = sections.to_toml().unwrap();
    let back = SectionMap::from_toml(&toml).unwrap();
    assert_eq!(build(&back), build(&sections));
}
