use indoc::indoc;

use crate::{
    registry::Registry,
    tests::{assert_covers, classified, test_with_gherkin, LOGIN_FEATURE},
    text::{
        syntax_highlighter::{HighlightKind, SyntaxHighlighter},
        trie::Trie,
    },
};

use super::pattern::Pattern;

use crate::text::syntax_highlighter::HighlightKind::{
    Comment, Keyword, Meta, String as Str, Symbol, Variable,
};

test_with_gherkin!(login_feature, LOGIN_FEATURE, |text, highlights| {
    assert_eq!(
        classified(text, highlights),
        vec![
            (Meta, "@smoke"),
            (Keyword, "Scenario"),
            (Keyword, "Given"),
            (Str, "\"alice\""),
            (Keyword, "Then"),
            (Variable, "<status>"),
        ]
    );
});

test_with_gherkin!(empty_text, "", |_, highlights| {
    assert!(highlights.is_empty());
});

test_with_gherkin!(plain_text_is_one_span, "just some words.\n", |text, highlights| {
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].kind, HighlightKind::Normal);
    assert_eq!(highlights[0].text(text), text);
});

test_with_gherkin!(asterisk_is_symbol, "  * a step", |text, highlights| {
    assert_eq!(classified(text, highlights), vec![(Symbol, "*")]);
});

test_with_gherkin!(tag_runs_to_whitespace, "@wip-1 @smoke@fast\n", |text, highlights| {
    assert_eq!(
        classified(text, highlights),
        vec![(Meta, "@wip-1"), (Meta, "@smoke"), (Meta, "@fast")]
    );
});

test_with_gherkin!(lone_at_is_plain, "mail @ home", |text, highlights| {
    assert!(classified(text, highlights).is_empty());
});

test_with_gherkin!(table_row_cells_are_strings, "  | a | b |\n", |text, highlights| {
    assert_eq!(classified(text, highlights), vec![(Str, " a "), (Str, " b ")]);

    let pipes = highlights
        .iter()
        .filter(|highlight| highlight.text(text).contains('|'))
        .count();

    assert_eq!(pipes, 3);
});

test_with_gherkin!(
    table_rows_on_consecutive_lines,
    indoc! {"
        Examples:
          | name  | status |
          | alice | ok     |
    "},
    |text, highlights| {
        assert_eq!(
            classified(text, highlights),
            vec![
                (Keyword, "Examples"),
                (Str, " name  "),
                (Str, " status "),
                (Str, " alice "),
                (Str, " ok     "),
            ]
        );
    }
);

test_with_gherkin!(
    unterminated_table_row_ends_at_line_end,
    "| a | b\nGiven x",
    |text, highlights| {
        assert_eq!(
            classified(text, highlights),
            vec![(Str, " a "), (Str, " b"), (Keyword, "Given")]
        );
    }
);

test_with_gherkin!(keywords_in_cells_stay_strings, "| Given | Then |", |text, highlights| {
    assert_eq!(
        classified(text, highlights),
        vec![(Str, " Given "), (Str, " Then ")]
    );
});

test_with_gherkin!(placeholder_includes_delimiters, "Then I see <user name>.", |text, highlights| {
    assert_eq!(
        classified(text, highlights),
        vec![(Keyword, "Then"), (Variable, "<user name>")]
    );
});

test_with_gherkin!(placeholder_spans_lines, "Given x <a\nb> y", |text, highlights| {
    assert_eq!(
        classified(text, highlights),
        vec![(Keyword, "Given"), (Variable, "<a\nb>")]
    );
});

test_with_gherkin!(
    unterminated_placeholder_runs_to_end_of_text,
    "a < b\nThen c",
    |text, highlights| {
        assert_eq!(classified(text, highlights), vec![(Variable, "< b\nThen c")]);
    }
);

test_with_gherkin!(table_row_closes_after_underscore_suffix, "| a |_x\nGiven", |text, highlights| {
    assert_eq!(
        classified(text, highlights),
        vec![(Str, " a "), (Keyword, "Given")]
    );
});

test_with_gherkin!(comment_runs_to_line_end, "# Given nothing\nGiven", |text, highlights| {
    assert_eq!(
        classified(text, highlights),
        vec![(Comment, "# Given nothing"), (Keyword, "Given")]
    );
});

test_with_gherkin!(comment_at_end_of_text, "Then # done", |text, highlights| {
    assert_eq!(
        classified(text, highlights),
        vec![(Keyword, "Then"), (Comment, "# done")]
    );
});

test_with_gherkin!(comment_before_crlf, "# c\r\nThen", |text, highlights| {
    assert_eq!(
        classified(text, highlights),
        vec![(Comment, "# c"), (Keyword, "Then")]
    );
});

test_with_gherkin!(
    doc_string_spans_lines,
    indoc! {r#"
        Given a body
          """
          Given "quoted" <inside>
          """
        Then done
    "#},
    |text, highlights| {
        assert_eq!(
            classified(text, highlights),
            vec![
                (Keyword, "Given"),
                (Str, "\"\"\"\n  Given \"quoted\" <inside>\n  \"\"\""),
                (Keyword, "Then"),
            ]
        );
    }
);

test_with_gherkin!(
    unterminated_doc_string_runs_to_end,
    "\"\"\"\nGiven\nThen",
    |text, highlights| {
        assert_eq!(classified(text, highlights), vec![(Str, text)]);
    }
);

test_with_gherkin!(
    quoted_string_with_escapes,
    r#"Given "say \"hi\"" Then"#,
    |text, highlights| {
        assert_eq!(
            classified(text, highlights),
            vec![(Keyword, "Given"), (Str, r#""say \"hi\"""#), (Keyword, "Then")]
        );
    }
);

test_with_gherkin!(
    unterminated_quoted_string_ends_at_line_end,
    "\"open\nGiven",
    |text, highlights| {
        assert_eq!(
            classified(text, highlights),
            vec![(Str, "\"open"), (Keyword, "Given")]
        );
    }
);

test_with_gherkin!(keywords_in_strings_stay_strings, "\"But\" 'But'", |text, highlights| {
    assert_eq!(
        classified(text, highlights),
        vec![(Str, "\"But\""), (Keyword, "But")]
    );
});

test_with_gherkin!(
    keywords_match_whole_words_only,
    "Givens Andrew But_x xGiven given 3Then",
    |text, highlights| {
        assert!(classified(text, highlights).is_empty());
    }
);

test_with_gherkin!(
    keyword_phrases_prefer_longest,
    indoc! {"
        Business Need: x
        Scenario Outline: y
        Scenario Template: z
        Scenarios:
        Scenario Outlines
        Business
    "},
    |text, highlights| {
        assert_eq!(
            classified(text, highlights),
            vec![
                (Keyword, "Business Need"),
                (Keyword, "Scenario Outline"),
                (Keyword, "Scenario Template"),
                (Keyword, "Scenarios"),
                (Keyword, "Scenario"),
            ]
        );
    }
);

test_with_gherkin!(
    all_keywords_are_recognized,
    "Feature Background Ability Examples Given And Then But When",
    |text, highlights| {
        let keywords: Vec<_> = classified(text, highlights)
            .into_iter()
            .map(|(kind, keyword)| {
                assert_eq!(kind, Keyword);
                keyword
            })
            .collect();

        assert_eq!(keywords, text.split(' ').collect::<Vec<_>>());
    }
);

test_with_gherkin!(
    multibyte_text_is_covered,
    "Given café ✓ \"naïve\" <ünïcode> @été",
    |text, highlights| {
        assert_eq!(
            classified(text, highlights),
            vec![
                (Keyword, "Given"),
                (Str, "\"naïve\""),
                (Variable, "<ünïcode>"),
                (Meta, "@été"),
            ]
        );
    }
);

#[test]
fn highlighting_is_repeatable() -> Result<(), crate::config::ConfigError> {
    let registry = Registry::with_builtin()?;
    let Some(language) = registry.get("feature") else {
        panic!("feature alias should be registered");
    };

    let first: Vec<_> = language.highlight(LOGIN_FEATURE).collect();
    let second: Vec<_> = language.highlight(LOGIN_FEATURE).collect();

    assert_eq!(first, second);
    assert_covers(LOGIN_FEATURE, &first);

    Ok(())
}

#[test]
fn highlights_are_lazy() -> Result<(), crate::config::ConfigError> {
    let registry = Registry::with_builtin()?;
    let Some(language) = registry.get("gherkin") else {
        panic!("gherkin should be registered");
    };

    let mut highlights = SyntaxHighlighter::highlight(&language.syntax, LOGIN_FEATURE);

    let first = highlights.next();
    assert_eq!(first.map(|highlight| highlight.kind), Some(Meta));
    assert_eq!(highlights.relevance(), 1);

    Ok(())
}

#[test]
fn relevance_sums_matched_rules() -> Result<(), crate::config::ConfigError> {
    let registry = Registry::with_builtin()?;
    let Some(language) = registry.get("gherkin") else {
        panic!("gherkin should be registered");
    };

    assert_eq!(language.relevance("* * *"), 0);
    assert_eq!(language.relevance("Given"), 1);
    assert_eq!(language.relevance("| a | b |"), 3);
    assert_eq!(language.relevance(LOGIN_FEATURE), 6);
    assert_eq!(language.relevance("plain words"), 0);

    Ok(())
}

#[test]
fn trie_longest_match() {
    let mut trie = Trie::new();
    assert!(trie.is_empty());

    trie.insert("Scenario");
    trie.insert("Scenario Outline");
    trie.insert("");

    assert!(!trie.is_empty());
    assert!(trie.contains("Scenario"));
    assert!(!trie.contains("Scenario Out"));

    assert_eq!(trie.longest_match("Scenario Outline:", 0), Some(16));
    assert_eq!(trie.longest_match("Scenario Out", 0), Some(8));
    assert_eq!(trie.longest_match("  Scenario", 2), Some(10));
    assert_eq!(trie.longest_match("Scenarios", 0), None);
    assert_eq!(trie.longest_match("Scene", 0), None);
}

#[test]
fn trie_grows_past_node_capacity() {
    let mut trie = Trie::new();
    let words = ["a", "b", "c", "d", "e", "f", "g", "h", "i"];

    for word in words {
        trie.insert(word);
    }

    for word in words {
        assert!(trie.contains(word));
    }

    assert!(!trie.contains("j"));

    trie.clear();
    assert!(trie.is_empty());
    assert!(!trie.contains("a"));
}

#[test]
fn match_joined_delimiter() -> Result<(), &'static str> {
    let pattern = Pattern::parse("\"\"\"")?;

    assert_eq!(pattern.match_text("\"\"\" doc", 0), Some(3));
    assert_eq!(pattern.match_text("x\"\"\"", 1), Some(4));
    assert_eq!(pattern.match_text("\"\" doc", 0), None);

    // A literal never ends inside a grapheme.
    let pattern = Pattern::parse("e")?;

    assert_eq!(pattern.match_text("e\u{301}x", 0), None);
    assert_eq!(pattern.match_text("ex", 0), Some(1));

    Ok(())
}

#[test]
fn match_simple_class() -> Result<(), &'static str> {
    let pattern = Pattern::parse("[abcdef]+")?;

    assert_eq!(pattern.match_text("fdcbbzyx", 0), Some(5));
    assert_eq!(pattern.match_text("!", 0), None);
    assert_eq!(pattern.match_text("a", 0), Some(1));

    Ok(())
}

#[test]
fn match_negated_class_stops_at_end() -> Result<(), &'static str> {
    let pattern = Pattern::parse("[^|%n]+")?;

    assert_eq!(pattern.match_text(" a |", 0), Some(3));
    assert_eq!(pattern.match_text("abc", 0), Some(3));
    assert_eq!(pattern.match_text("ab\r\ncd", 0), Some(2));
    assert_eq!(pattern.match_text("|", 0), None);
    assert_eq!(pattern.match_text("", 0), None);

    Ok(())
}

#[test]
fn match_tag() -> Result<(), &'static str> {
    let pattern = Pattern::parse("@[^@%s]+")?;

    assert_eq!(pattern.match_text("@smoke@fast", 0), Some(6));
    assert_eq!(pattern.match_text("@wip-1 x", 0), Some(6));
    assert_eq!(pattern.match_text("@ x", 0), None);

    Ok(())
}

#[test]
fn match_line_end() -> Result<(), &'static str> {
    let pattern = Pattern::parse("|%w*$")?;

    assert_eq!(pattern.match_text("| a |", 4), Some(5));
    assert_eq!(pattern.match_text("|x\nnext", 0), Some(2));
    assert_eq!(pattern.match_text("|_x\nnext", 0), Some(3));
    assert_eq!(pattern.match_text("|\r\n", 0), Some(1));
    assert_eq!(pattern.match_text("| a", 0), None);
    assert_eq!(pattern.match_text("|x-", 0), None);

    let pattern = Pattern::parse("$")?;

    assert_eq!(pattern.match_text("ab", 2), Some(2));
    assert_eq!(pattern.match_text("ab", 1), None);

    Ok(())
}

#[test]
fn match_repetition_backtracks() -> Result<(), &'static str> {
    let pattern = Pattern::parse("a%w*b")?;

    assert_eq!(pattern.match_text("axxbxxb c", 0), Some(7));
    assert_eq!(pattern.match_text("ab", 0), Some(2));
    assert_eq!(pattern.match_text("axx", 0), None);

    let pattern = Pattern::parse("x%s+y")?;

    assert_eq!(pattern.match_text("x \t y", 0), Some(5));
    assert_eq!(pattern.match_text("xy", 0), None);

    Ok(())
}

#[test]
fn match_escaped_and_plain_punctuation() -> Result<(), &'static str> {
    let pattern = Pattern::parse("%*")?;

    assert_eq!(pattern.match_text("* step", 0), Some(1));
    assert_eq!(pattern.match_text("step", 0), None);

    let pattern = Pattern::parse("(a-b?)")?;

    assert_eq!(pattern.match_text("(a-b?)", 0), Some(6));
    assert_eq!(pattern.match_text("(ab)", 0), None);

    Ok(())
}

#[test]
fn parse_errors() {
    assert_eq!(Pattern::parse("[abc").err(), Some("unterminated class"));
    assert_eq!(
        Pattern::parse("abc%").err(),
        Some("expected another character after an escape character")
    );
    assert_eq!(
        Pattern::parse("[a%").err(),
        Some("expected another character after an escape character")
    );
    assert_eq!(
        Pattern::parse("+a").err(),
        Some("modifier must follow a literal or a class")
    );
    assert_eq!(
        Pattern::parse("a**").err(),
        Some("modifier must follow a literal or a class")
    );
    assert_eq!(
        Pattern::parse("$*").err(),
        Some("modifier must follow a literal or a class")
    );
}

#[test]
fn covering_holds_for_awkward_input() -> Result<(), crate::config::ConfigError> {
    let registry = Registry::with_builtin()?;
    let Some(language) = registry.get("gherkin") else {
        panic!("gherkin should be registered");
    };

    let inputs = [
        "|",
        "||",
        "| |\n|",
        "<",
        "\"",
        "\"\"",
        "\"\"\"",
        "\"\\",
        "#",
        "@",
        "@@",
        "*\n*",
        "\r\n\r\n",
        "\t| a |\t\n",
        "Given\u{301} Then",
    ];

    for input in inputs {
        let highlights: Vec<_> = language.highlight(input).collect();
        assert_covers(input, &highlights);
    }

    Ok(())
}
