//! Annotated-text fixture: `[` and `]` mark the spans diagnostics must
//! point at, and indentation is stripped so fixtures can be written inline.

use lark::{Compilation, SyntaxTree, TextSpan, VariableStore};

/// Parsed fixture text with its marked spans in marker order.
pub struct AnnotatedText {
    pub text: String,
    pub spans: Vec<TextSpan>,
}

/// Strips common indentation and extracts `[...]` span markers.
pub fn parse(annotated: &str) -> AnnotatedText {
    let mut text = String::new();
    let mut spans = Vec::new();
    let mut starts = Vec::new();

    let mut position = 0;
    for c in unindent(annotated).chars() {
        match c {
            '[' => starts.push(position),
            ']' => {
                let start = starts
                    .pop()
                    .expect("unmatched ']' in annotated fixture text");
                spans.push(TextSpan::from_bounds(start, position));
            }
            c => {
                text.push(c);
                position += 1;
            }
        }
    }

    assert!(starts.is_empty(), "unmatched '[' in annotated fixture text");
    AnnotatedText { text, spans }
}

/// Splits expected diagnostics written one per line, unindented.
pub fn unindent_lines(text: &str) -> Vec<String> {
    unindent(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    let min_indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let unindented: Vec<&str> = lines
        .iter()
        .map(|line| {
            if line.len() < min_indent {
                line.trim_start()
            } else {
                &line[min_indent..]
            }
        })
        .collect();

    unindented.join("\n").trim_matches('\n').to_string()
}

/// Evaluates `annotated` and asserts the exact diagnostics, message and
/// span alike, in report order.
pub fn assert_diagnostics(annotated: &str, expected: &str) {
    let fixture = parse(annotated);
    let expected = unindent_lines(expected);
    assert_eq!(
        expected.len(),
        fixture.spans.len(),
        "fixture must mark one span per expected diagnostic"
    );

    let tree = SyntaxTree::parse(&fixture.text);
    let compilation = Compilation::new(tree);
    let result = compilation
        .evaluate(&mut VariableStore::new())
        .expect("diagnosed submissions never reach the evaluator");

    assert!(
        result.value.is_none(),
        "a diagnosed submission must not produce a value"
    );
    assert_eq!(
        result.diagnostics.len(),
        expected.len(),
        "diagnostics were {:?}",
        result.diagnostics
    );

    for (index, expected_message) in expected.iter().enumerate() {
        let diagnostic = &result.diagnostics[index];
        assert_eq!(diagnostic.message(), expected_message);
        assert_eq!(
            diagnostic.span(),
            fixture.spans[index],
            "span mismatch for {expected_message:?}"
        );
    }
}
