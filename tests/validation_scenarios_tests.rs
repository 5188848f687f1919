//! End-to-end validation of whole template documents
use webrelease_language_server::core::LineIndex;
use webrelease_language_server::validation::tags::check_tags;
use webrelease_language_server::{
    DiagnosticCode, Severity, TagRegistry, ValidationResult, validate, validate_document,
};

fn codes(content: &str) -> Vec<DiagnosticCode> {
    validate(content, &TagRegistry::builtin())
        .into_iter()
        .filter_map(|d| d.code)
        .collect()
}

fn count(content: &str, code: DiagnosticCode) -> usize {
    codes(content).into_iter().filter(|c| *c == code).count()
}

#[test]
fn test_interpolation_in_html_is_clean() {
    assert!(codes("<p>%pageTitle()%</p>").is_empty());
}

#[test]
fn test_unknown_tag_reported_once() {
    let diagnostics = validate(
        r#"<wr-invalid condition="x"></wr-invalid>"#,
        &TagRegistry::builtin(),
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some(DiagnosticCode::UnknownTag));
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert!(diagnostics[0].message.contains("wr-invalid"));
}

#[test]
fn test_missing_closing_tag() {
    let diagnostics = validate(r#"<wr-if condition="true">x</body>"#, &TagRegistry::builtin());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some(DiagnosticCode::UnclosedTag));
    assert_eq!(diagnostics[0].message, "Unclosed tag 'wr-if'");
}

#[test]
fn test_self_closing_variable_inside_loop() {
    let content =
        r#"<wr-for list="items" variable="item"><wr-variable name="x" value="1"/></wr-for>"#;
    assert!(codes(content).is_empty());
}

#[test]
fn test_trailing_operator_in_interpolation() {
    let diagnostics = validate("%1 + %", &TagRegistry::builtin());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some(DiagnosticCode::ExprSyntaxError));
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert!(diagnostics[0].message.contains("Unexpected end of expression"));
}

#[test]
fn test_unknown_attribute_is_only_a_warning() {
    let content = r#"<wr-if foo="1" condition="true">"#;
    let mut result = ValidationResult::new();
    check_tags(
        content,
        &LineIndex::new(content),
        &TagRegistry::builtin(),
        &mut result,
    );

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, Some(DiagnosticCode::UnknownAttribute));
    assert_eq!(result.diagnostics[0].severity, Severity::Warning);
    assert!(result.diagnostics[0].message.contains("'foo'"));
    assert_eq!(result.error_count(), 0);

    // The full engine additionally notices the missing </wr-if>
    assert_eq!(
        codes(content),
        vec![DiagnosticCode::UnknownAttribute, DiagnosticCode::UnclosedTag]
    );
}

#[test]
fn test_full_template_is_clean() {
    let template = r#"<!DOCTYPE html>
<html>
<head>
    <title>%pageTitle()%</title>
</head>
<body>
    <h1>%pageTitle()%</h1>
    <p>%text%</p>

    <wr-if condition="isNotNull(email)">
        <wr-then>
            <a href="mailto:%email%">%email%</a>
        </wr-then>
        <wr-else>
            Email not provided
        </wr-else>
    </wr-if>

    <table>
    <wr-for list="items" variable="item" count="i" index="idx">
        <tr>
            <td>%i%</td>
            <td>%idx%</td>
            <td>%item.name%</td>
            <td>%item.price * 1.1%</td>
        </tr>
    </wr-for>
    </table>

    <wr-switch value="item.kind">
        <wr-case value="a">A
        <wr-case value="b">B
        <wr-default>other
    </wr-switch>
    <wr-comment>Rendered at %formatDate(currentTime(), "yyyy/MM/dd")%</wr-comment>
</body>
</html>"#;

    let result = validate_document(template, &TagRegistry::builtin());
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        result.diagnostics
    );
}

#[test]
fn test_idempotent() {
    let content = "<wr-if condition=\"(a\">\n%b +%\n</wr-for>\n<wr-nope>";
    let registry = TagRegistry::builtin();
    let first = validate(content, &registry);
    let second = validate(content, &registry);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_balanced_nesting_has_no_closure_diagnostics() {
    let documents = [
        r#"<wr-if condition="a"></wr-if>"#,
        r#"<wr-if condition="a"><wr-for list="l"><wr-if condition="b"></wr-if></wr-for></wr-if>"#,
        r#"<wr-if condition="a"></wr-if><wr-for list="l"></wr-for><wr-comment></wr-comment>"#,
        r#"<wr-conditional><wr-cond condition="a"></wr-cond><wr-cond condition="b"></wr-cond></wr-conditional>"#,
    ];

    for document in documents {
        assert_eq!(count(document, DiagnosticCode::UnclosedTag), 0, "{document}");
        assert_eq!(count(document, DiagnosticCode::UnmatchedClosingTag), 0, "{document}");
    }
}

#[test]
fn test_removing_closing_tag_reports_its_opener() {
    let valid = r#"<wr-if condition="a"><p>x</p></wr-if>
<wr-for list="l" variable="v">%v%</wr-for>"#;
    assert!(codes(valid).is_empty());

    let broken = valid.replace("</wr-for>", "");
    let diagnostics = validate(&broken, &TagRegistry::builtin());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some(DiagnosticCode::UnclosedTag));
    assert_eq!(diagnostics[0].message, "Unclosed tag 'wr-for'");
    assert_eq!(diagnostics[0].range.start.line, 1);

    let broken = valid.replace("</wr-if>", "");
    let diagnostics = validate(&broken, &TagRegistry::builtin());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Unclosed tag 'wr-if'");
}

#[test]
fn test_optional_close_tags_never_affect_balance() {
    for tag in ["wr-then", "wr-else", "wr-case", "wr-default"] {
        let opened_only = format!("<{tag}>x");
        let closed_only = format!("x</{tag}>");
        let both = format!("<{tag}>x</{tag}>");
        for document in [opened_only, closed_only, both] {
            assert!(codes(&document).is_empty(), "{document}");
        }
    }
}

#[test]
fn test_opener_cut_off_at_end_of_file() {
    assert_eq!(
        codes(r#"<wr-for list="items" variable="item">%item%</wr-for><wr-if condition="a""#),
        vec![DiagnosticCode::UnclosedTag]
    );
}

#[test]
fn test_unterminated_unknown_tag_keeps_following_pair_balanced() {
    assert_eq!(
        codes(r#"<wr-a <wr-if condition="x">y</wr-if>"#),
        vec![DiagnosticCode::UnknownTag, DiagnosticCode::UnclosedTag]
    );
}

#[test]
fn test_condition_error_and_unclosed_tag() {
    let codes = codes(r#"<wr-if condition="a ==">"#);
    assert_eq!(
        codes,
        vec![DiagnosticCode::ConditionSyntaxError, DiagnosticCode::UnclosedTag]
    );
}

#[test]
fn test_diagnostic_positions_are_zero_based_code_points() {
    let content = "<p>東京</p>\n<p>%都市 +%</p>";
    let diagnostics = validate(content, &TagRegistry::builtin());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].range.start.line, 1);
    assert_eq!(diagnostics[0].range.start.character, 3);
    assert_eq!(diagnostics[0].range.end.character, 9);
}

#[test]
fn test_pathological_input_does_not_panic() {
    let registry = TagRegistry::builtin();
    let deep = format!("%{}1{}%", "(".repeat(5000), ")".repeat(5000));
    let diagnostics = validate(&deep, &registry);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("maximum depth"));

    let noise: String = (0u32..2000)
        .filter_map(|i| char::from_u32((i * 7919) % 0x3000))
        .collect();
    let _ = validate(&noise, &registry);
    let _ = validate("<wr-<wr-</wr-%%%\"<wr-if condition=\"%\">", &registry);
}
