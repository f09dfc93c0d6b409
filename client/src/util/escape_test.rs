use super::*;

#[test]
fn html_escapes_markup_and_quotes() {
    assert_eq!(
        html(r#"<img src="x" onerror='y'>&"#),
        "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt;&amp;"
    );
}

#[test]
fn html_leaves_plain_text() {
    assert_eq!(html("Abisko Stordalen Ö"), "Abisko Stordalen Ö");
}

#[test]
fn css_color_rejects_injection() {
    assert_eq!(css_color("#2e7d32", "#000"), "#2e7d32");
    assert_eq!(css_color("#abc", "#000"), "#abc");
    assert_eq!(css_color("red;background:url(x)", "#000"), "#000");
    assert_eq!(css_color("#12345", "#000"), "#000");
}
