use kitscout_engine::page_text;
use pretty_assertions::assert_eq;

#[test]
fn text_extraction_skips_script_style_and_noscript() {
    let html = br#"
    <html><head>
      <title>Mouse NOX4 ELISA Kit</title>
      <style>.price { color: red; }</style>
      <script>var tracker = "CXCL10-decoy";</script>
    </head>
    <body>
      <h1>NOX4 ELISA Kit</h1>
      <noscript>enable javascript</noscript>
      <p>Validated for   mouse
         serum and plasma.</p>
    </body></html>
    "#;
    let page = page_text(html, Some("text/html; charset=utf-8"));
    assert_eq!(page.title, "Mouse NOX4 ELISA Kit");
    assert!(page.body.contains("NOX4 ELISA Kit"));
    assert!(page.body.contains("Validated for mouse serum and plasma."));
    assert!(!page.body.contains("CXCL10-decoy"));
    assert!(!page.body.contains("color: red"));
    assert!(!page.body.contains("enable javascript"));
}

#[test]
fn missing_title_yields_an_empty_title() {
    let page = page_text(b"<html><body><p>CXCL10 Kit</p></body></html>", None);
    assert_eq!(page.title, "");
    assert_eq!(page.body, "CXCL10 Kit");
}

#[test]
fn decode_respects_the_charset_header() {
    let bytes = b"<html><body>caf\xe9</body></html>"; // iso-8859-1
    let page = page_text(bytes, Some("text/html; charset=ISO-8859-1"));
    assert_eq!(page.body, "caf\u{e9}");
}

#[test]
fn decode_handles_a_utf8_bom() {
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice(b"<html><body>hello</body></html>");
    let page = page_text(&bytes, Some("text/html"));
    assert_eq!(page.body, "hello");
}

#[test]
fn content_joins_title_and_body_without_repeating_the_title() {
    let page = page_text(
        b"<html><head><title>Kit</title></head><body>details</body></html>",
        None,
    );
    assert_eq!(page.content(), "Kit details");
}

#[test]
fn content_of_a_titleless_page_is_just_the_body() {
    let page = page_text(b"<html><body>details</body></html>", None);
    assert_eq!(page.content(), "details");
}

#[test]
fn extraction_is_deterministic() {
    let html = b"<html><body><p>NOX4</p><p>CXCL10</p></body></html>";
    assert_eq!(page_text(html, None), page_text(html, None));
}
