use xml_c14n::{canonicalize_subset_to_string, canonicalize_to_string, parse, Algorithm, XPathContext};

fn canon(xml: &str, algorithm: Algorithm) -> String {
    let doc = parse(xml).unwrap();
    canonicalize_to_string(&doc, algorithm).unwrap()
}

#[test]
fn scenario_1_empty_element() {
    assert_eq!(canon("<doc/>", Algorithm::Inclusive), "<doc></doc>");
}

#[test]
fn scenario_2_attribute_ordering() {
    let out = canon(
        r#"<e xmlns:b="http://b/" xmlns:a="http://a/" b:x="1" a:y="2" z="3"/>"#,
        Algorithm::Inclusive,
    );
    assert_eq!(
        out,
        r#"<e xmlns:a="http://a/" xmlns:b="http://b/" z="3" a:y="2" b:x="1"></e>"#
    );
}

#[test]
fn scenario_3_default_namespace_undeclaration() {
    let out = canon(
        r#"<p xmlns="http://p/"><c xmlns=""/></p>"#,
        Algorithm::Inclusive,
    );
    assert_eq!(out, r#"<p xmlns="http://p/"><c xmlns=""></c></p>"#);
}

#[test]
fn scenario_4_cdata_attribute_escaping_does_not_escape_gt() {
    let out = canon(
        r#"<e a="&amp;&lt;&#9;&#10;&#13;&quot;&gt;"/>"#,
        Algorithm::Inclusive,
    );
    assert_eq!(
        out,
        "<e a=\"&amp;&lt;&#x9;&#xA;&#xD;&quot;>\"></e>"
    );
}

#[test]
fn scenario_5_text_node_escaping() {
    let out = canon("<e>a&amp;b&lt;c&gt;d&#13;e</e>", Algorithm::Inclusive);
    assert_eq!(out, "<e>a&amp;b&lt;c&gt;d&#xD;e</e>");
}

#[test]
fn scenario_6_exclusive_vs_inclusive_pruning() {
    let xml = r#"<a xmlns:u="http://u/" xmlns:v="http://v/"><b u:x="1"/></a>"#;

    let inclusive = canon(xml, Algorithm::Inclusive);
    assert_eq!(
        inclusive,
        r#"<a xmlns:u="http://u/" xmlns:v="http://v/"><b u:x="1"></b></a>"#
    );

    let exclusive = canon(xml, Algorithm::Exclusive);
    assert_eq!(exclusive, r#"<a xmlns:u="http://u/"><b u:x="1"></b></a>"#);
}

#[test]
fn scenario_7_prolog_epilog_comments_with_comments_mode() {
    let out = canon(
        r#"<?xml-stylesheet href="s.css"?><!--hi--><r/><!--bye-->"#,
        Algorithm::InclusiveWithComments,
    );
    assert_eq!(
        out,
        "<?xml-stylesheet href=\"s.css\"?>\n<!--hi-->\n<r></r>\n<!--bye-->"
    );
}

#[test]
fn prolog_epilog_comments_dropped_without_with_comments() {
    let out = canon(
        r#"<?xml-stylesheet href="s.css"?><!--hi--><r/><!--bye-->"#,
        Algorithm::Inclusive,
    );
    assert_eq!(out, "<?xml-stylesheet href=\"s.css\"?>\n<r></r>");
}

#[test]
fn inherited_xml_attribute_crosses_excluded_ancestor() {
    let doc = parse(r#"<a xml:lang="en"><b/></a>"#).unwrap();
    // Only `b` is selected; `a` (the carrier of `xml:lang`) is excluded, so
    // `b` must pick the attribute up itself to stay self-contained.
    let out =
        canonicalize_subset_to_string(&doc, Algorithm::Inclusive, "//b", &XPathContext::document())
            .unwrap();
    assert_eq!(out, r#"<b xml:lang="en"></b>"#);
}

#[test]
fn exclusive_mode_does_not_inherit_xml_attributes_across_a_subset_gap() {
    let doc = parse(r#"<a xml:lang="en"><b/></a>"#).unwrap();
    let out =
        canonicalize_subset_to_string(&doc, Algorithm::Exclusive, "//b", &XPathContext::document())
            .unwrap();
    assert_eq!(out, "<b></b>");
}

#[test]
fn output_is_utf8_and_never_contains_a_raw_carriage_return() {
    let out = canon("<e>line1\rline2</e>", Algorithm::Inclusive);
    assert!(!out.contains('\r'));
    assert!(String::from_utf8(out.clone().into_bytes()).is_ok());
}

#[test]
fn tokenized_attribute_whitespace_is_normalized() {
    use xml_c14n::{attr_typed, AttributeType, Canonicalizer, DocumentBuilder};

    let mut builder = DocumentBuilder::new();
    builder
        .element_local("e")
        .attribute(attr_typed("tokens", "  a   b  c  ", AttributeType::NmTokens))
        .end();
    let doc = builder.finish().unwrap();

    let mut out: Vec<u8> = Vec::new();
    let mut c14n = Canonicalizer::new(&mut out, false, false);
    c14n.write(&doc).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        r#"<e tokens="a b c"></e>"#
    );
}

#[test]
fn subset_query_unioning_nodes_and_namespaces_still_emits_declarations() {
    let doc = parse(r#"<a xmlns:u="http://u/"><b u:x="1"/><c/></a>"#).unwrap();
    let out = canonicalize_subset_to_string(
        &doc,
        Algorithm::Inclusive,
        "(//. | //@* | //namespace::*) - (//c)",
        &XPathContext::document(),
    )
    .unwrap();
    assert_eq!(out, r#"<a xmlns:u="http://u/"><b u:x="1"></b></a>"#);
}

#[test]
fn idempotent_under_reparse_and_recanonicalize() {
    let xml = r#"<a xmlns:b="http://b/" xmlns:a="http://a/" b:x="1" a:y="2" z="3"><t>a&amp;b</t></a>"#;
    let once = canon(xml, Algorithm::Inclusive);
    let twice = canon(&once, Algorithm::Inclusive);
    assert_eq!(once, twice);
}
