//! Attribute-value and text escaping: character-by-character normalization,
//! sensitive to the attribute's declared type. Numeric character references
//! replace control characters, `>` is escaped in text but left bare in CDATA
//! attribute values, and tokenized attribute types get their whitespace
//! collapsed. Each function scans once and only builds an owned `String`
//! (via `Cow`) when something actually needed escaping.

use std::borrow::Cow;

use crate::value::AttributeType;

/// Escape a text node's content.
pub fn escape_text(content: &str) -> Cow<'_, str> {
    if !content
        .chars()
        .any(|c| matches!(c, '\r' | '&' | '<' | '>'))
    {
        return Cow::Borrowed(content);
    }
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\r' => out.push_str("&#xD;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Escape an attribute value, dispatching on `attr_type`.
pub fn escape_attribute_value(value: &str, attr_type: AttributeType) -> Cow<'_, str> {
    if attr_type.is_tokenized() {
        escape_tokenized_attribute(value)
    } else {
        escape_cdata_attribute(value)
    }
}

/// Namespace-declaration and CDATA-typed attribute escaping rule.
/// Note `>` is deliberately *not* escaped here.
pub fn escape_cdata_attribute(value: &str) -> Cow<'_, str> {
    if !value
        .chars()
        .any(|c| matches!(c, '\t' | '\n' | '\r' | '"' | '&' | '<'))
    {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len());
    push_cdata_escaped(&mut out, value);
    Cow::Owned(out)
}

fn push_cdata_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            other => out.push(other),
        }
    }
}

/// Whitespace-normalized attribute escaping for tokenized types: collapse
/// runs of `0x20` to one, strip leading/trailing spaces, then
/// apply the CDATA escape rule. Control characters still get numeric
/// character references, since whitespace *normalization* only concerns
/// literal ASCII spaces, not `\t`/`\n`/`\r`.
pub fn escape_tokenized_attribute(value: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(value.len());
    let mut pending_space = false;
    let mut started = false;
    for c in value.chars() {
        if c == ' ' {
            if started {
                pending_space = true;
            }
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        started = true;
        push_cdata_escaped(&mut out, &c.to_string());
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_escapes_cr_amp_lt_gt_only() {
        assert_eq!(
            escape_text("a&b<c>d\re"),
            "a&amp;b&lt;c&gt;d&#xD;e"
        );
    }

    #[test]
    fn text_leaves_plain_ascii_unescaped_and_unallocated() {
        assert!(matches!(escape_text("hello"), Cow::Borrowed("hello")));
    }

    #[test]
    fn cdata_attribute_escapes_scenario_4() {
        let input = "&<\t\n\r\">";
        assert_eq!(
            escape_cdata_attribute(input),
            r#"&amp;&lt;&#x9;&#xA;&#xD;&quot;>"#
        );
    }

    #[test]
    fn tokenized_attribute_collapses_interior_spaces() {
        assert_eq!(escape_tokenized_attribute("  a   b  c  "), "a b c");
    }

    #[test]
    fn tokenized_attribute_still_escapes_controls() {
        assert_eq!(escape_tokenized_attribute("a\tb"), "a&#x9;b");
    }

    #[test]
    fn escape_attribute_value_dispatches_on_type() {
        assert_eq!(
            escape_attribute_value("  a  b  ", AttributeType::NmTokens),
            "a b"
        );
        assert_eq!(
            escape_attribute_value("  a  b  ", AttributeType::CData),
            "  a  b  "
        );
    }
}
