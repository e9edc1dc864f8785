//! Resolution of the five XML-predefined entity references (`&amp;` and
//! friends) during parsing. Numeric character references are resolved by
//! `xmlparser` itself before we ever see the text, since those need no DTD;
//! named references do, so the parser hands them to us unresolved.
//!
//! Canonicalization has its own distinct escaping rules on the way out
//! (numeric character references for controls, `>` left bare in CDATA
//! attribute values) implemented in `escape.rs`; this module only ever runs
//! in the parse direction.

use std::borrow::Cow;

use crate::error::Error;

pub(crate) fn parse_predefined_entities(content: Cow<str>) -> Result<Cow<str>, Error> {
    let mut result = String::new();
    let mut chars = content.chars();
    let mut entity_seen = false;
    while let Some(c) = chars.next() {
        if c == '&' {
            let mut entity = String::new();
            let mut is_complete = false;
            for c in chars.by_ref() {
                if c == ';' {
                    is_complete = true;
                    break;
                }
                entity.push(c);
            }
            if !is_complete {
                return Err(Error::UnclosedEntity(entity));
            }
            entity_seen = true;
            match entity.as_str() {
                "amp" => result.push('&'),
                "apos" => result.push('\''),
                "gt" => result.push('>'),
                "lt" => result.push('<'),
                "quot" => result.push('"'),
                _ => return Err(Error::InvalidEntity(entity)),
            }
        } else {
            result.push(c);
        }
    }

    if !entity_seen {
        Ok(content)
    } else {
        Ok(result.into())
    }
}
