use std::borrow::Cow;

use crate::error::Error;

/// Normalize line endings: `\r\n` and a lone `\r` both become `\n`.
///
/// This applies to the raw document text before parsing, so a carriage
/// return only survives when written as a character reference.
pub(crate) fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if !content.contains('\r') {
        return Cow::Borrowed(content);
    }
    Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Decode predefined entities and character references.
///
/// Any other entity is rejected; documents that rely on entities declared
/// in a DTD are not supported.
pub(crate) fn parse_predefined_entities(content: &str) -> Result<Cow<'_, str>, Error> {
    if !content.contains('&') {
        return Ok(Cow::Borrowed(content));
    }
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '&' {
            result.push(c);
            continue;
        }
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
        match entity.as_str() {
            "amp" => result.push('&'),
            "apos" => result.push('\''),
            "gt" => result.push('>'),
            "lt" => result.push('<'),
            "quot" => result.push('"'),
            _ => result.push(parse_character_reference(&entity)?),
        }
    }
    Ok(Cow::Owned(result))
}

fn parse_character_reference(entity: &str) -> Result<char, Error> {
    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(decimal) = entity.strip_prefix('#') {
        decimal.parse::<u32>().ok()
    } else {
        None
    };
    code.and_then(char::from_u32)
        .ok_or_else(|| Error::InvalidEntity(entity.to_string()))
}

/// Decode an attribute value: literal whitespace becomes a space, then
/// entities are decoded.
pub(crate) fn parse_attribute(content: &str) -> Result<Cow<'_, str>, Error> {
    if content.contains(['\t', '\n', '\r']) {
        let normalized = content.replace(['\t', '\n', '\r'], " ");
        Ok(Cow::Owned(parse_predefined_entities(&normalized)?.into_owned()))
    } else {
        parse_predefined_entities(content)
    }
}

/// Escape text content.
pub(crate) fn serialize_text(content: &str) -> Cow<'_, str> {
    escape(content, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '\r' => Some("&#13;"),
        _ => None,
    })
}

/// Escape an attribute value for use between double quotes.
pub(crate) fn serialize_attribute(content: &str) -> Cow<'_, str> {
    escape(content, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '"' => Some("&quot;"),
        '\t' => Some("&#9;"),
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        _ => None,
    })
}

fn escape(content: &str, replacement: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    if !content.chars().any(|c| replacement(c).is_some()) {
        return Cow::Borrowed(content);
    }
    let mut result = String::with_capacity(content.len() + 8);
    for c in content.chars() {
        match replacement(c) {
            Some(s) => result.push_str(s),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}
