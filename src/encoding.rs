use std::fmt::{Display, Formatter};
use std::str::FromStr;

use encoding_rs::Encoding;
use xhtmlchardet::detect;

use crate::error::{Error, Result};

/// The character encodings output can be produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CharacterEncoding {
    Ascii,
    /// ISO-8859-15.
    Latin0,
    /// ISO-8859-1.
    Latin1,
    /// Bytes are written as they are, without any conversion.
    Raw,
    #[default]
    Utf8,
    /// ISO-2022-JP.
    Iso2022,
    /// Mac OS Roman.
    Mac,
    Win1252,
    Ibm858,
    Utf16,
    Utf16le,
    Utf16be,
    Big5,
    Shiftjis,
}

impl CharacterEncoding {
    pub const ALL: [CharacterEncoding; 14] = [
        CharacterEncoding::Ascii,
        CharacterEncoding::Latin0,
        CharacterEncoding::Latin1,
        CharacterEncoding::Raw,
        CharacterEncoding::Utf8,
        CharacterEncoding::Iso2022,
        CharacterEncoding::Mac,
        CharacterEncoding::Win1252,
        CharacterEncoding::Ibm858,
        CharacterEncoding::Utf16,
        CharacterEncoding::Utf16le,
        CharacterEncoding::Utf16be,
        CharacterEncoding::Big5,
        CharacterEncoding::Shiftjis,
    ];

    /// The short name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        use CharacterEncoding::*;
        match self {
            Ascii => "ascii",
            Latin0 => "latin0",
            Latin1 => "latin1",
            Raw => "raw",
            Utf8 => "utf8",
            Iso2022 => "iso2022",
            Mac => "mac",
            Win1252 => "win1252",
            Ibm858 => "ibm858",
            Utf16 => "utf16",
            Utf16le => "utf16le",
            Utf16be => "utf16be",
            Big5 => "big5",
            Shiftjis => "shiftjis",
        }
    }

    /// The label to put in an XML declaration. `raw` has none.
    pub fn label(&self) -> Option<&'static str> {
        use CharacterEncoding::*;
        Some(match self {
            Ascii => "US-ASCII",
            Latin0 => "ISO-8859-15",
            Latin1 => "ISO-8859-1",
            Raw => return None,
            Utf8 => "UTF-8",
            Iso2022 => "ISO-2022-JP",
            Mac => "macintosh",
            Win1252 => "windows-1252",
            Ibm858 => "IBM00858",
            Utf16 => "UTF-16",
            Utf16le => "UTF-16LE",
            Utf16be => "UTF-16BE",
            Big5 => "Big5",
            Shiftjis => "Shift_JIS",
        })
    }

    /// Encode text into bytes.
    ///
    /// Characters the encoding can not represent are written as numeric
    /// character references. `utf16` starts with a big-endian byte order
    /// mark.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        use CharacterEncoding::*;
        match self {
            Raw | Utf8 => text.as_bytes().to_vec(),
            Ascii | Ibm858 => encode_single_byte(text, 0x80),
            Latin1 => encode_single_byte(text, 0x100),
            Latin0 => encode_rs(encoding_rs::ISO_8859_15, text),
            Iso2022 => encode_rs(encoding_rs::ISO_2022_JP, text),
            Mac => encode_rs(encoding_rs::MACINTOSH, text),
            Win1252 => encode_rs(encoding_rs::WINDOWS_1252, text),
            Big5 => encode_rs(encoding_rs::BIG5, text),
            Shiftjis => encode_rs(encoding_rs::SHIFT_JIS, text),
            Utf16 => {
                let mut bytes = vec![0xFE, 0xFF];
                bytes.extend(text.encode_utf16().flat_map(|unit| unit.to_be_bytes()));
                bytes
            }
            Utf16le => text
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect(),
            Utf16be => text
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect(),
        }
    }
}

fn encode_rs(encoding: &'static Encoding, text: &str) -> Vec<u8> {
    // encoding_rs writes unmappable characters as &#N; already
    let (bytes, _, _) = encoding.encode(text);
    bytes.into_owned()
}

fn encode_single_byte(text: &str, limit: u32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = c as u32;
        if code < limit {
            bytes.push(code as u8);
        } else {
            bytes.extend(format!("&#{};", code).into_bytes());
        }
    }
    bytes
}

impl FromStr for CharacterEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CharacterEncoding::ALL
            .iter()
            .find(|encoding| encoding.as_str() == s)
            .copied()
            .ok_or_else(|| Error::UnknownEncoding(s.to_string()))
    }
}

impl Display for CharacterEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub(crate) fn encoding(data: &[u8], hint: Option<String>) -> Option<&'static Encoding> {
    let mut cursor = std::io::Cursor::new(data);
    let charsets = detect(&mut cursor, hint).ok()?;
    // no encoding detected
    let label = if charsets.is_empty() {
        "UTF-8"
    } else {
        &charsets[0]
    };
    Encoding::for_label(label.as_bytes())
}

/// Decode XML bytes into a string, detecting the character encoding from
/// the byte order mark or the XML declaration. Undetectable input is
/// treated as UTF-8.
pub fn decode_xml(data: &[u8]) -> Result<String> {
    let encoding = encoding(data, None).unwrap_or(encoding_rs::UTF_8);
    let (text, used, had_errors) = encoding.decode(data);
    if had_errors {
        return Err(Error::Undecodable(used.name().to_string()));
    }
    Ok(text.into_owned())
}
