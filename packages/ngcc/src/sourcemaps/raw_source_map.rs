// Raw Source Map
//
// Raw source map data structure.

use serde::Serialize;

// https://docs.google.com/document/d/1U1RGAehQwRypUTovF1KRlpiOFze0b-_2gc6fAH0KY0k/edit
const VERSION: u32 = 3;

const B64_DIGITS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Raw source map (version 3).
///
/// Field order matches the serialized JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSourceMap {
    pub version: u32,
    pub file: String,
    pub sources: Vec<String>,
    #[serde(rename = "sourcesContent")]
    pub sources_content: Vec<Option<String>>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl RawSourceMap {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            version: VERSION,
            file: file.into(),
            sources: Vec::new(),
            sources_content: Vec::new(),
            names: Vec::new(),
            mappings: String::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// VLQ encoding for source maps.
pub fn encode_vlq(value: i64) -> String {
    let mut value = if value < 0 {
        ((-value) << 1) + 1
    } else {
        value << 1
    };

    let mut out = String::new();
    loop {
        let mut digit = value & 31;
        value >>= 5;
        if value > 0 {
            // continuation bit
            digit |= 32;
        }
        out.push(B64_DIGITS[digit as usize] as char);

        if value == 0 {
            break;
        }
    }

    out
}
