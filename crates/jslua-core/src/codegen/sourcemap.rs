//! Simplified Source Map v3 emission.
//!
//! One mapping per generated statement, VLQ-encoded. Byte-accurate maps are
//! a non-goal; this is enough to point a Lua line back at the JS statement
//! it came from.

use serde::{Deserialize, Serialize};

use crate::span::Span;

const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// The JSON structure for source maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMap {
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub sources: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Inline source map data URI, suitable for a trailing Lua comment.
    pub fn to_data_uri(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        let encoded =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, json.as_bytes());
        Ok(format!(
            "data:application/json;charset=utf-8;base64,{}",
            encoded
        ))
    }

    pub fn to_comment(&self) -> Result<String, serde_json::Error> {
        Ok(format!("--# sourceMappingURL={}", self.to_data_uri()?))
    }
}

/// Accumulates (generated position, source position) pairs while the
/// generator writes, then encodes them as a v3 mappings string.
#[derive(Debug)]
pub struct SourceMapBuilder {
    source_file: String,
    mappings: Vec<Mapping>,
    generated_line: usize,
    generated_column: usize,
}

#[derive(Debug, Clone, Copy)]
struct Mapping {
    generated_line: usize,
    generated_column: usize,
    source_line: usize,
    source_column: usize,
}

impl SourceMapBuilder {
    pub fn new(source_file: String) -> Self {
        Self {
            source_file,
            mappings: Vec::new(),
            generated_line: 0,
            generated_column: 0,
        }
    }

    /// Record that the text emitted next originates at `span`.
    pub fn add_mapping(&mut self, span: Span) {
        self.mappings.push(Mapping {
            generated_line: self.generated_line,
            generated_column: self.generated_column,
            source_line: span.line as usize,
            source_column: span.column as usize,
        });
    }

    /// Advance the generated position past `text`.
    pub fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.generated_line += 1;
                self.generated_column = 0;
            } else {
                self.generated_column += 1;
            }
        }
    }

    pub fn build(self) -> SourceMap {
        let mappings = self.encode_mappings();
        SourceMap {
            version: 3,
            file: None,
            sources: vec![self.source_file],
            mappings,
        }
    }

    /// Delta-encode all mappings: a segment per mapping, `;` per generated
    /// line, fields relative to the previous segment.
    fn encode_mappings(&self) -> String {
        let mut result = String::new();
        let mut prev = Mapping {
            generated_line: 0,
            generated_column: 0,
            source_line: 0,
            source_column: 0,
        };

        for mapping in &self.mappings {
            while prev.generated_line < mapping.generated_line {
                result.push(';');
                prev.generated_line += 1;
                prev.generated_column = 0;
            }
            if !result.is_empty() && !result.ends_with(';') {
                result.push(',');
            }

            // Segment: [generated_col, source_index (always 0), source_line, source_col]
            encode_vlq(
                mapping.generated_column as i64 - prev.generated_column as i64,
                &mut result,
            );
            encode_vlq(0, &mut result);
            encode_vlq(
                mapping.source_line as i64 - prev.source_line as i64,
                &mut result,
            );
            encode_vlq(
                mapping.source_column as i64 - prev.source_column as i64,
                &mut result,
            );

            prev = *mapping;
        }

        result
    }
}

/// Base64 VLQ encoding: low bit carries the sign, five payload bits per
/// digit, bit 5 marks continuation.
fn encode_vlq(value: i64, out: &mut String) {
    let mut vlq = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };

    loop {
        let mut digit = (vlq & 0x1f) as u8;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0x20;
        }
        out.push(BASE64_CHARS[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}
