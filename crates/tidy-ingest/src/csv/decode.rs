//! Byte decoding ahead of CSV parsing.

use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::options::TextEncoding;

/// Name of a UTF-16 byte-order mark at the start of `bytes`, if any.
pub fn detect_unsupported_bom(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xFE, ..] => Some("UTF-16 LE"),
        [0xFE, 0xFF, ..] => Some("UTF-16 BE"),
        _ => None,
    }
}

/// Decode raw file bytes into text.
///
/// UTF-8 input loses its byte-order mark; malformed sequences become U+FFFD
/// and are reported through `tracing`. Latin-1 decoding never fails and keeps
/// every byte, BOM included, as a character.
pub fn decode_bytes(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 => {
            let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
            if had_errors {
                tracing::warn!(
                    encoding = encoding.as_str(),
                    "input contained malformed UTF-8; replaced with U+FFFD"
                );
            }
            text.into_owned()
        }
        TextEncoding::Latin1 => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}
