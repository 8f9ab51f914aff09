// SPDX-License-Identifier: GPL-3.0

use crate::errors::Error;

/// Decodes a byte array returned by a contract, e.g. a token name, into text.
///
/// # Arguments
/// * `bytes` - The UTF-8 encoded bytes.
pub fn decode_hex_bytes_to_text(bytes: &[u8]) -> Result<String, Error> {
	String::from_utf8(bytes.to_vec()).map_err(|e| Error::TextDecoding(e.to_string()))
}

/// Decodes a hex string, with or without a `0x` prefix, into text.
///
/// # Arguments
/// * `input` - A string containing hex-encoded UTF-8 bytes.
pub fn decode_hex_str_to_text(input: &str) -> Result<String, Error> {
	let bytes = parse_hex_bytes(input)?;
	decode_hex_bytes_to_text(&bytes)
}

/// Encodes text as a `0x` prefixed hex string.
///
/// # Arguments
/// * `text` - The text to encode.
pub fn encode_text_to_hex(text: &str) -> String {
	format!("0x{}", hex::encode(text.as_bytes()))
}

/// Parse hex encoded bytes.
///
/// # Arguments
/// * `input` - A string containing hex-encoded bytes.
pub fn parse_hex_bytes(input: &str) -> Result<Vec<u8>, Error> {
	let input = input.trim();
	let digits = input.strip_prefix("0x").unwrap_or(input);
	hex::decode(digits).map_err(|e| Error::HexParsing(format!("{}", e)))
}
