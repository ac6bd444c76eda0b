//! Record identifiers and their generation capability.
//!
//! # Responsibility
//! - Define the 128-bit identifier shared by category and memo rows.
//! - Provide an injectable generator producing fresh identifiers on demand.
//!
//! # Invariants
//! - The rendered form is always 32 uppercase hex characters, zero-padded.
//! - Uniqueness relies on generator entropy; the store is never consulted.

use serde::de::{Error as DeError, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// 128-bit identifier stored as a 16-byte blob in the destination database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId([u8; 16]);

impl RecordId {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Parses an identifier from a raw blob column value.
    ///
    /// Returns `None` unless the slice is exactly 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; 16] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Parses the fixed-width hex rendering produced by `Display`.
    ///
    /// Accepts both hex cases; rejects anything that is not exactly 32 hex
    /// digits.
    pub fn parse_hex(value: &str) -> Option<Self> {
        if value.len() != 32 || !value.is_ascii() {
            return None;
        }
        let mut bytes = [0u8; 16];
        for (index, pair) in value.as_bytes().chunks(2).enumerate() {
            let text = std::str::from_utf8(pair).ok()?;
            bytes[index] = u8::from_str_radix(text, 16).ok()?;
        }
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Renders the identifier as 32 uppercase hex characters.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_hex(&text).ok_or_else(|| {
            DeError::invalid_value(Unexpected::Str(&text), &"32 hex characters")
        })
    }
}

/// Capability producing fresh 128-bit identifiers, with no ordering
/// guarantee across calls.
///
/// Injected into the conversion so tests can substitute deterministic
/// sequences for the random production source.
pub trait IdGenerator {
    fn next_id(&mut self) -> RecordId;
}

/// Production generator backed by UUIDv4 randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> RecordId {
        RecordId(Uuid::new_v4().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, RecordId, UuidIdGenerator};

    #[test]
    fn hex_rendering_is_fixed_width_uppercase() {
        let id = RecordId::from_bytes([0xAB; 16]);
        let hex = id.to_hex();
        assert_eq!(hex.len(), 32);
        assert_eq!(hex, "AB".repeat(16));
    }

    #[test]
    fn hex_rendering_zero_pads_small_values() {
        let mut bytes = [0u8; 16];
        bytes[15] = 0x0F;
        let hex = RecordId::from_bytes(bytes).to_hex();
        assert_eq!(hex, format!("{}0F", "0".repeat(30)));
    }

    #[test]
    fn parse_hex_round_trips_display() {
        let id = RecordId::from_bytes([0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(RecordId::parse_hex(&id.to_hex()), Some(id));
    }

    #[test]
    fn parse_hex_rejects_wrong_length_and_non_hex() {
        assert_eq!(RecordId::parse_hex("ABC"), None);
        assert_eq!(RecordId::parse_hex(&"G".repeat(32)), None);
    }

    #[test]
    fn from_slice_requires_exactly_sixteen_bytes() {
        assert!(RecordId::from_slice(&[0u8; 16]).is_some());
        assert!(RecordId::from_slice(&[0u8; 15]).is_none());
        assert!(RecordId::from_slice(&[0u8; 17]).is_none());
    }

    #[test]
    fn uuid_generator_produces_distinct_well_formed_ids() {
        let mut ids = UuidIdGenerator;
        let first = ids.next_id();
        let second = ids.next_id();
        assert_ne!(first, second);
        assert_eq!(first.to_hex().len(), 32);
        assert!(first.to_hex().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn serde_uses_hex_string_form() {
        let id = RecordId::from_bytes([0x5A; 16]);
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!("5A".repeat(16)));

        let decoded: RecordId = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, id);
    }
}
