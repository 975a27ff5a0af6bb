//! Document identifiers.
//!
//! Todos are keyed by the document store's native identifier: twelve bytes
//! rendered as 24 lowercase hexadecimal characters. The layout of a generated
//! id is:
//!
//! ```text
//! ┌──────────────┬──────────────────┬───────────────┐
//! │ 4 bytes      │ 5 bytes          │ 3 bytes       │
//! │ unix seconds │ process-unique   │ counter       │
//! │ (big endian) │ random value     │ (big endian)  │
//! └──────────────┴──────────────────┴───────────────┘
//! ```
//!
//! Identifiers arriving from clients are plain strings. Use [`ObjectId::is_valid`]
//! as a guard before any lookup, or [`ObjectId::parse`] to obtain a typed id.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

/// Number of bytes in an [`ObjectId`].
pub const OBJECT_ID_LEN: usize = 12;

/// Number of characters in the hex form of an [`ObjectId`].
pub const OBJECT_ID_HEX_LEN: usize = OBJECT_ID_LEN * 2;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Error returned when a string is not a well-formed object id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid object id: {0:?}")]
pub struct InvalidObjectId(pub String);

/// Twelve-byte document identifier.
///
/// # Examples
///
/// ```
/// use todolist_core::id::ObjectId;
///
/// let id = ObjectId::new();
/// let hex = id.to_string();
/// assert_eq!(hex.len(), 24);
/// assert!(ObjectId::is_valid(&hex));
/// assert_eq!(ObjectId::parse(&hex).unwrap(), id);
///
/// assert!(!ObjectId::is_valid("not-an-id"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Generate a fresh identifier.
    ///
    /// Ids generated by one process are unique and sort by creation second.
    #[must_use]
    pub fn new() -> Self {
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let counter = next_counter();

        let mut bytes = [0u8; OBJECT_ID_LEN];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process_unique());
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Build an identifier from its raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw bytes of the identifier.
    #[must_use]
    pub const fn bytes(&self) -> [u8; OBJECT_ID_LEN] {
        self.0
    }

    /// Check whether `candidate` is exactly 24 lowercase hex characters.
    ///
    /// ```
    /// use todolist_core::id::ObjectId;
    ///
    /// assert!(ObjectId::is_valid("507f1f77bcf86cd799439011"));
    /// assert!(!ObjectId::is_valid("507F1F77BCF86CD799439011"));
    /// assert!(!ObjectId::is_valid("507f1f77bcf86cd79943901"));
    /// assert!(!ObjectId::is_valid(""));
    /// ```
    #[must_use]
    pub fn is_valid(candidate: &str) -> bool {
        candidate.len() == OBJECT_ID_HEX_LEN
            && candidate
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    /// Same as [`ObjectId::is_valid`], treating an absent id as invalid.
    #[must_use]
    pub fn is_valid_opt(candidate: Option<&str>) -> bool {
        candidate.is_some_and(Self::is_valid)
    }

    /// Parse a hex identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidObjectId`] carrying the input when it fails
    /// [`ObjectId::is_valid`].
    pub fn parse(candidate: &str) -> Result<Self, InvalidObjectId> {
        if !Self::is_valid(candidate) {
            return Err(InvalidObjectId(candidate.to_string()));
        }

        let mut bytes = [0u8; OBJECT_ID_LEN];
        hex::decode_to_slice(candidate, &mut bytes)
            .map_err(|_| InvalidObjectId(candidate.to_string()))?;
        Ok(Self(bytes))
    }

    /// Creation time embedded in the first four bytes.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        let seconds = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        Utc.timestamp_opt(i64::from(seconds), 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

fn process_unique() -> &'static [u8; 5] {
    static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
    PROCESS_UNIQUE.get_or_init(rand::random)
}

fn next_counter() -> u32 {
    static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
    COUNTER
        .get_or_init(|| AtomicU32::new(rand::random::<u32>() & COUNTER_MASK))
        .fetch_add(1, Ordering::Relaxed)
        & COUNTER_MASK
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ObjectId {
    type Error = InvalidObjectId;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
