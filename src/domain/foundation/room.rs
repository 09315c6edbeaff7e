//! Room numbers guests can report from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Lowest room number offered to guests.
pub const MIN_ROOM: u8 = 1;

/// Highest room number offered to guests.
pub const MAX_ROOM: u8 = 12;

/// A room number from the hotel's fixed floor plan.
///
/// Only rooms 1 through 12 exist; the selection keyboard offers exactly this
/// set, so a value outside it means a stale or forged input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RoomNumber(u8);

impl RoomNumber {
    /// Creates a room number, returning an error when outside the floor plan.
    pub fn new(number: u8) -> Result<Self, ValidationError> {
        if !(MIN_ROOM..=MAX_ROOM).contains(&number) {
            return Err(ValidationError::out_of_range(
                "room",
                MIN_ROOM as i32,
                MAX_ROOM as i32,
                number as i32,
            ));
        }
        Ok(Self(number))
    }

    /// Returns every room in ascending order.
    pub fn all() -> Vec<RoomNumber> {
        (MIN_ROOM..=MAX_ROOM).map(RoomNumber).collect()
    }

    /// Returns the numeric value.
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for RoomNumber {
    type Error = ValidationError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl From<RoomNumber> for u8 {
    fn from(room: RoomNumber) -> u8 {
        room.0
    }
}

impl FromStr for RoomNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u8 = s.parse().map_err(|_| {
            ValidationError::invalid_format("room", format!("not a room number: '{}'", s))
        })?;
        Self::new(number)
    }
}
