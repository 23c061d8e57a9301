use core::fmt::{self, Write};

use embedded_can::{ExtendedId, Id, StandardId};

use crate::{
    codec::{
        pack_word, unpack_word, word_from_bytes, word_to_bytes, CAN_ID_EXTENDED_MAX,
        CAN_ID_STANDARD_MAX,
    },
    LengthError, ID_WORD_SIZE,
};

/// A CAN arbitration ID together with its frame flags, as carried in the
/// first 4 bytes of every frame buffer.
///
/// There are two ways to obtain one. [`Identifier::new`] checks `value`
/// against the 11 bit or 29 bit range and is meant for application input.
/// [`Identifier::from_raw_word`] and [`Identifier::from_bytes`] accept any
/// word coming off the wire and never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identifier {
    value: u32,
    extended: bool,
    remote: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    #[error("CAN Standard ID ({0:#X}) is out of the valid range (0..=0x7FF)")]
    StandardIdOutOfRange(u32),
    #[error("CAN Extended ID ({0:#X}) is out of the valid range (0..=0x1FFFFFFF)")]
    ExtendedIdOutOfRange(u32),
}

impl Identifier {
    pub fn new(value: u32, extended: bool, remote: bool) -> Result<Self, RangeError> {
        if extended && value > CAN_ID_EXTENDED_MAX {
            return Err(RangeError::ExtendedIdOutOfRange(value));
        }

        if !extended && value > CAN_ID_STANDARD_MAX {
            return Err(RangeError::StandardIdOutOfRange(value));
        }

        Ok(Self {
            value,
            extended,
            remote,
        })
    }

    /// Creates a non-remote 11 bit identifier
    pub fn standard(value: u32) -> Result<Self, RangeError> {
        Self::new(value, false, false)
    }

    /// Creates a non-remote 29 bit identifier
    pub fn extended(value: u32) -> Result<Self, RangeError> {
        Self::new(value, true, false)
    }

    /// Rebuilds an identifier from an id word received from the wire. The
    /// value is taken as-is, even a standard one above 0x7FF.
    pub const fn from_raw_word(word: u32) -> Self {
        let (value, extended, remote) = unpack_word(word);

        Self {
            value,
            extended,
            remote,
        }
    }

    /// Reads a little-endian id word
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::from_raw_word(word_from_bytes(bytes))
    }

    /// Builds an identifier from an `embedded-can` ID. This cannot fail
    /// since those are range checked already.
    pub fn from_id(id: impl Into<Id>, remote: bool) -> Self {
        let (value, extended) = match id.into() {
            Id::Standard(id) => (id.as_raw() as u32, false),
            Id::Extended(id) => (id.as_raw(), true),
        };

        Self {
            value,
            extended,
            remote,
        }
    }

    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn is_extended(&self) -> bool {
        self.extended
    }

    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// The id word as an integer, suitable for comparing against filters
    pub const fn word(&self) -> u32 {
        pack_word(self.value, self.extended, self.remote)
    }

    /// The id word serialized as it goes on the wire
    pub const fn to_bytes(&self) -> [u8; 4] {
        word_to_bytes(self.word())
    }

    /// Converts to an `embedded-can` ID, dropping the remote flag. Returns
    /// `None` for wire-decoded values outside the range of their mode.
    pub fn to_id(&self) -> Option<Id> {
        if self.extended {
            ExtendedId::new(self.value).map(Id::Extended)
        } else {
            u16::try_from(self.value)
                .ok()
                .and_then(StandardId::new)
                .map(Id::Standard)
        }
    }
}

impl From<Id> for Identifier {
    fn from(id: Id) -> Self {
        Self::from_id(id, false)
    }
}

impl From<StandardId> for Identifier {
    fn from(id: StandardId) -> Self {
        Self::from_id(id, false)
    }
}

impl From<ExtendedId> for Identifier {
    fn from(id: ExtendedId) -> Self {
        Self::from_id(id, false)
    }
}

impl From<Identifier> for u32 {
    fn from(id: Identifier) -> Self {
        id.word()
    }
}

impl TryFrom<&[u8]> for Identifier {
    type Error = LengthError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; ID_WORD_SIZE] = bytes
            .try_into()
            .map_err(|_| LengthError::IdWordLength(bytes.len()))?;

        Ok(Self::from_bytes(bytes))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rendered into a buffer first so callers can pad/align it
        let mut hex = heapless::String::<8>::new();

        if self.extended {
            write!(hex, "{:08X}", self.value)?;
        } else {
            write!(hex, "{:03X}", self.value)?;
        }

        f.pad(&hex)
    }
}

/// Builds a filter mask word with the id word layout.
///
/// Unlike [`Identifier::new`] the value is not range checked, so a mask can
/// set any of the 29 value bits regardless of `extended`.
pub const fn mask(value: u32, extended: bool, remote: bool) -> u32 {
    pack_word(value, extended, remote)
}
