use core::fmt;

use embedded_can::{Id, StandardId};
use heapless::Vec;

use crate::{
    codec::CAN_ID_STANDARD_MAX, Identifier, ID_WORD_SIZE, MAX_DATA_LENGTH, MAX_FRAME_SIZE,
};

/// Represents one CAN 2.0 frame as exchanged with the adapter.
///
/// On the wire it is the 4 byte id word of its [`Identifier`] followed by
/// the payload verbatim. The payload length is implied by the buffer length,
/// so remote frames keep their declared length as payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    id: Identifier,
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    data: Vec<u8, MAX_DATA_LENGTH>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LengthError {
    #[error("Frame payload has ({0:?}) bytes but at most 8 are allowed")]
    PayloadTooLong(usize),
    #[error("An id word is 4 bytes long but ({0:?}) bytes were given")]
    IdWordLength(usize),
    #[error("Encoding needs ({0:?}) bytes but the buffer only holds ({1:?})")]
    BufferTooSmall(usize, usize),
}

impl Frame {
    /// Creates a new frame. `data` must have a length in the range 0..=8 or
    /// else [`LengthError::PayloadTooLong`] is returned.
    pub fn new(id: Identifier, data: &[u8]) -> Result<Self, LengthError> {
        let data = Vec::from_slice(data).map_err(|_| LengthError::PayloadTooLong(data.len()))?;

        Ok(Self { id, data })
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of payload bytes (the declared length for remote frames)
    pub fn dlc(&self) -> usize {
        self.data.len()
    }

    pub fn is_remote(&self) -> bool {
        self.id.is_remote()
    }

    pub fn is_extended(&self) -> bool {
        self.id.is_extended()
    }

    /// Size of the encoded frame buffer
    pub fn encoded_len(&self) -> usize {
        ID_WORD_SIZE + self.data.len()
    }

    pub fn encode(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        self.id
            .to_bytes()
            .into_iter()
            .chain(self.data.iter().copied())
            .collect()
    }

    /// Encodes into the start of `buffer` and returns the number of bytes
    /// written.
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, LengthError> {
        let len = self.encoded_len();

        if buffer.len() < len {
            return Err(LengthError::BufferTooSmall(len, buffer.len()));
        }

        buffer[..ID_WORD_SIZE].copy_from_slice(&self.id.to_bytes());
        buffer[ID_WORD_SIZE..len].copy_from_slice(&self.data);

        Ok(len)
    }

    /// Decodes one frame buffer. The id word is never range checked, but a
    /// buffer with less than 4 bytes or more than 8 payload bytes is
    /// rejected.
    pub fn decode(buffer: &[u8]) -> Result<Self, LengthError> {
        if buffer.len() < ID_WORD_SIZE {
            return Err(LengthError::IdWordLength(buffer.len()));
        }

        let (id_word, payload) = buffer.split_at(ID_WORD_SIZE);

        Self::new(Identifier::try_from(id_word)?, payload)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8} [{}]", self.id, self.data.len())?;

        if self.id.is_remote() {
            return f.write_str(" remote frame");
        }

        for byte in &self.data {
            write!(f, " {byte:02X}")?;
        }

        Ok(())
    }
}

impl embedded_can::Frame for Frame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        Frame::new(Identifier::from_id(id, false), data).ok()
    }

    /// The payload is filled with `dlc` zero bytes so the length is carried
    /// on the wire.
    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > MAX_DATA_LENGTH {
            return None;
        }

        Frame::new(Identifier::from_id(id, true), &[0u8; MAX_DATA_LENGTH][..dlc]).ok()
    }

    fn is_extended(&self) -> bool {
        self.id.is_extended()
    }

    fn is_remote_frame(&self) -> bool {
        self.id.is_remote()
    }

    fn id(&self) -> Id {
        // Standard values decoded above 0x7FF keep only their low 11 bits
        self.id.to_id().unwrap_or_else(|| {
            let raw = (self.id.value() & CAN_ID_STANDARD_MAX) as u16;
            Id::Standard(StandardId::new(raw).unwrap_or(StandardId::MAX))
        })
    }

    fn dlc(&self) -> usize {
        self.data.len()
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
