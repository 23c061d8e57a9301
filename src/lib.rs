#![no_std]

mod codec;
mod filter;
mod frame;
mod id;

// Wire layout of one frame buffer (little-endian id word, then payload):
// [ id0 id1 id2 id3 | d0 .. d7 ]
//   bit 31 reserved, bit 30 remote, bit 29 extended, bits 0..=28 value

const ID_WORD_SIZE: usize = 4;

pub const MAX_DATA_LENGTH: usize = 8;
pub const MAX_FRAME_SIZE: usize = ID_WORD_SIZE + MAX_DATA_LENGTH;

pub use codec::{
    CAN_ID_EXTENDED, CAN_ID_EXTENDED_MAX, CAN_ID_MASK, CAN_ID_REMOTE, CAN_ID_STANDARD_MAX,
};
pub use filter::*;
pub use frame::*;
pub use id::*;

pub use embedded_can::{ExtendedId, Id, StandardId};
