/// Bits 0..=28 of an id word hold the identifier value
pub const CAN_ID_MASK: u32 = 0x1FFF_FFFF;
/// Set when the id word carries a 29 bit identifier
pub const CAN_ID_EXTENDED: u32 = 1 << 29;
/// Set when the id word belongs to a remote transmission request
pub const CAN_ID_REMOTE: u32 = 1 << 30;

pub const CAN_ID_EXTENDED_MAX: u32 = 0x1FFF_FFFF;
pub const CAN_ID_STANDARD_MAX: u32 = 0x7FF;

/* Encoding */

/// Combines an identifier value and its flags into an id word. The value is
/// masked to 29 bits but otherwise not checked.
pub const fn pack_word(value: u32, extended: bool, remote: bool) -> u32 {
    let mut word = value & CAN_ID_MASK;

    if extended {
        word |= CAN_ID_EXTENDED;
    }

    if remote {
        word |= CAN_ID_REMOTE;
    }

    word
}

pub const fn word_to_bytes(word: u32) -> [u8; 4] {
    word.to_le_bytes()
}

/* Decoding */

/// Splits an id word into `(value, extended, remote)`. Bit 31 is ignored.
pub const fn unpack_word(word: u32) -> (u32, bool, bool) {
    (
        word & CAN_ID_MASK,
        word & CAN_ID_EXTENDED != 0,
        word & CAN_ID_REMOTE != 0,
    )
}

pub const fn word_from_bytes(bytes: [u8; 4]) -> u32 {
    u32::from_le_bytes(bytes)
}
