//! CRC-16/CCITT-FALSE as required by the BR Code checksum field.
//!
//! Parameters: polynomial `0x1021`, initial value `0xFFFF`, input and output
//! not reflected, no final XOR. Each character contributes the low byte of
//! its code point, most-significant bit first. Encoded payloads are ASCII,
//! so this is the same as running the CRC over the UTF-8 bytes.

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Computes the checksum of `payload`.
///
/// `payload` must already end with the `6304` placeholder when computing the
/// value for a BR Code.
///
/// ```
/// use pixcode::crc16;
///
/// assert_eq!(0x29B1, crc16("123456789"));
/// assert_eq!(0xFFFF, crc16(""));
/// ```
#[must_use]
pub fn crc16(payload: &str) -> u16 {
    payload
        .chars()
        .map(|character| (u32::from(character) & 0xFF) as u8)
        .fold(INITIAL, update)
}

/// Computes the checksum of `payload` rendered as four uppercase hex digits.
///
/// ```
/// use pixcode::checksum_hex;
///
/// assert_eq!("29B1", checksum_hex("123456789"));
/// ```
#[must_use]
pub fn checksum_hex(payload: &str) -> String {
    render_checksum(crc16(payload))
}

/// Renders a checksum as four uppercase, zero-padded hex digits.
#[must_use]
pub(crate) fn render_checksum(crc: u16) -> String {
    format!("{crc:04X}")
}

fn update(mut crc: u16, byte: u8) -> u16 {
    for shift in (0..8).rev() {
        let bit = (byte >> shift) & 1 == 1;
        let c15 = (crc >> 15) & 1 == 1;
        crc <<= 1;
        if c15 != bit {
            crc ^= POLYNOMIAL;
        }
    }
    crc
}
