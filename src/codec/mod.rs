mod crc;
mod decoder;
mod field;

pub(crate) use self::crc::render_checksum;
pub use self::crc::{checksum_hex, crc16};
pub use self::decoder::{DecodeError, DecodedPayload, PayloadDecoder, RawField};
pub use self::field::{FieldCodec, FieldCodecError, MAX_FIELD_VALUE_LEN};
