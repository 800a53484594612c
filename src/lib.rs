mod app;
mod charge;
mod cli;
mod codec;
mod error;
mod profile;
mod protocol;
mod telemetry;
mod terminal;

pub use app::{run, run_with_clients};
pub use charge::{
    Amount, AmountError, ChargeRequest, Currency, EncodedPayload, MAX_CITY_CHARS, MAX_NAME_CHARS,
    MerchantCategoryCode, PayloadAssembler, PayloadOptions, PayloadOptionsError, encode_payload,
    normalize_display_text,
};
pub use cli::{
    Args, Command, DecodeArgs, EncodeArgs, LogLevel, OutputFormat, ProfileAction, ProfileArgs,
    ProfileLocation, ProfileSetArgs,
};
pub use codec::{
    DecodeError, DecodedPayload, FieldCodec, FieldCodecError, MAX_FIELD_VALUE_LEN,
    PayloadDecoder, RawField, checksum_hex, crc16,
};
pub use error::{PixError, ProfileError};
pub use profile::{MerchantProfile, ProfileStore};
pub use protocol::FieldTag;
pub use terminal::TerminalClient;
