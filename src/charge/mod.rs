mod amount;
mod assembler;
mod options;
mod request;
mod text;

pub use self::amount::{Amount, AmountError};
pub use self::assembler::{EncodedPayload, PayloadAssembler, encode_payload};
pub use self::options::{Currency, MerchantCategoryCode, PayloadOptions, PayloadOptionsError};
pub use self::request::ChargeRequest;
pub use self::text::{MAX_CITY_CHARS, MAX_NAME_CHARS, normalize_display_text};
