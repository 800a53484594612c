pub(crate) mod command;
pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod profile;
pub(crate) mod ui;

pub use self::command::{Args, Command, LogLevel, OutputFormat};
pub use self::decode::DecodeArgs;
pub use self::encode::EncodeArgs;
pub use self::profile::{ProfileAction, ProfileArgs, ProfileLocation, ProfileSetArgs};
