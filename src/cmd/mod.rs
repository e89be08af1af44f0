/// Payload decode command.
pub mod decode;
/// JSON-to-payload encode command.
pub mod encode;
/// Payload statistics command.
pub mod info;
/// Catalog request build command.
pub mod request;

mod print;
mod util;
