pub mod error;
pub mod field;
pub mod parse;
pub mod validate;
pub mod wasm;

pub use error::{ErrorKind, ErrorList, FieldError, InvalidSpec};
pub use field::FieldPath;
