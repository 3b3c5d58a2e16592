//! Core definitions shared by all memsource-* crates: the error taxonomy, the
//! `Result` alias and the range validation helpers every access path relies upon.

pub mod error;
pub mod range;
pub mod result;

pub use error::{Access, Error, ErrorKind};
pub use result::Result;
