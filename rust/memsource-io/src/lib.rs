//! Forward byte-stream adapters over a fixed window of a `Source`.
//!
//! [`SourceReader`] and [`SourceWriter`] implement `std::io::Read`/`Write` and `Seek`,
//! so a source can be fed to or filled from anything that speaks `std::io`. Each keeps
//! its own offset, independent of any cursor over the same source.

pub mod reader;
mod window;
pub mod writer;

pub use reader::SourceReader;
pub use writer::SourceWriter;
