//! A stateful cursor over a [`Source`](memsource_source::Source).
//!
//! The cursor tracks a position, a limit and a default byte order. Relative accesses
//! read or write at the position and advance it; absolute accesses take an explicit
//! offset and leave the position alone. Both kinds are confined to `[0, limit)`.

pub mod cursor;
pub mod options;

pub use cursor::{Cursor, CursorState};
pub use options::CursorOptions;
