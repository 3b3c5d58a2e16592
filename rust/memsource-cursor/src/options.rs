use memsource_bits::ByteOrder;
use memsource_common::Result;
use memsource_source::Source;

use crate::Cursor;

/// Initial state of a [`Cursor`].
///
/// Defaults: position `0`, limit at the end of the source, native byte order.
#[derive(Debug, Clone, Default)]
pub struct CursorOptions {
    position: u64,
    limit: Option<u64>,
    order: ByteOrder,
}

impl CursorOptions {
    pub fn position(mut self, position: u64) -> Self {
        self.position = position;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    /// Opens a cursor over `source`, failing if the position or the limit do not fit.
    pub fn open(&self, source: Source) -> Result<Cursor> {
        let limit = self.limit.unwrap_or_else(|| source.length());
        Cursor::with_bounds(source, self.position, limit, self.order)
    }
}
