use memsource_bits::{ByteOrder, Scalar};
use memsource_common::{
    Error, Result,
    range::{byte_len, check_offset, check_range},
    verify_arg,
};
use memsource_source::Source;

/// The `(position, limit, order)` triple saved and restored by the state stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub position: u64,
    pub limit: u64,
    pub order: ByteOrder,
}

/// Position/limit/order bookkeeping over a [`Source`].
///
/// Every mutation keeps `position <= limit <= source.length()`. Mutating methods take
/// `&mut self`; wrap the cursor in a mutex to share it between threads.
#[derive(Debug, Clone)]
pub struct Cursor {
    source: Source,
    state: CursorState,
    stack: Vec<CursorState>,
}

impl Cursor {
    /// A cursor over the whole source in native byte order.
    pub fn new(source: Source) -> Cursor {
        Self::with_order(source, ByteOrder::NATIVE)
    }

    pub fn with_order(source: Source, order: ByteOrder) -> Cursor {
        let limit = source.length();
        Cursor {
            source,
            state: CursorState {
                position: 0,
                limit,
                order,
            },
            stack: Vec::new(),
        }
    }

    /// A cursor with an explicit initial position and limit.
    pub fn with_bounds(
        source: Source,
        position: u64,
        limit: u64,
        order: ByteOrder,
    ) -> Result<Cursor> {
        check_offset(source.length(), limit)?;
        check_offset(limit, position)?;
        Ok(Cursor {
            source,
            state: CursorState {
                position,
                limit,
                order,
            },
            stack: Vec::new(),
        })
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn into_source(self) -> Source {
        self.source
    }

    /// Length of the underlying source.
    pub fn length(&self) -> u64 {
        self.source.length()
    }

    pub fn position(&self) -> u64 {
        self.state.position
    }

    /// Moves the position, rejecting anything past the limit.
    pub fn set_position(&mut self, position: u64) -> Result<()> {
        check_offset(self.state.limit, position)?;
        self.state.position = position;
        Ok(())
    }

    /// Moves the position forward by `n` bytes and returns the new position.
    pub fn advance(&mut self, n: u64) -> Result<u64> {
        check_range(self.state.limit, self.state.position, n)?;
        self.state.position += n;
        Ok(self.state.position)
    }

    pub fn limit(&self) -> u64 {
        self.state.limit
    }

    /// Moves the limit, rejecting anything past the end of the source. A position
    /// beyond the new limit is pulled back to it.
    pub fn set_limit(&mut self, limit: u64) -> Result<()> {
        check_offset(self.source.length(), limit)?;
        self.state.limit = limit;
        self.state.position = self.state.position.min(limit);
        Ok(())
    }

    pub fn order(&self) -> ByteOrder {
        self.state.order
    }

    pub fn set_order(&mut self, order: ByteOrder) {
        self.state.order = order;
    }

    /// Bytes between the position and the limit.
    pub fn remaining(&self) -> u64 {
        self.state.limit - self.state.position
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Saves the current state and returns it.
    pub fn push_state(&mut self) -> CursorState {
        self.stack.push(self.state);
        self.state
    }

    /// Restores the most recently saved state and returns it, or `None` when nothing
    /// was saved.
    pub fn pop_state(&mut self) -> Option<CursorState> {
        let state = self.stack.pop()?;
        self.state = state;
        Some(state)
    }

    /// Number of saved states.
    pub fn saved_states(&self) -> usize {
        self.stack.len()
    }

    /// A cursor over a view from the current position to the end of the source.
    pub fn slice(&self) -> Result<Cursor> {
        self.slice_from(self.state.position)
    }

    /// A cursor over a view from `offset` to the end of the source.
    pub fn slice_from(&self, offset: u64) -> Result<Cursor> {
        check_offset(self.length(), offset)?;
        self.slice_at(offset, self.length() - offset)
    }

    /// A cursor over a view of `length` bytes starting at `offset`.
    ///
    /// The new cursor starts at position zero and inherits this cursor's byte order.
    pub fn slice_at(&self, offset: u64, length: u64) -> Result<Cursor> {
        let view = self.source.slice(offset, length)?;
        Ok(Cursor::with_order(view, self.state.order))
    }

    /// A cursor over a view of `[from, to)`.
    pub fn slice_range(&self, from: u64, to: u64) -> Result<Cursor> {
        if to < from {
            return Err(Error::out_of_bounds(from, 0, to));
        }
        self.slice_at(from, to - from)
    }

    /// Advances the position to the next multiple of `width`, writing `fill` over
    /// every skipped byte. Returns the number of bytes skipped.
    pub fn pad_to(&mut self, width: u64, fill: u8) -> Result<u64> {
        let skip = self.padding(width)?;
        if skip != 0 {
            self.source.clear(fill, self.state.position, skip)?;
            self.state.position += skip;
        }
        Ok(skip)
    }

    /// Advances the position to the next multiple of `width` without touching the
    /// skipped bytes. Returns the number of bytes skipped.
    pub fn align_to(&mut self, width: u64) -> Result<u64> {
        let skip = self.padding(width)?;
        self.state.position += skip;
        Ok(skip)
    }

    /// [`pad_to`](Self::pad_to) with the machine word size.
    pub fn pad_to_word(&mut self, fill: u8) -> Result<u64> {
        self.pad_to(word_size(), fill)
    }

    /// [`align_to`](Self::align_to) with the machine word size.
    pub fn align_to_word(&mut self) -> Result<u64> {
        self.align_to(word_size())
    }

    fn padding(&self, width: u64) -> Result<u64> {
        verify_arg!(width, width > 0);
        let rem = self.state.position % width;
        if rem == 0 {
            return Ok(0);
        }
        let skip = width - rem;
        check_range(self.state.limit, self.state.position, skip)?;
        Ok(skip)
    }

    /// Checks that `[offset, offset + len)` stays below the limit.
    #[inline]
    fn check_limit(&self, offset: u64, len: u64) -> Result<()> {
        check_range(self.state.limit, offset, len)
    }

    /// Reads a `T` at the position in the cursor's order and advances past it.
    pub fn get<T: Scalar>(&mut self) -> Result<T> {
        self.get_with(self.state.order)
    }

    pub fn get_with<T: Scalar>(&mut self, order: ByteOrder) -> Result<T> {
        let value = self.get_at_with(self.state.position, order)?;
        self.state.position += T::WIDTH as u64;
        Ok(value)
    }

    /// Reads a `T` at `offset` in the cursor's order; the position is unchanged.
    pub fn get_at<T: Scalar>(&self, offset: u64) -> Result<T> {
        self.get_at_with(offset, self.state.order)
    }

    pub fn get_at_with<T: Scalar>(&self, offset: u64, order: ByteOrder) -> Result<T> {
        self.check_limit(offset, T::WIDTH as u64)?;
        self.source.get(offset, order)
    }

    /// Writes `value` at the position in the cursor's order and advances past it.
    pub fn put<T: Scalar>(&mut self, value: T) -> Result<()> {
        self.put_with(value, self.state.order)
    }

    pub fn put_with<T: Scalar>(&mut self, value: T, order: ByteOrder) -> Result<()> {
        self.put_at_with(self.state.position, value, order)?;
        self.state.position += T::WIDTH as u64;
        Ok(())
    }

    /// Writes `value` at `offset` in the cursor's order; the position is unchanged.
    pub fn put_at<T: Scalar>(&self, offset: u64, value: T) -> Result<()> {
        self.put_at_with(offset, value, self.state.order)
    }

    pub fn put_at_with<T: Scalar>(&self, offset: u64, value: T, order: ByteOrder) -> Result<()> {
        self.check_limit(offset, T::WIDTH as u64)?;
        self.source.put(offset, value, order)
    }

    /// Fills `dst` from the position and advances past the bytes read.
    pub fn get_slice<T: Scalar>(&mut self, dst: &mut [T]) -> Result<()> {
        self.get_slice_with(dst, self.state.order)
    }

    pub fn get_slice_with<T: Scalar>(&mut self, dst: &mut [T], order: ByteOrder) -> Result<()> {
        self.get_slice_at_with(self.state.position, dst, order)?;
        self.state.position += byte_len(dst.len(), T::WIDTH)?;
        Ok(())
    }

    pub fn get_slice_at<T: Scalar>(&self, offset: u64, dst: &mut [T]) -> Result<()> {
        self.get_slice_at_with(offset, dst, self.state.order)
    }

    pub fn get_slice_at_with<T: Scalar>(
        &self,
        offset: u64,
        dst: &mut [T],
        order: ByteOrder,
    ) -> Result<()> {
        self.check_limit(offset, byte_len(dst.len(), T::WIDTH)?)?;
        self.source.get_slice(offset, dst, order)
    }

    /// Writes `src` at the position and advances past the bytes written.
    pub fn put_slice<T: Scalar>(&mut self, src: &[T]) -> Result<()> {
        self.put_slice_with(src, self.state.order)
    }

    pub fn put_slice_with<T: Scalar>(&mut self, src: &[T], order: ByteOrder) -> Result<()> {
        self.put_slice_at_with(self.state.position, src, order)?;
        self.state.position += byte_len(src.len(), T::WIDTH)?;
        Ok(())
    }

    pub fn put_slice_at<T: Scalar>(&self, offset: u64, src: &[T]) -> Result<()> {
        self.put_slice_at_with(offset, src, self.state.order)
    }

    pub fn put_slice_at_with<T: Scalar>(
        &self,
        offset: u64,
        src: &[T],
        order: ByteOrder,
    ) -> Result<()> {
        self.check_limit(offset, byte_len(src.len(), T::WIDTH)?)?;
        self.source.put_slice(offset, src, order)
    }

    pub fn get_u8(&mut self) -> Result<u8> {
        self.get()
    }

    pub fn put_u8(&mut self, value: u8) -> Result<()> {
        self.put(value)
    }
}

fn word_size() -> u64 {
    memsource_native::backend().word_size as u64
}
