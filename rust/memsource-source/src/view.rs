//! Zero-copy views over a sub-range of a source.

use std::sync::Arc;

use crate::{Permissions, Source};

/// Flavor of a derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// A sub-range with its own permission mask.
    Slice,
    /// A sub-range rejecting every mutation as unsupported.
    ReadOnly,
}

/// A non-owning window onto a parent source.
///
/// Views always refer directly to a backing (non-view) source: deriving a view from a
/// view composes the offsets and intersects the permission masks, so a view can
/// never grant more than the view it was derived from. Releasing a view is a no-op,
/// and its validity mirrors the parent's.
#[derive(Debug, Clone)]
pub struct SourceView {
    parent: Arc<Source>,
    base: u64,
    length: u64,
    permissions: Permissions,
    kind: ViewKind,
}

impl SourceView {
    pub(crate) fn new(
        parent: Arc<Source>,
        base: u64,
        length: u64,
        permissions: Permissions,
        kind: ViewKind,
    ) -> SourceView {
        debug_assert!(!matches!(parent.as_ref(), Source::View(_)));
        SourceView {
            parent,
            base,
            length,
            permissions,
            kind,
        }
    }

    /// Derives a view from this one. `offset` is relative to this view.
    pub(crate) fn derive(
        &self,
        offset: u64,
        length: u64,
        mask: Permissions,
        kind: ViewKind,
    ) -> SourceView {
        let kind = match (self.kind, kind) {
            (ViewKind::ReadOnly, _) | (_, ViewKind::ReadOnly) => ViewKind::ReadOnly,
            _ => ViewKind::Slice,
        };
        SourceView {
            parent: self.parent.clone(),
            base: self.base + offset,
            length,
            permissions: self.permissions & mask,
            kind,
        }
    }

    /// The backing source this view reads from and writes to.
    pub fn parent(&self) -> &Source {
        &self.parent
    }

    /// Offset of the view's first byte within the parent.
    pub fn base_offset(&self) -> u64 {
        self.base
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn is_read_only(&self) -> bool {
        self.kind == ViewKind::ReadOnly
    }

    pub fn is_valid(&self) -> bool {
        self.parent.is_valid()
    }
}
