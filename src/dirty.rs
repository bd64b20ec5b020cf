//! Per-layer dirty tracking.
//!
//! Each instrument keeps two independent flags: one for the cached static
//! layer (dial face, ticks, labels) and one for the dynamic layer (needle,
//! fill, digits). The per-frame render step consumes both flags to decide
//! what to redraw; a frame where neither was set does no drawing at all,
//! which is what lets an idle converged cluster cost nothing per frame.

/// Redraw flags for the two surface layers.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirtyLayers {
    static_dirty: bool,
    dynamic_dirty: bool,
}

impl DirtyLayers {
    /// Both layers dirty; the state right after mount or resize.
    #[inline]
    pub const fn all_dirty() -> Self {
        Self { static_dirty: true, dynamic_dirty: true }
    }

    #[inline]
    pub const fn mark_static(&mut self) {
        self.static_dirty = true;
    }

    #[inline]
    pub const fn mark_dynamic(&mut self) {
        self.dynamic_dirty = true;
    }

    /// Return and clear the static flag.
    #[inline]
    pub const fn consume_static(&mut self) -> bool {
        let was = self.static_dirty;
        self.static_dirty = false;
        was
    }

    /// Return and clear the dynamic flag.
    #[inline]
    pub const fn consume_dynamic(&mut self) -> bool {
        let was = self.dynamic_dirty;
        self.dynamic_dirty = false;
        was
    }
}
