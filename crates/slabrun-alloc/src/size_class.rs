//! Size classes and request routing.
//!
//! A request is served by the smallest class whose chunk fits it, provided
//! every block in that class's slab is aligned well enough. Everything else
//! is routed to the heap.

use std::alloc::Layout;
use std::fmt;

/// Alignment of every slab. Blocks inside a slab are aligned to
/// `gcd(chunk_size, SLAB_ALIGN)`.
pub const SLAB_ALIGN: usize = 16;

/// A fixed block size served by one arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeClass {
    /// 4-byte blocks.
    Tiny,
    /// 16-byte blocks.
    Small,
    /// 24-byte blocks.
    Medium,
}

impl SizeClass {
    /// Number of pooled size classes.
    pub const COUNT: usize = 3;

    /// All classes, smallest first.
    pub const ALL: [SizeClass; Self::COUNT] = [Self::Tiny, Self::Small, Self::Medium];

    /// Block size in bytes.
    pub const fn chunk_size(self) -> usize {
        match self {
            Self::Tiny => 4,
            Self::Small => 16,
            Self::Medium => 24,
        }
    }

    /// Position of this class in [`SizeClass::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Tiny => 0,
            Self::Small => 1,
            Self::Medium => 2,
        }
    }

    /// Whether a block of this class satisfies `layout`.
    pub fn fits(self, layout: Layout) -> bool {
        let chunk = self.chunk_size();
        layout.size() <= chunk && layout.align() <= SLAB_ALIGN && chunk % layout.align() == 0
    }

    /// Smallest class that satisfies `layout`, or `None` for the heap.
    pub fn for_layout(layout: Layout) -> Option<SizeClass> {
        Self::ALL.into_iter().find(|class| class.fits(layout))
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B", self.chunk_size())
    }
}

/// Where a request of a given layout is served from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// A pooled arena block.
    Pooled(SizeClass),
    /// The global heap, unpooled.
    Heap,
}

impl Route {
    /// Route a request.
    pub fn for_layout(layout: Layout) -> Route {
        match SizeClass::for_layout(layout) {
            Some(class) => Route::Pooled(class),
            None => Route::Heap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: usize, align: usize) -> Layout {
        Layout::from_size_align(size, align).unwrap()
    }

    #[test]
    fn rounds_up_to_nearest_class() {
        assert_eq!(SizeClass::for_layout(layout(1, 1)), Some(SizeClass::Tiny));
        assert_eq!(SizeClass::for_layout(layout(4, 4)), Some(SizeClass::Tiny));
        assert_eq!(SizeClass::for_layout(layout(5, 1)), Some(SizeClass::Small));
        assert_eq!(SizeClass::for_layout(layout(16, 8)), Some(SizeClass::Small));
        assert_eq!(SizeClass::for_layout(layout(17, 1)), Some(SizeClass::Medium));
        assert_eq!(SizeClass::for_layout(layout(24, 8)), Some(SizeClass::Medium));
    }

    #[test]
    fn oversized_goes_to_heap() {
        assert_eq!(Route::for_layout(layout(25, 1)), Route::Heap);
        assert_eq!(Route::for_layout(layout(4096, 8)), Route::Heap);
    }

    #[test]
    fn alignment_can_skip_a_class() {
        // 24 is not a multiple of 16, so a 16-aligned 20-byte request
        // cannot use the 24-byte class.
        assert_eq!(Route::for_layout(layout(20, 16)), Route::Heap);
        // An 8-aligned 2-byte request skips the 4-byte class.
        assert_eq!(SizeClass::for_layout(layout(2, 8)), Some(SizeClass::Small));
        assert_eq!(Route::for_layout(layout(8, 32)), Route::Heap);
    }

    #[test]
    fn zero_sized_uses_smallest_class() {
        assert_eq!(SizeClass::for_layout(layout(0, 1)), Some(SizeClass::Tiny));
    }

    #[test]
    fn index_matches_all_order() {
        for (i, class) in SizeClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
        assert_eq!(SizeClass::Medium.to_string(), "24B");
    }
}
