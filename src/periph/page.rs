#![allow(unsafe_code)]

use core::ptr::NonNull;

use crate::periph::MappedPage;

/// Volatile window over mapped peripheral memory.
///
/// All accesses are `read_volatile` / `write_volatile` of exactly the
/// requested width, so each call is one bus transaction. Values are
/// converted from and to little-endian.
#[derive(Debug)]
pub struct MmioPage {
    base: NonNull<u8>,
    len: usize,
}

impl MmioPage {
    /// Wraps `len` bytes of mapped memory starting at `base`.
    ///
    /// # Safety
    ///
    /// `base` must point to a readable and writable mapping of at least
    /// `len` bytes that stays valid for the lifetime of the returned page,
    /// and must be aligned to 4 bytes.
    pub unsafe fn from_raw(base: NonNull<u8>, len: usize) -> Self {
        Self { base, len }
    }

    /// Start of the mapping.
    pub fn as_ptr(&self) -> *mut u8 {
        self.base.as_ptr()
    }
}

macro_rules! impl_volatile_access {
    ($($ty:ty),*) => {
        paste::paste! {
            $(
                #[inline]
                fn [<read_ $ty>](&self, offset: usize) -> $ty {
                    debug_assert!(offset + size_of::<$ty>() <= self.len);
                    // SAFETY: `from_raw` guarantees the mapping covers `len` bytes and
                    // the register map only passes width-aligned offsets that fit.
                    let raw = unsafe {
                        self.base.as_ptr().add(offset).cast::<$ty>().read_volatile()
                    };
                    <$ty>::from_le(raw)
                }

                #[inline]
                fn [<write_ $ty>](&self, offset: usize, value: $ty) {
                    debug_assert!(offset + size_of::<$ty>() <= self.len);
                    // SAFETY: see the read accessor.
                    unsafe {
                        self.base
                            .as_ptr()
                            .add(offset)
                            .cast::<$ty>()
                            .write_volatile(value.to_le())
                    }
                }
            )*
        }
    };
}

impl MappedPage for MmioPage {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    impl_volatile_access!(u8, u16, u32);
}
