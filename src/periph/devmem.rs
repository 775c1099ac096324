#![allow(unsafe_code)]

use std::{
    fs::{File, OpenOptions},
    io,
    os::unix::{fs::OpenOptionsExt, io::AsRawFd},
    path::Path,
    ptr::NonNull,
};

use log::{debug, warn};

use crate::periph::{MappedPage, MmioPage, PageMapper};

/// Maps physical pages through `/dev/mem`.
///
/// Needs read/write access to the device, which usually means root.
#[derive(Debug)]
pub struct DevMem {
    file: File,
}

impl DevMem {
    pub const PATH: &'static str = "/dev/mem";

    pub fn open() -> io::Result<Self> {
        Self::open_path(Self::PATH)
    }

    /// Opens another memory device, such as `/dev/gpiomem`.
    pub fn open_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)?;
        Ok(Self { file })
    }
}

impl PageMapper for DevMem {
    type Page = MmioPage;
    type Error = io::Error;

    fn map(&mut self, phys_base: u64, len: usize) -> io::Result<MmioPage> {
        let offset = libc::off_t::try_from(phys_base)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "address beyond off_t"))?;

        // SAFETY: a fresh shared mapping of the device; the kernel picks the address.
        let addr = unsafe {
            libc::mmap(
                core::ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                self.file.as_raw_fd(),
                offset,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }
        let base = NonNull::new(addr.cast::<u8>()).ok_or_else(io::Error::last_os_error)?;

        debug!("mapped {len} bytes at {phys_base:#010x}");
        // SAFETY: mmap returned a page-aligned read/write mapping of `len`
        // bytes that lives until `unmap`.
        Ok(unsafe { MmioPage::from_raw(base, len) })
    }

    fn unmap(&mut self, page: MmioPage) {
        // SAFETY: the page came from `map` and is not used after this call.
        let rc = unsafe { libc::munmap(page.as_ptr().cast(), page.len()) };
        if rc != 0 {
            warn!("munmap failed: {}", io::Error::last_os_error());
        }
    }
}
