use core::slice;
use std::ptr::{NonNull, null_mut};

use rustix::mm::{MapFlags, ProtFlags, mmap_anonymous, munmap};

/// Off-heap storage for direct buffers: an anonymous private mapping,
/// zero-filled by the kernel and unmapped on drop.
#[derive(Debug)]
pub struct DirectRegion {
    ptr: NonNull<u8>,
    len: usize,
}

// Safety: the region owns its mapping exclusively, mutation goes through &mut self.
unsafe impl Send for DirectRegion {}
unsafe impl Sync for DirectRegion {}

impl DirectRegion {
    pub fn new(len: usize) -> std::io::Result<Self> {
        // mmap rejects empty mappings
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len,
            });
        }
        let ptr = unsafe {
            mmap_anonymous(
                null_mut(),
                len,
                ProtFlags::READ | ProtFlags::WRITE,
                MapFlags::PRIVATE,
            )?
        };
        let ptr = NonNull::new(ptr.cast::<u8>())
            .ok_or_else(|| std::io::Error::other("mmap returned a null mapping"))?;
        tracing::trace!(len, addr = ptr.as_ptr() as usize, "mapped direct region");
        Ok(Self { ptr, len })
    }

    ///address of the first byte, what native code receives
    pub fn base_address(&self) -> NonNull<u8> {
        self.ptr
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for DirectRegion {
    fn as_ref(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl AsMut<[u8]> for DirectRegion {
    fn as_mut(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for DirectRegion {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        tracing::trace!(len = self.len, "unmapping direct region");
        unsafe {
            let _ = munmap(self.ptr.as_ptr().cast(), self.len);
        }
    }
}

#[cfg(test)]
mod test {
    use super::DirectRegion;

    #[test]
    fn fresh_region_is_zeroed() {
        let region = DirectRegion::new(4096 + 17).unwrap();
        assert_eq!(region.len(), 4113);
        assert!(region.as_ref().iter().all(|b| *b == 0));
    }

    #[test]
    fn region_is_writable() {
        let mut region = DirectRegion::new(16).unwrap();
        region.as_mut()[15] = 0xAB;
        assert_eq!(region.as_ref()[15], 0xAB);
    }

    #[test]
    fn empty_region_maps_nothing() {
        let region = DirectRegion::new(0).unwrap();
        assert!(region.is_empty());
        assert!(region.as_ref().is_empty());
    }
}
