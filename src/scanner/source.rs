use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Random-access byte view over one input file.
///
/// Large files are memory-mapped so repeated marker searches do not re-read
/// from disk; small files are cheaper to slurp into a buffer than to map.
pub enum FrameSource {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

/// Files at or above this size are memory-mapped.
pub const MMAP_THRESHOLD: u64 = 64 * 1024 * 1024; // 64MB

impl FrameSource {
    pub fn open<P: AsRef<Path>>(path: P, mmap_threshold: u64) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        // Mapping an empty file fails on some platforms; the buffered path
        // handles it uniformly.
        if len >= mmap_threshold && len > 0 {
            let mmap = unsafe { Mmap::map(&file)? };
            Ok(FrameSource::Mapped(mmap))
        } else {
            Ok(FrameSource::Buffered(std::fs::read(path)?))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FrameSource::Mapped(mmap) => mmap,
            FrameSource::Buffered(buffer) => buffer,
        }
    }

    pub fn len(&self) -> u64 {
        self.as_bytes().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, FrameSource::Mapped(_))
    }
}
