use crate::extractor::sequence::SequenceCounter;
use crate::scanner::FrameScanner;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Running totals for one input file's scan, fed to the progress callback
/// after every frame.
#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub frames_written: usize,
    pub frames_skipped: usize,
    pub bytes_scanned: u64,
    pub total_bytes: u64,
    pub current_output: Option<String>,
    pub start_time: Instant,
    pub errors: Vec<String>,
}

impl ExtractionProgress {
    pub fn new(total_bytes: u64) -> Self {
        Self {
            frames_written: 0,
            frames_skipped: 0,
            bytes_scanned: 0,
            total_bytes,
            current_output: None,
            start_time: Instant::now(),
            errors: Vec::new(),
        }
    }

    pub fn record_written(&mut self, filename: String, cursor: u64) {
        self.frames_written += 1;
        self.bytes_scanned = cursor;
        self.current_output = Some(filename);
    }

    pub fn record_skipped(&mut self, cursor: u64) {
        self.frames_skipped += 1;
        self.bytes_scanned = cursor;
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    pub fn frames_seen(&self) -> usize {
        self.frames_written + self.frames_skipped
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn status_line(&self) -> String {
        match self.frames_written {
            0 => "no frames written".to_string(),
            1 => "1 frame written".to_string(),
            n => format!("{} frames written", n),
        }
    }
}

/// Writes stride-selected frames of one byte stream to sequentially
/// numbered files.
pub struct FrameWriter {
    output_dir: PathBuf,
    prefix: String,
    every: u64,
}

impl FrameWriter {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(output_dir: P, prefix: S) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
            every: 1,
        }
    }

    pub fn with_every(mut self, every: u64) -> Self {
        self.every = every.max(1);
        self
    }

    pub fn output_name(&self, number: u64) -> String {
        format!("{}-{}.jpg", self.prefix, number)
    }

    /// Scan `data` end-to-end and write every `every`-th frame.
    ///
    /// Every frame advances the zero-based frame index; only written frames
    /// consume sequence numbers. A write failure aborts this input file (the
    /// error is recorded in the returned progress) without unwinding frames
    /// already on disk.
    pub fn extract(
        &self,
        data: &[u8],
        counter: &mut SequenceCounter,
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> ExtractionProgress {
        let mut progress = ExtractionProgress::new(data.len() as u64);

        for frame in FrameScanner::new(data) {
            if frame.index as u64 % self.every == 0 {
                let filename = self.output_name(counter.current());
                let dest = self.output_dir.join(&filename);

                if let Err(e) = fs::write(&dest, &data[frame.start..frame.end]) {
                    progress.add_error(format!("Failed to write {}: {}", dest.display(), e));
                    break;
                }

                counter.advance();
                progress.record_written(filename, frame.end as u64);
            } else {
                progress.record_skipped(frame.end as u64);
            }

            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        // The tail after the last frame still counts as scanned.
        if progress.errors.is_empty() {
            progress.bytes_scanned = progress.total_bytes;
        }

        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    const TWO_FRAMES: &[u8] = b"\x00\xFF\xD8AAA\xFF\xD9\x00\xFF\xD8BBB\xFF\xD9";

    #[test]
    fn test_writes_every_frame_by_default() {
        let dir = TempDir::new().unwrap();
        let writer = FrameWriter::new(dir.path(), "Picture");
        let mut counter = SequenceCounter::new(1);

        let progress = writer.extract(TWO_FRAMES, &mut counter, None);

        assert_eq!(progress.frames_written, 2);
        assert_eq!(progress.frames_skipped, 0);
        assert!(progress.errors.is_empty());
        assert_eq!(counter.current(), 3);

        let first = fs::read(dir.path().join("Picture-1.jpg")).unwrap();
        let second = fs::read(dir.path().join("Picture-2.jpg")).unwrap();
        assert_eq!(first, b"\xFF\xD8AAA");
        assert_eq!(second, b"\xFF\xD8BBB");
    }

    #[test]
    fn test_stride_two_writes_even_indices() {
        let dir = TempDir::new().unwrap();
        let writer = FrameWriter::new(dir.path(), "Picture").with_every(2);
        let mut counter = SequenceCounter::new(1);

        let progress = writer.extract(TWO_FRAMES, &mut counter, None);

        assert_eq!(progress.frames_written, 1);
        assert_eq!(progress.frames_skipped, 1);
        assert_eq!(counter.current(), 2);

        let first = fs::read(dir.path().join("Picture-1.jpg")).unwrap();
        assert_eq!(first, b"\xFF\xD8AAA");
        assert!(!dir.path().join("Picture-2.jpg").exists());
    }

    #[test]
    fn test_skipped_frames_do_not_consume_numbers() {
        // Five frames, stride 2: indices 0, 2, 4 written as 1, 2, 3.
        let mut data = Vec::new();
        for byte in [b'A', b'B', b'C', b'D', b'E'] {
            data.extend_from_slice(b"\xFF\xD8");
            data.push(byte);
            data.extend_from_slice(b"\xFF\xD9");
        }

        let dir = TempDir::new().unwrap();
        let writer = FrameWriter::new(dir.path(), "Picture").with_every(2);
        let mut counter = SequenceCounter::new(1);

        let progress = writer.extract(&data, &mut counter, None);

        assert_eq!(progress.frames_written, 3);
        assert_eq!(progress.frames_skipped, 2);
        assert_eq!(
            fs::read(dir.path().join("Picture-1.jpg")).unwrap(),
            b"\xFF\xD8A"
        );
        assert_eq!(
            fs::read(dir.path().join("Picture-2.jpg")).unwrap(),
            b"\xFF\xD8C"
        );
        assert_eq!(
            fs::read(dir.path().join("Picture-3.jpg")).unwrap(),
            b"\xFF\xD8E"
        );
    }

    #[test]
    fn test_counter_continues_across_streams() {
        let dir = TempDir::new().unwrap();
        let writer = FrameWriter::new(dir.path(), "Picture");
        let mut counter = SequenceCounter::new(1);

        writer.extract(TWO_FRAMES, &mut counter, None);
        writer.extract(TWO_FRAMES, &mut counter, None);

        assert_eq!(counter.current(), 5);
        assert!(dir.path().join("Picture-4.jpg").exists());
    }

    #[test]
    fn test_stream_without_markers_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let writer = FrameWriter::new(dir.path(), "Picture");
        let mut counter = SequenceCounter::new(1);

        let progress = writer.extract(b"nothing to see here", &mut counter, None);

        assert_eq!(progress.frames_written, 0);
        assert_eq!(progress.status_line(), "no frames written");
        assert!(progress.errors.is_empty());
        assert_eq!(counter.current(), 1);
    }

    #[test]
    fn test_truncated_trailing_frame_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let writer = FrameWriter::new(dir.path(), "Picture");
        let mut counter = SequenceCounter::new(1);

        let progress = writer.extract(b"\xFF\xD8AAA\xFF\xD9\xFF\xD8BBB", &mut counter, None);

        assert_eq!(progress.frames_written, 1);
        assert!(progress.errors.is_empty());
        assert_eq!(progress.bytes_scanned, progress.total_bytes);
    }

    #[test]
    fn test_progress_callback_sees_each_frame() {
        let dir = TempDir::new().unwrap();
        let writer = FrameWriter::new(dir.path(), "Picture");
        let mut counter = SequenceCounter::new(1);

        let seen: RefCell<Vec<usize>> = RefCell::new(Vec::new());
        let callback = |progress: &ExtractionProgress| {
            seen.borrow_mut().push(progress.frames_seen());
        };

        writer.extract(TWO_FRAMES, &mut counter, Some(&callback));

        // Two per-frame updates plus the final one.
        assert_eq!(*seen.borrow(), vec![1, 2, 2]);
    }

    #[test]
    fn test_status_line_wording() {
        let mut progress = ExtractionProgress::new(10);
        assert_eq!(progress.status_line(), "no frames written");
        progress.record_written("Picture-1.jpg".to_string(), 5);
        assert_eq!(progress.status_line(), "1 frame written");
        progress.record_written("Picture-2.jpg".to_string(), 10);
        assert_eq!(progress.status_line(), "2 frames written");
    }
}
