use memchr::memmem;

/// SOI marker, first two bytes of every embedded JPEG frame.
pub const START_OF_IMAGE: [u8; 2] = [0xFF, 0xD8];

/// EOI marker, terminates an embedded JPEG frame.
pub const END_OF_IMAGE: [u8; 2] = [0xFF, 0xD9];

pub const MARKER_LEN: usize = 2;

/// Offset of the first start marker at or after `from`, if any.
pub fn find_start(haystack: &[u8], from: usize) -> Option<usize> {
    find_marker(haystack, from, &START_OF_IMAGE)
}

/// Offset of the first end marker at or after `from`, if any.
pub fn find_end(haystack: &[u8], from: usize) -> Option<usize> {
    find_marker(haystack, from, &END_OF_IMAGE)
}

fn find_marker(haystack: &[u8], from: usize, marker: &[u8; 2]) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    memmem::find(&haystack[from..], marker).map(|pos| pos + from)
}
