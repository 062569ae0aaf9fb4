use super::userdata::UserData;
use crate::error::Result;

const HEADER_LEN: usize = 0x80;
const CHUNK_SIZE: usize = 0x100000;
const CHUNK_PREFIX: [u8; 4] = [0x00, 0x10, 0x00, 0x10];
const MIN_CHUNK_LEN: usize = 0x1000;
const MAX_CHUNKS: usize = 10;

/// split a console `memory.dat` save into its user-data chunks.
///
/// the container is a flat concatenation: an 0x80-byte header, then up to
/// ten 1 MiB payload chunks, then an optional trailing regulation blob the
/// read-only planner ignores. each chunk is prefixed with the fixed
/// constant the original splitter writes; undersized chunks are discarded.
pub fn split_console_dat(raw: &[u8]) -> Result<Vec<UserData>> {
    let mut blobs = Vec::new();
    let mut cursor = HEADER_LEN.min(raw.len());
    for index in 0..MAX_CHUNKS {
        if cursor >= raw.len() {
            break;
        }
        let end = (cursor + CHUNK_SIZE).min(raw.len());
        let chunk = &raw[cursor..end];
        cursor = end;
        if chunk.len() < MIN_CHUNK_LEN {
            log::warn!("discarding undersized chunk #{} ({} bytes)", index, chunk.len());
            continue;
        }
        let mut bytes = CHUNK_PREFIX.to_vec();
        bytes.extend_from_slice(chunk);
        blobs.push(UserData { index, bytes });
    }
    Ok(blobs)
}
