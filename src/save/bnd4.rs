use super::userdata::UserData;
use crate::error::PlannerError;
use crate::error::Result;
use aes::Aes128;
use byteorder::ByteOrder;
use byteorder::LE;
use cbc::cipher::BlockDecryptMut;
use cbc::cipher::KeyIvInit;
use cbc::cipher::block_padding::NoPadding;

type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// fixed AES-128-CBC key shared by every save of the game
const KEY: [u8; 16] = [
    0x18, 0xF6, 0x32, 0x66, 0x05, 0xBD, 0x17, 0x8A, 0x55, 0x24, 0x52, 0x3A, 0xC0, 0xA0, 0xC6, 0x09,
];
const IV_SIZE: usize = 0x10;

const MAGIC: &[u8; 4] = b"BND4";
const ENTRY_SIGNATURE: [u8; 8] = [0x40, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
const HEADER_LEN: usize = 64;
const ENTRY_HEADER_LEN: usize = 32;
const MAX_ENTRY_SIZE: i64 = 1_000_000_000;

/// decrypt a BND4 `.sl2` archive into its per-character user-data blobs.
///
/// each 32-byte entry descriptor names an IV-prefixed AES-CBC payload.
/// malformed descriptors and failed decryptions are reported and skipped,
/// never fatal; only a missing magic is.
pub fn decrypt_sl2(raw: &[u8]) -> Result<Vec<UserData>> {
    if raw.len() < HEADER_LEN || &raw[..4] != MAGIC {
        return Err(PlannerError::InvalidContainer(
            "missing BND4 magic".to_string(),
        ));
    }
    let entries = LE::read_i32(&raw[12..16]);
    log::debug!("BND4 entries: {}", entries);
    let mut blobs = Vec::new();
    for i in 0..entries.max(0) as usize {
        let pos = HEADER_LEN + ENTRY_HEADER_LEN * i;
        if pos + ENTRY_HEADER_LEN > raw.len() {
            log::warn!("file too small to read entry #{} header", i);
            break;
        }
        let header = &raw[pos..pos + ENTRY_HEADER_LEN];
        if header[..8] != ENTRY_SIGNATURE {
            log::warn!("entry #{} unexpected signature, skipping", i);
            continue;
        }
        let size = LE::read_i32(&header[8..12]) as i64;
        let offset = LE::read_i32(&header[16..20]) as i64;
        if size <= 0 || size > MAX_ENTRY_SIZE {
            log::warn!("entry #{} invalid size {}, skipping", i, size);
            continue;
        }
        if offset <= 0 || offset + size > raw.len() as i64 {
            log::warn!("entry #{} invalid offset {}, skipping", i, offset);
            continue;
        }
        let encrypted = &raw[offset as usize..(offset + size) as usize];
        match decrypt_entry(encrypted) {
            Ok(bytes) => blobs.push(UserData { index: i, bytes }),
            Err(e) => log::warn!("entry #{} failed to decrypt: {}", i, e),
        }
    }
    Ok(blobs)
}

/// first 16 bytes are the IV; the remainder decrypts with no padding strip
fn decrypt_entry(encrypted: &[u8]) -> Result<Vec<u8>> {
    if encrypted.len() <= IV_SIZE {
        return Err(PlannerError::DecryptionFailure(
            "entry shorter than its IV".to_string(),
        ));
    }
    let (iv, payload) = encrypted.split_at(IV_SIZE);
    let mut buffer = payload.to_vec();
    let decryptor = Aes128CbcDec::new_from_slices(&KEY, iv)
        .map_err(|e| PlannerError::DecryptionFailure(e.to_string()))?;
    decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buffer)
        .map_err(|e| PlannerError::DecryptionFailure(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
pub(crate) mod fixture {
    use super::*;
    use cbc::cipher::BlockEncryptMut;

    type Aes128CbcEnc = cbc::Encryptor<Aes128>;

    /// wrap plaintext user-data blobs into a BND4 container encrypted
    /// with the real key, one entry per blob
    pub fn container(plaintexts: &[&[u8]]) -> Vec<u8> {
        let mut raw = vec![0u8; HEADER_LEN];
        raw[..4].copy_from_slice(MAGIC);
        let n = plaintexts.len() as i32;
        raw[12..16].copy_from_slice(&n.to_le_bytes());
        raw.resize(HEADER_LEN + ENTRY_HEADER_LEN * plaintexts.len(), 0);
        let mut payloads = Vec::new();
        for plaintext in plaintexts {
            let iv = [0x24u8; IV_SIZE];
            let mut buffer = plaintext.to_vec();
            buffer.resize(buffer.len().next_multiple_of(16), 0);
            let padded = buffer.len();
            Aes128CbcEnc::new_from_slices(&KEY, &iv)
                .unwrap()
                .encrypt_padded_mut::<NoPadding>(&mut buffer, padded)
                .unwrap();
            let mut payload = iv.to_vec();
            payload.extend_from_slice(&buffer);
            payloads.push(payload);
        }
        for (i, payload) in payloads.iter().enumerate() {
            let offset = raw.len();
            let pos = HEADER_LEN + ENTRY_HEADER_LEN * i;
            raw[pos..pos + 8].copy_from_slice(&ENTRY_SIGNATURE);
            raw[pos + 8..pos + 12].copy_from_slice(&(payload.len() as i32).to_le_bytes());
            raw[pos + 16..pos + 20].copy_from_slice(&(offset as i32).to_le_bytes());
            raw.extend_from_slice(payload);
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::fixture::container;
    use super::*;

    #[test]
    fn rejects_wrong_magic() {
        let raw = vec![0u8; 128];
        assert!(matches!(
            decrypt_sl2(&raw),
            Err(PlannerError::InvalidContainer(_))
        ));
    }

    #[test]
    fn round_trips_one_entry() {
        let plaintext = [0xABu8; 64];
        let raw = container(&[&plaintext]);
        let blobs = decrypt_sl2(&raw).unwrap();
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].index, 0);
        assert_eq!(blobs[0].bytes, plaintext);
    }

    #[test]
    fn skips_entry_with_bad_signature() {
        let plaintext = [0x11u8; 32];
        let mut raw = container(&[&plaintext]);
        raw[HEADER_LEN] = 0x00;
        let blobs = decrypt_sl2(&raw).unwrap();
        assert!(blobs.is_empty());
    }

    #[test]
    fn skips_entry_with_absurd_size() {
        let plaintext = [0x11u8; 32];
        let mut raw = container(&[&plaintext]);
        let pos = HEADER_LEN + 8;
        raw[pos..pos + 4].copy_from_slice(&(2_000_000_000i32).to_le_bytes());
        let blobs = decrypt_sl2(&raw).unwrap();
        assert!(blobs.is_empty());
    }

    #[test]
    fn skips_entry_with_out_of_range_offset() {
        let plaintext = [0x11u8; 32];
        let mut raw = container(&[&plaintext]);
        let pos = HEADER_LEN + 16;
        raw[pos..pos + 4].copy_from_slice(&(1_000_000i32).to_le_bytes());
        let blobs = decrypt_sl2(&raw).unwrap();
        assert!(blobs.is_empty());
    }

    #[test]
    fn decodes_multiple_entries_in_slot_order() {
        let first = [0x01u8; 32];
        let second = [0x02u8; 48];
        let raw = container(&[&first, &second]);
        let blobs = decrypt_sl2(&raw).unwrap();
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].bytes, first);
        assert_eq!(blobs[1].bytes, second);
    }
}
