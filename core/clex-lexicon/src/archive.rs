//! Binary lexicons: rkyv archives of [`LexiconData`].

use clex_protocol::LexiconData;
use rkyv::{AlignedVec, Deserialize, Infallible};

use crate::error::LexiconError;

pub fn encode(data: &LexiconData) -> Result<Vec<u8>, LexiconError> {
    let bytes = rkyv::to_bytes::<_, 1024>(data)
        .map_err(|err| LexiconError::Encode(format!("{err:?}")))?;
    Ok(bytes.to_vec())
}

/// Validates and deserializes an archive. Bytes read from disk are rarely
/// aligned, so they are copied into an aligned buffer first.
pub fn decode(bytes: &[u8]) -> Result<LexiconData, LexiconError> {
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let archived = rkyv::check_archived_root::<LexiconData>(&aligned)
        .map_err(|err| LexiconError::InvalidArchive(format!("{err:?}")))?;

    let data: LexiconData = archived
        .deserialize(&mut Infallible)
        .map_err(|_| LexiconError::InvalidArchive("deserialization failed".to_string()))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clex_protocol::{Category, Dialect, Revision, VocabularyData};

    fn sample() -> LexiconData {
        let mut data = LexiconData::empty(Revision::C99);
        data.dialects.push(Dialect::Msvc);
        data.vocabularies.push(VocabularyData {
            category: Category::Standard,
            words: vec!["restrict".to_string(), "inline".to_string()],
        });
        data.defined.push("WIN32_LEAN_AND_MEAN".to_string());
        data
    }

    #[test]
    fn test_archive_round_trip() {
        let data = sample();
        let bytes = encode(&data).expect("encode");
        assert_eq!(decode(&bytes).expect("decode"), data);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(decode(&[]).is_err());
        assert!(decode(b"definitely not an archive").is_err());
    }

    #[test]
    fn test_rejects_truncated_archive() {
        let bytes = encode(&sample()).expect("encode");
        let truncated = &bytes[..4];
        assert!(matches!(decode(truncated), Err(LexiconError::InvalidArchive(_))));
    }
}
