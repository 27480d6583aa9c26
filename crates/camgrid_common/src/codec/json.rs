use crate::error::FrameError;
use crate::snapshot::Snapshot;

/// Decode one text message.
///
/// Only the shape is checked: the top level must be an object or `null`.
/// Payload strings are taken as they are.
pub fn decode_snapshot(text: &str) -> Result<Option<Snapshot>, FrameError> {
    Ok(serde_json::from_str::<Option<Snapshot>>(text)?)
}

/// Decode one binary message carrying UTF-8 JSON.
pub fn decode_snapshot_bytes(bytes: &[u8]) -> Result<Option<Snapshot>, FrameError> {
    let text = std::str::from_utf8(bytes).map_err(|e| FrameError::NotUtf8(e.to_string()))?;
    decode_snapshot(text)
}

pub fn encode_snapshot(snapshot: Option<&Snapshot>) -> Result<String, FrameError> {
    serde_json::to_string(&snapshot).map_err(|e| FrameError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mapping() {
        let snapshot = decode_snapshot(r#"{"cam1": "AAAA", "cam2": ""}"#)
            .unwrap()
            .unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("cam1").unwrap().as_str(), "AAAA");
        assert!(snapshot.get("cam2").unwrap().is_empty());
    }

    #[test]
    fn test_decode_null_is_absent() {
        assert_eq!(decode_snapshot("null").unwrap(), None);
        assert_eq!(decode_snapshot("  null \n").unwrap(), None);
    }

    #[test]
    fn test_decode_empty_mapping() {
        let snapshot = decode_snapshot("{}").unwrap().unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_top_level_must_be_a_mapping() {
        for raw in [r#"["cam1"]"#, r#""cam1""#, "7", "true"] {
            let err = decode_snapshot(raw).unwrap_err();
            assert!(matches!(err, FrameError::NotAMapping(_)), "{raw} gave {err:?}");
        }
    }

    #[test]
    fn test_syntax_errors() {
        for raw in ["", "{", r#"{"cam1": }"#, "not json"] {
            let err = decode_snapshot(raw).unwrap_err();
            assert!(matches!(err, FrameError::InvalidJson(_)), "{raw:?} gave {err:?}");
        }
    }

    #[test]
    fn test_decode_bytes_rejects_invalid_utf8() {
        let err = decode_snapshot_bytes(&[0x7b, 0xff, 0x7d]).unwrap_err();
        assert!(matches!(err, FrameError::NotUtf8(_)));

        let snapshot = decode_snapshot_bytes(br#"{"cam1": "x"}"#).unwrap().unwrap();
        assert!(snapshot.contains("cam1"));
    }

    #[test]
    fn test_encode_matches_wire_format() {
        let snapshot: Snapshot = [("cam1", "AAAA")].into_iter().collect();

        assert_eq!(encode_snapshot(Some(&snapshot)).unwrap(), r#"{"cam1":"AAAA"}"#);
        assert_eq!(encode_snapshot(None).unwrap(), "null");
    }
}
