//! Script chunk parsing and push-data encoding.
//!
//! A chunk is either a bare opcode or a data push together with its bytes.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes) this is the length.
    pub op: u8,
    /// The pushed bytes, for push operations.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// ASM token: pushed data as hex, everything else by opcode name.
    pub fn to_asm_string(&self) -> String {
        match &self.data {
            Some(data) if self.op > OP_0 && self.op <= OP_PUSHDATA4 => hex::encode(data),
            _ => opcode_to_string(self.op),
        }
    }
}

/// Decode raw script bytes into chunks.
///
/// OP_RETURN is treated like any other opcode, so the pushes that follow it
/// in a null-data script are decoded individually.
///
/// # Arguments
/// * `bytes` - Raw script bytes.
///
/// # Returns
/// The chunks in order, or `DataTooSmall` if a push runs past the end.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        pos += 1;

        let length = match op {
            OP_DATA_1..=OP_DATA_75 => op as usize,
            OP_PUSHDATA1 => read_length(bytes, &mut pos, 1)?,
            OP_PUSHDATA2 => read_length(bytes, &mut pos, 2)?,
            OP_PUSHDATA4 => read_length(bytes, &mut pos, 4)?,
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                continue;
            }
        };

        let end = pos
            .checked_add(length)
            .filter(|end| *end <= bytes.len())
            .ok_or(ScriptError::DataTooSmall)?;
        chunks.push(ScriptChunk {
            op,
            data: Some(bytes[pos..end].to_vec()),
        });
        pos = end;
    }

    Ok(chunks)
}

/// Read a little-endian push length of `width` bytes.
fn read_length(bytes: &[u8], pos: &mut usize, width: usize) -> Result<usize, ScriptError> {
    let field = bytes
        .get(*pos..*pos + width)
        .ok_or(ScriptError::DataTooSmall)?;
    *pos += width;
    let mut le = [0u8; 4];
    le[..width].copy_from_slice(field);
    Ok(u32::from_le_bytes(le) as usize)
}

/// Minimal push prefix for a payload of `data_len` bytes.
///
/// A zero-length payload maps to OP_0. Callers that need an explicit
/// zero-length push (`OP_PUSHDATA1 0x00`) write it themselves.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xff {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xffff {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xffff_ffff {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

/// Encode several payloads, each with its own minimal push prefix.
pub fn encode_push_datas(parts: &[&[u8]]) -> Result<Vec<u8>, ScriptError> {
    let mut result = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let prefix = push_data_prefix(part.len()).map_err(|_| ScriptError::PartTooBig(i))?;
        result.extend_from_slice(&prefix);
        result.extend_from_slice(part);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_p2pkh() {
        let bytes = hex::decode("76a914e2a623699e81b291c0327f408fea765d534baa2a88ac").unwrap();
        let chunks = decode_script(&bytes).unwrap();
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0].op, OP_DUP);
        assert_eq!(chunks[2].op, OP_DATA_20);
        assert_eq!(chunks[2].data.as_ref().map(|d| d.len()), Some(20));
        assert_eq!(chunks[4].op, OP_CHECKSIG);
    }

    #[test]
    fn test_decode_null_data_pushes_individually() {
        // OP_RETURN <"SLP\0"> <0x01> OP_PUSHDATA1 <empty>
        let bytes = hex::decode("6a04534c500001014c00").unwrap();
        let chunks = decode_script(&bytes).unwrap();
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0], ScriptChunk { op: OP_RETURN, data: None });
        assert_eq!(chunks[1].data.as_deref(), Some(&b"SLP\0"[..]));
        assert_eq!(chunks[2].data.as_deref(), Some(&[0x01][..]));
        assert_eq!(chunks[3], ScriptChunk { op: OP_PUSHDATA1, data: Some(vec![]) });
    }

    #[test]
    fn test_decode_truncated_pushes() {
        assert!(matches!(decode_script(&[0x05, 0x01]), Err(ScriptError::DataTooSmall)));
        assert!(matches!(decode_script(&[OP_PUSHDATA1]), Err(ScriptError::DataTooSmall)));
        assert!(matches!(decode_script(&[OP_PUSHDATA2, 0x01]), Err(ScriptError::DataTooSmall)));
        assert!(matches!(
            decode_script(&[OP_PUSHDATA4, 0xff, 0xff, 0xff, 0xff, 0x00]),
            Err(ScriptError::DataTooSmall)
        ));
    }

    #[test]
    fn test_push_data_prefix_boundaries() {
        assert_eq!(push_data_prefix(0).unwrap(), vec![OP_0]);
        assert_eq!(push_data_prefix(75).unwrap(), vec![0x4b]);
        assert_eq!(push_data_prefix(76).unwrap(), vec![OP_PUSHDATA1, 76]);
        assert_eq!(push_data_prefix(255).unwrap(), vec![OP_PUSHDATA1, 0xff]);
        assert_eq!(push_data_prefix(256).unwrap(), vec![OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(push_data_prefix(65536).unwrap(), vec![OP_PUSHDATA4, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_encode_push_datas_decodes_back() {
        let big = vec![0xab; 300];
        let encoded = encode_push_datas(&[b"SLP\0", &[0x01], &big]).unwrap();
        let chunks = decode_script(&encoded).unwrap();
        let datas: Vec<Vec<u8>> = chunks.into_iter().filter_map(|c| c.data).collect();
        assert_eq!(datas, vec![b"SLP\0".to_vec(), vec![0x01], big]);
    }
}
