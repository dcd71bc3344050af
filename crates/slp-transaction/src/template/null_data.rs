//! OP_RETURN data outputs.

use slp_script::chunk::push_data_prefix;
use slp_script::opcodes::{OP_PUSHDATA1, OP_RETURN};
use slp_script::Script;

use crate::TransactionError;

/// `OP_RETURN <push> <push> ...`.
///
/// Zero-length parts are written as `OP_PUSHDATA1 0x00` rather than OP_0,
/// which is the form token protocols parse as an empty field.
///
/// # Arguments
/// * `parts` - Payloads to push, in order.
///
/// # Returns
/// The script, or a script error if a part is too large to push.
pub fn lock(parts: &[&[u8]]) -> Result<Script, TransactionError> {
    let mut bytes = vec![OP_RETURN];
    for part in parts {
        if part.is_empty() {
            bytes.extend_from_slice(&[OP_PUSHDATA1, 0x00]);
        } else {
            bytes.extend_from_slice(&push_data_prefix(part.len())?);
            bytes.extend_from_slice(part);
        }
    }
    Ok(Script::from_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_parts_use_pushdata1() {
        let script = lock(&[b"SLP\0", &[0x01], b""]).unwrap();
        assert_eq!(script.to_hex(), "6a04534c500001014c00");
        assert!(script.is_null_data());
    }

    #[test]
    fn test_no_parts_is_bare_op_return() {
        assert_eq!(lock(&[]).unwrap().to_hex(), "6a");
    }
}
