//! Opcode constants used by the scripts this workspace builds or inspects.
//!
//! Only the push family, the P2PKH template opcodes and OP_RETURN are
//! needed; nothing here is executed.

pub const OP_0: u8 = 0x00;
pub const OP_FALSE: u8 = 0x00;
pub const OP_DATA_1: u8 = 0x01;
pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_32: u8 = 0x20;
pub const OP_DATA_33: u8 = 0x21;
pub const OP_DATA_75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_16: u8 = 0x60;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// True for opcodes that only push data onto the stack.
///
/// Covers OP_0, direct pushes, OP_PUSHDATA1/2/4, OP_1NEGATE and OP_1..OP_16.
pub fn is_push_op(op: u8) -> bool {
    op <= OP_16 && op != 0x50
}

/// Canonical name for the opcodes known to this module.
pub fn opcode_to_string(op: u8) -> String {
    let name = match op {
        OP_0 => "OP_0",
        OP_PUSHDATA1 => "OP_PUSHDATA1",
        OP_PUSHDATA2 => "OP_PUSHDATA2",
        OP_PUSHDATA4 => "OP_PUSHDATA4",
        OP_1NEGATE => "OP_1NEGATE",
        OP_RETURN => "OP_RETURN",
        OP_DUP => "OP_DUP",
        OP_EQUAL => "OP_EQUAL",
        OP_EQUALVERIFY => "OP_EQUALVERIFY",
        OP_HASH160 => "OP_HASH160",
        OP_CHECKSIG => "OP_CHECKSIG",
        OP_1..=OP_16 => return format!("OP_{}", op - OP_1 + 1),
        OP_DATA_1..=OP_DATA_75 => return format!("OP_DATA_{}", op),
        _ => return format!("OP_UNKNOWN{}", op),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_ops() {
        assert!(is_push_op(OP_0));
        assert!(is_push_op(OP_DATA_20));
        assert!(is_push_op(OP_PUSHDATA4));
        assert!(is_push_op(OP_1NEGATE));
        assert!(is_push_op(OP_16));
        // OP_RESERVED
        assert!(!is_push_op(0x50));
        assert!(!is_push_op(OP_RETURN));
        assert!(!is_push_op(OP_DUP));
    }

    #[test]
    fn test_names() {
        assert_eq!(opcode_to_string(OP_RETURN), "OP_RETURN");
        assert_eq!(opcode_to_string(0x53), "OP_3");
        assert_eq!(opcode_to_string(OP_DATA_20), "OP_DATA_20");
        assert_eq!(opcode_to_string(0xff), "OP_UNKNOWN255");
    }
}
