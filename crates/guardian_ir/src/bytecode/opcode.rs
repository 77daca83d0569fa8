//! Instruction opcodes.
//!
//! Byte values follow the ECMA-335 single-byte opcode table, so a compiled
//! closure body reads the same as the IL a .NET compiler would emit for
//! `() => thing.Nested.Value`.

/// Opcodes understood by the assembler and the bytecode walker.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum OpCode {
    Nop = 0x00,
    /// Load the closure receiver (argument 0).
    Ldarg0 = 0x02,
    Ldloc0 = 0x06,
    Stloc0 = 0x0A,
    Ldnull = 0x14,
    LdcI4 = 0x20,
    LdcI8 = 0x21,
    Call = 0x28,
    Ret = 0x2A,
    BrS = 0x2B,
    ConvI8 = 0x6A,
    Callvirt = 0x6F,
    Ldfld = 0x7B,
    LdelemRef = 0x9A,
}

impl OpCode {
    /// Decode a single opcode byte.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x00 => OpCode::Nop,
            0x02 => OpCode::Ldarg0,
            0x06 => OpCode::Ldloc0,
            0x0A => OpCode::Stloc0,
            0x14 => OpCode::Ldnull,
            0x20 => OpCode::LdcI4,
            0x21 => OpCode::LdcI8,
            0x28 => OpCode::Call,
            0x2A => OpCode::Ret,
            0x2B => OpCode::BrS,
            0x6A => OpCode::ConvI8,
            0x6F => OpCode::Callvirt,
            0x7B => OpCode::Ldfld,
            0x9A => OpCode::LdelemRef,
            _ => return None,
        })
    }

    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Operand width in bytes.
    pub const fn operand_size(self) -> usize {
        match self {
            OpCode::LdcI4 | OpCode::Call | OpCode::Callvirt | OpCode::Ldfld => 4,
            OpCode::LdcI8 => 8,
            OpCode::BrS => 1,
            OpCode::Nop
            | OpCode::Ldarg0
            | OpCode::Ldloc0
            | OpCode::Stloc0
            | OpCode::Ldnull
            | OpCode::Ret
            | OpCode::ConvI8
            | OpCode::LdelemRef => 0,
        }
    }

    /// `true` when the operand is a metadata token.
    pub const fn takes_token(self) -> bool {
        matches!(self, OpCode::Call | OpCode::Callvirt | OpCode::Ldfld)
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Nop => "nop",
            OpCode::Ldarg0 => "ldarg.0",
            OpCode::Ldloc0 => "ldloc.0",
            OpCode::Stloc0 => "stloc.0",
            OpCode::Ldnull => "ldnull",
            OpCode::LdcI4 => "ldc.i4",
            OpCode::LdcI8 => "ldc.i8",
            OpCode::Call => "call",
            OpCode::Ret => "ret",
            OpCode::BrS => "br.s",
            OpCode::ConvI8 => "conv.i8",
            OpCode::Callvirt => "callvirt",
            OpCode::Ldfld => "ldfld",
            OpCode::LdelemRef => "ldelem.ref",
        }
    }
}
