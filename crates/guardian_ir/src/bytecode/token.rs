//! Metadata tokens.

use std::fmt;

/// Metadata table a token points into (the token's high byte).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TokenTable {
    FieldDef = 0x04,
    MethodDef = 0x06,
    MemberRef = 0x0A,
    MethodSpec = 0x2B,
}

impl TokenTable {
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x04 => Some(TokenTable::FieldDef),
            0x06 => Some(TokenTable::MethodDef),
            0x0A => Some(TokenTable::MemberRef),
            0x2B => Some(TokenTable::MethodSpec),
            _ => None,
        }
    }
}

/// A 32-bit metadata token.
///
/// Layout: table (8 bits) + row (24 bits). Rows are 1-based; row 0 is never
/// handed out by the assembler.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Token(u32);

impl Token {
    /// Largest row number representable in 24 bits.
    pub const MAX_ROW: u32 = 0x00FF_FFFF;

    /// Create from table and row.
    #[inline]
    pub const fn new(table: TokenTable, row: u32) -> Self {
        debug_assert!(row <= Self::MAX_ROW);
        Token(((table as u32) << 24) | (row & Self::MAX_ROW))
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Token(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Decode the table byte, if it names a known table.
    #[inline]
    pub const fn table(self) -> Option<TokenTable> {
        TokenTable::from_byte((self.0 >> 24) as u8)
    }

    #[inline]
    pub const fn row(self) -> u32 {
        self.0 & Self::MAX_ROW
    }

    /// Read a little-endian token at `offset`.
    pub fn read(bytes: &[u8], offset: usize) -> Option<Self> {
        let raw: [u8; 4] = bytes.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
        Some(Token(u32::from_le_bytes(raw)))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({self})")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}
