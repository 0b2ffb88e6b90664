use crate::codec::INDEFINITE;
use crate::{CborError, ErrorCode};

/// A decoded initial byte: major type, additional info and the offset it was read at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    pub major: u8,
    pub ai: u8,
    pub offset: usize,
}

impl Head {
    pub const fn is_indefinite(self) -> bool {
        self.ai == INDEFINITE
    }
}

#[derive(Clone, Copy)]
pub struct CborStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> CborStream<'a> {
    pub const fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn peek_u8(&self) -> Result<u8, CborError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or_else(|| CborError::new(ErrorCode::UnexpectedEof, self.pos))
    }

    pub fn read_u8(&mut self) -> Result<u8, CborError> {
        let b = self.peek_u8()?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8], CborError> {
        let off = self.pos;
        let end = self
            .pos
            .checked_add(n)
            .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, off))?;
        if end > self.data.len() {
            return Err(CborError::new(ErrorCode::UnexpectedEof, off));
        }
        let s = &self.data[self.pos..end];
        self.pos = end;
        Ok(s)
    }

    pub fn read_be_u16(&mut self) -> Result<u16, CborError> {
        let s = self.read_exact(2)?;
        Ok(u16::from_be_bytes([s[0], s[1]]))
    }

    pub fn read_be_u32(&mut self) -> Result<u32, CborError> {
        let s = self.read_exact(4)?;
        Ok(u32::from_be_bytes([s[0], s[1], s[2], s[3]]))
    }

    pub fn read_be_u64(&mut self) -> Result<u64, CborError> {
        let s = self.read_exact(8)?;
        Ok(u64::from_be_bytes([
            s[0], s[1], s[2], s[3], s[4], s[5], s[6], s[7],
        ]))
    }

    pub fn read_head(&mut self) -> Result<Head, CborError> {
        let offset = self.pos;
        let ib = self.read_u8()?;
        Ok(Head {
            major: ib >> 5,
            ai: ib & 0x1f,
            offset,
        })
    }

    /// Reads the argument that follows a head. Overlong forms are accepted.
    pub fn read_uint_arg(&mut self, head: Head) -> Result<u64, CborError> {
        match head.ai {
            0..=23 => Ok(u64::from(head.ai)),
            24 => Ok(u64::from(self.read_u8()?)),
            25 => Ok(u64::from(self.read_be_u16()?)),
            26 => Ok(u64::from(self.read_be_u32()?)),
            27 => self.read_be_u64(),
            _ => Err(CborError::new(
                ErrorCode::ReservedAdditionalInfo,
                head.offset,
            )),
        }
    }

    /// Reads a definite length argument; `None` means indefinite length.
    pub fn read_len_arg(&mut self, head: Head) -> Result<Option<usize>, CborError> {
        if head.is_indefinite() {
            return Ok(None);
        }
        let len = self.read_uint_arg(head)?;
        usize::try_from(len)
            .map(Some)
            .map_err(|_| CborError::new(ErrorCode::LengthOverflow, head.offset))
    }
}
