use crate::codec::{
    BREAK, MAJOR_ARRAY, MAJOR_BYTES, MAJOR_MAP, MAJOR_NINT, MAJOR_SIMPLE, MAJOR_TAG, MAJOR_TEXT,
    MAJOR_UINT,
};
use crate::stream::{CborStream, Head};
use crate::{CborError, ErrorCode};

/// Returns the offset one past the data item starting at `start`.
pub fn value_end(data: &[u8], start: usize, max_depth: usize) -> Result<usize, CborError> {
    let mut w = Walker::new(data, start, max_depth);
    w.skip_value(0)?;
    Ok(w.pos())
}

/// Offset of the first entry of the map at `start`, and its entry count when definite.
pub fn map_body(data: &[u8], start: usize) -> Result<(usize, Option<usize>), CborError> {
    let mut s = CborStream::new(data, start);
    let head = s.read_head()?;
    if head.major != MAJOR_MAP {
        return Err(CborError::new(ErrorCode::TypeMismatch, start));
    }
    let len = s.read_len_arg(head)?;
    Ok((s.position(), len))
}

struct Walker<'a> {
    stream: CborStream<'a>,
    max_depth: usize,
}

impl<'a> Walker<'a> {
    const fn new(data: &'a [u8], pos: usize, max_depth: usize) -> Self {
        Self {
            stream: CborStream::new(data, pos),
            max_depth,
        }
    }

    const fn pos(&self) -> usize {
        self.stream.position()
    }

    /// Consumes a break marker if one is next.
    fn at_break(&mut self) -> Result<bool, CborError> {
        if self.stream.peek_u8()? == BREAK {
            self.stream.read_u8()?;
            return Ok(true);
        }
        Ok(false)
    }

    const fn ensure_depth(&self, next_depth: usize, off: usize) -> Result<(), CborError> {
        if next_depth > self.max_depth {
            return Err(CborError::new(ErrorCode::DepthLimitExceeded, off));
        }
        Ok(())
    }

    fn skip_items(&mut self, head: Head, per_entry: usize, depth: usize) -> Result<(), CborError> {
        self.ensure_depth(depth + 1, head.offset)?;
        match self.stream.read_len_arg(head)? {
            Some(len) => {
                let items = len
                    .checked_mul(per_entry)
                    .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, head.offset))?;
                for _ in 0..items {
                    self.skip_value(depth + 1)?;
                }
            }
            None => {
                while !self.at_break()? {
                    for _ in 0..per_entry {
                        self.skip_value(depth + 1)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn skip_string(&mut self, head: Head) -> Result<(), CborError> {
        if let Some(len) = self.stream.read_len_arg(head)? {
            self.stream.read_exact(len)?;
            return Ok(());
        }
        // Chunks must be definite strings of the same major type.
        while !self.at_break()? {
            let chunk = self.stream.read_head()?;
            if chunk.major != head.major || chunk.is_indefinite() {
                return Err(CborError::new(
                    ErrorCode::IndefiniteLengthString,
                    chunk.offset,
                ));
            }
            self.skip_string(chunk)?;
        }
        Ok(())
    }

    fn skip_value(&mut self, depth: usize) -> Result<(), CborError> {
        let head = self.stream.read_head()?;
        match head.major {
            MAJOR_UINT | MAJOR_NINT => {
                if head.is_indefinite() {
                    return Err(CborError::new(
                        ErrorCode::ReservedAdditionalInfo,
                        head.offset,
                    ));
                }
                self.stream.read_uint_arg(head)?;
                Ok(())
            }
            MAJOR_BYTES | MAJOR_TEXT => self.skip_string(head),
            MAJOR_ARRAY => self.skip_items(head, 1, depth),
            MAJOR_MAP => self.skip_items(head, 2, depth),
            MAJOR_TAG => {
                if head.is_indefinite() {
                    return Err(CborError::new(
                        ErrorCode::ReservedAdditionalInfo,
                        head.offset,
                    ));
                }
                self.stream.read_uint_arg(head)?;
                self.ensure_depth(depth + 1, head.offset)?;
                self.skip_value(depth + 1)
            }
            MAJOR_SIMPLE => match head.ai {
                0..=23 => Ok(()),
                24 => {
                    self.stream.read_u8()?;
                    Ok(())
                }
                25 => {
                    self.stream.read_be_u16()?;
                    Ok(())
                }
                26 => {
                    self.stream.read_be_u32()?;
                    Ok(())
                }
                27 => {
                    self.stream.read_be_u64()?;
                    Ok(())
                }
                28..=30 => Err(CborError::new(
                    ErrorCode::ReservedAdditionalInfo,
                    head.offset,
                )),
                _ => Err(CborError::new(ErrorCode::UnexpectedBreak, head.offset)),
            },
            _ => unreachable!("major out of range"),
        }
    }
}
