//! Diagnostic rendering in the style of RFC 8949 §8.
//!
//! Maps render as `{"key": value}`, arrays as `[a, b]`, byte strings as `h'..'`, tags as `n(..)`.
//! Chunked strings render their chunks as `(_ a, b)`. Bytes holding several items back to back
//! render as a comma-separated sequence.

use alloc::string::String;
use core::fmt::{self, Write as _};

use crate::codec::{
    f16_to_f64, BREAK, MAJOR_ARRAY, MAJOR_BYTES, MAJOR_MAP, MAJOR_NINT, MAJOR_SIMPLE, MAJOR_TAG,
    MAJOR_TEXT, MAJOR_UINT,
};
use crate::stream::{CborStream, Head};
use crate::{CborError, Document, ErrorCode};

impl Document {
    /// Render the bytes in diagnostic notation. An empty document renders as the empty string.
    ///
    /// ```
    /// use cbor_doc::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.assign_key("answer", 42u64)?;
    /// doc.assign_key("name", "deep thought")?;
    /// assert_eq!(doc.to_diagnostic()?, r#"{"answer": 42, "name": "deep thought"}"#);
    /// # Ok::<(), cbor_doc::CborError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a decode error if the bytes are malformed or nest deeper than
    /// `limits().max_depth`. Rendering does not latch.
    pub fn to_diagnostic(&self) -> Result<String, CborError> {
        let mut r = Renderer {
            stream: CborStream::new(&self.buf, 0),
            out: String::new(),
            max_depth: self.limits.max_depth,
        };
        let mut first = true;
        while r.stream.position() < self.buf.len() {
            if !first {
                r.out.push_str(", ");
            }
            first = false;
            r.item(0)?;
        }
        Ok(r.out)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_diagnostic() {
            Ok(s) => f.write_str(&s),
            Err(err) => write!(f, "<malformed cbor at {}>", err.offset),
        }
    }
}

struct Renderer<'a> {
    stream: CborStream<'a>,
    out: String,
    max_depth: usize,
}

impl Renderer<'_> {
    fn put(&mut self, args: fmt::Arguments<'_>) -> Result<(), CborError> {
        let offset = self.stream.position();
        self.out
            .write_fmt(args)
            .map_err(|_| CborError::new(ErrorCode::InsufficientSpace, offset))
    }

    fn item(&mut self, depth: usize) -> Result<(), CborError> {
        let head = self.stream.read_head()?;
        match head.major {
            MAJOR_UINT => {
                let v = self.stream.read_uint_arg(head)?;
                self.put(format_args!("{v}"))
            }
            MAJOR_NINT => {
                let n = self.stream.read_uint_arg(head)?;
                let v = -1 - i128::from(n);
                self.put(format_args!("{v}"))
            }
            MAJOR_BYTES | MAJOR_TEXT => self.string(head),
            MAJOR_ARRAY => self.container(head, depth, false),
            MAJOR_MAP => self.container(head, depth, true),
            MAJOR_TAG => {
                let tag = self.stream.read_uint_arg(head)?;
                self.enter(depth, head)?;
                self.put(format_args!("{tag}("))?;
                self.item(depth + 1)?;
                self.out.push(')');
                Ok(())
            }
            MAJOR_SIMPLE => self.simple(head),
            _ => unreachable!("major out of range"),
        }
    }

    const fn enter(&self, depth: usize, head: Head) -> Result<(), CborError> {
        if depth + 1 > self.max_depth {
            return Err(CborError::new(ErrorCode::DepthLimitExceeded, head.offset));
        }
        Ok(())
    }

    fn at_break(&mut self) -> Result<bool, CborError> {
        if self.stream.peek_u8()? == BREAK {
            self.stream.read_u8()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn container(&mut self, head: Head, depth: usize, is_map: bool) -> Result<(), CborError> {
        self.enter(depth, head)?;
        let (open, close) = if is_map { ('{', '}') } else { ('[', ']') };
        self.out.push(open);
        let len = self.stream.read_len_arg(head)?;
        let mut i = 0usize;
        loop {
            match len {
                Some(n) if i == n => break,
                None if self.at_break()? => break,
                _ => {}
            }
            if i > 0 {
                self.out.push_str(", ");
            }
            self.item(depth + 1)?;
            if is_map {
                self.out.push_str(": ");
                self.item(depth + 1)?;
            }
            i += 1;
        }
        self.out.push(close);
        Ok(())
    }

    fn string(&mut self, head: Head) -> Result<(), CborError> {
        let Some(len) = self.stream.read_len_arg(head)? else {
            self.out.push_str("(_ ");
            let mut first = true;
            while !self.at_break()? {
                let chunk = self.stream.read_head()?;
                if chunk.major != head.major || chunk.is_indefinite() {
                    return Err(CborError::new(
                        ErrorCode::IndefiniteLengthString,
                        chunk.offset,
                    ));
                }
                if !first {
                    self.out.push_str(", ");
                }
                first = false;
                self.string(chunk)?;
            }
            self.out.push(')');
            return Ok(());
        };
        let bytes = self.stream.read_exact(len)?;
        if head.major == MAJOR_BYTES {
            self.out.push_str("h'");
            for b in bytes {
                self.put(format_args!("{b:02x}"))?;
            }
            self.out.push('\'');
            return Ok(());
        }
        let text = crate::utf8::validate(bytes)
            .map_err(|()| CborError::new(ErrorCode::Utf8Invalid, head.offset))?;
        self.out.push('"');
        for c in text.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if c.is_control() => self.put(format_args!("\\u{:04x}", u32::from(c)))?,
                c => self.out.push(c),
            }
        }
        self.out.push('"');
        Ok(())
    }

    fn simple(&mut self, head: Head) -> Result<(), CborError> {
        match head.ai {
            20 => self.out.push_str("false"),
            21 => self.out.push_str("true"),
            22 => self.out.push_str("null"),
            23 => self.out.push_str("undefined"),
            0..=19 => self.put(format_args!("simple({})", head.ai))?,
            24 => {
                let v = self.stream.read_u8()?;
                self.put(format_args!("simple({v})"))?;
            }
            25 => {
                let v = f16_to_f64(self.stream.read_be_u16()?);
                self.float(v)?;
            }
            26 => {
                let v = f64::from(f32::from_bits(self.stream.read_be_u32()?));
                self.float(v)?;
            }
            27 => {
                let v = f64::from_bits(self.stream.read_be_u64()?);
                self.float(v)?;
            }
            28..=30 => {
                return Err(CborError::new(
                    ErrorCode::ReservedAdditionalInfo,
                    head.offset,
                ))
            }
            _ => return Err(CborError::new(ErrorCode::UnexpectedBreak, head.offset)),
        }
        Ok(())
    }

    fn float(&mut self, v: f64) -> Result<(), CborError> {
        if v.is_nan() {
            self.out.push_str("NaN");
        } else if v.is_infinite() {
            self.out
                .push_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
        } else {
            self.put(format_args!("{v:?}"))?;
        }
        Ok(())
    }
}
