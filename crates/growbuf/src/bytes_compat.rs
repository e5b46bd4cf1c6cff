// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Interoperability with the `bytes` crate.

use bytes::Bytes;

use crate::GrowableBuffer;

impl GrowableBuffer {
    /// Returns the written bytes as a `bytes::Bytes` and clears the buffer.
    ///
    /// This is the `bytes` counterpart of [`flush()`][Self::flush]: the data is copied out and the
    /// buffer keeps its capacity for the next message.
    ///
    /// # Example
    ///
    /// ```
    /// use bytes::Buf;
    /// use growbuf::GrowableBuffer;
    ///
    /// # fn main() -> growbuf::Result<()> {
    /// let mut buf = GrowableBuffer::new();
    /// buf.write_u16_be(0x1234)?.write_u16_be(0x5678)?;
    ///
    /// let mut bytes = buf.flush_bytes();
    ///
    /// assert_eq!(bytes.get_u16(), 0x1234);
    /// assert_eq!(bytes.get_u16(), 0x5678);
    /// assert!(buf.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use = "flushing discards the buffered bytes, which are only available via the return value"]
    pub fn flush_bytes(&mut self) -> Bytes {
        Bytes::from(self.flush())
    }
}

impl From<GrowableBuffer> for Bytes {
    /// Converts the written bytes of the buffer into a `Bytes`, releasing any spare capacity.
    fn from(mut value: GrowableBuffer) -> Self {
        value.flush_bytes()
    }
}
