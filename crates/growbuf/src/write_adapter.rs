// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::Write;

use crate::GrowableBuffer;

impl GrowableBuffer {
    /// Returns an adapter that implements `std::io::Write` by appending to this buffer.
    ///
    /// This lets the buffer be the target of `write!` and of any encoder that writes to a
    /// `std::io::Write`. The buffer grows as needed. Flushing the adapter is a no-op; the written
    /// bytes remain in the buffer until taken out via [`flush()`][Self::flush].
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::Write;
    ///
    /// use growbuf::GrowableBuffer;
    ///
    /// let mut buf = GrowableBuffer::new();
    ///
    /// write!(buf.as_write(), "{}:{}", "id", 42).unwrap();
    ///
    /// assert_eq!(buf.join(), b"id:42");
    /// ```
    pub fn as_write(&mut self) -> impl Write + '_ {
        GrowableBufferWrite { inner: self }
    }
}

#[derive(Debug)]
struct GrowableBufferWrite<'b> {
    inner: &'b mut GrowableBuffer,
}

impl Write for GrowableBufferWrite<'_> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.put_slice(buf)?;
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
