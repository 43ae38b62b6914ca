//! Byte sinks the TIFF writer emits into.
//!
//! [`TiffStream`] is the capability set the writer needs from its target:
//! read, write, seek, size, and close. [`MemoryStream`] is always available;
//! [`IoStream`] adapts any `std::io` stream (files included) behind the `std`
//! feature.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::BilevelError;

/// Seek origin, mirroring `std::io::SeekFrom` for `no_std` builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekFrom {
    Start(u64),
    End(i64),
    Current(i64),
}

/// Random-access byte stream.
pub trait TiffStream {
    /// Read up to `buf.len()` bytes at the cursor. Returns the count read.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BilevelError>;

    /// Write all of `buf` at the cursor.
    fn write(&mut self, buf: &[u8]) -> Result<(), BilevelError>;

    /// Move the cursor, returning the new absolute position.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, BilevelError>;

    /// Total stream length in bytes.
    fn size(&mut self) -> Result<u64, BilevelError>;

    /// Flush and release the stream. Later writes fail.
    fn close(&mut self) -> Result<(), BilevelError>;

    /// Current cursor position.
    fn position(&mut self) -> Result<u64, BilevelError> {
        self.seek(SeekFrom::Current(0))
    }
}

impl<S: TiffStream + ?Sized> TiffStream for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BilevelError> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), BilevelError> {
        (**self).write(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, BilevelError> {
        (**self).seek(pos)
    }

    fn size(&mut self) -> Result<u64, BilevelError> {
        (**self).size()
    }

    fn close(&mut self) -> Result<(), BilevelError> {
        (**self).close()
    }
}

fn sink_error(msg: &str) -> BilevelError {
    BilevelError::SinkWriteFailure(msg.to_string())
}

/// Growable in-memory stream.
#[derive(Clone, Debug, Default)]
pub struct MemoryStream {
    data: Vec<u8>,
    pos: usize,
    closed: bool,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl TiffStream for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BilevelError> {
        if self.closed {
            return Err(sink_error("read from closed stream"));
        }
        let available = self.data.get(self.pos..).unwrap_or(&[]);
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), BilevelError> {
        if self.closed {
            return Err(sink_error("write to closed stream"));
        }
        let end = self
            .pos
            .checked_add(buf.len())
            .ok_or_else(|| sink_error("write past addressable memory"))?;
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[self.pos..end].copy_from_slice(buf);
        self.pos = end;
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, BilevelError> {
        let (base, offset) = match pos {
            SeekFrom::Start(n) => (0i128, i128::from(n)),
            SeekFrom::End(n) => (self.data.len() as i128, i128::from(n)),
            SeekFrom::Current(n) => (self.pos as i128, i128::from(n)),
        };
        let target = base + offset;
        if target < 0 {
            return Err(sink_error("seek before start of stream"));
        }
        self.pos = usize::try_from(target).map_err(|_| sink_error("seek past addressable memory"))?;
        Ok(self.pos as u64)
    }

    fn size(&mut self) -> Result<u64, BilevelError> {
        Ok(self.data.len() as u64)
    }

    fn close(&mut self) -> Result<(), BilevelError> {
        self.closed = true;
        Ok(())
    }
}

/// Adapter over any `std::io` stream.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoStream<T> {
    inner: T,
    closed: bool,
}

#[cfg(feature = "std")]
impl<T: std::io::Read + std::io::Write + std::io::Seek> IoStream<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    fn check_open(&self) -> Result<(), BilevelError> {
        if self.closed {
            return Err(sink_error("stream already closed"));
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
fn io_error(e: std::io::Error) -> BilevelError {
    BilevelError::SinkWriteFailure(e.to_string())
}

#[cfg(feature = "std")]
impl<T: std::io::Read + std::io::Write + std::io::Seek> TiffStream for IoStream<T> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BilevelError> {
        self.check_open()?;
        self.inner.read(buf).map_err(io_error)
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), BilevelError> {
        self.check_open()?;
        self.inner.write_all(buf).map_err(io_error)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, BilevelError> {
        self.check_open()?;
        let pos = match pos {
            SeekFrom::Start(n) => std::io::SeekFrom::Start(n),
            SeekFrom::End(n) => std::io::SeekFrom::End(n),
            SeekFrom::Current(n) => std::io::SeekFrom::Current(n),
        };
        self.inner.seek(pos).map_err(io_error)
    }

    fn size(&mut self) -> Result<u64, BilevelError> {
        self.check_open()?;
        let here = self.inner.stream_position().map_err(io_error)?;
        let end = self
            .inner
            .seek(std::io::SeekFrom::End(0))
            .map_err(io_error)?;
        self.inner
            .seek(std::io::SeekFrom::Start(here))
            .map_err(io_error)?;
        Ok(end)
    }

    fn close(&mut self) -> Result<(), BilevelError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.inner.flush().map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn write_seek_overwrite() {
        let mut s = MemoryStream::new();
        s.write(&[1, 2, 3, 4]).unwrap();
        assert_eq!(s.seek(SeekFrom::Start(1)).unwrap(), 1);
        s.write(&[9]).unwrap();
        assert_eq!(s.position().unwrap(), 2);
        assert_eq!(s.size().unwrap(), 4);
        assert_eq!(s.as_bytes(), &[1, 9, 3, 4]);
    }

    #[test]
    fn seek_past_end_zero_fills() {
        let mut s = MemoryStream::new();
        s.seek(SeekFrom::Start(3)).unwrap();
        s.write(&[7]).unwrap();
        assert_eq!(s.into_inner(), vec![0, 0, 0, 7]);
    }

    #[test]
    fn read_back() {
        let mut s = MemoryStream::new();
        s.write(&[1, 2, 3]).unwrap();
        s.seek(SeekFrom::End(-2)).unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(s.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[2, 3]);
        assert_eq!(s.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn seek_before_start_fails() {
        let mut s = MemoryStream::new();
        assert!(matches!(
            s.seek(SeekFrom::Current(-1)),
            Err(BilevelError::SinkWriteFailure(_))
        ));
    }

    #[test]
    fn closed_stream_rejects_writes() {
        let mut s = MemoryStream::new();
        s.write(&[1]).unwrap();
        s.close().unwrap();
        assert!(s.is_closed());
        assert!(matches!(
            s.write(&[2]),
            Err(BilevelError::SinkWriteFailure(_))
        ));
        assert_eq!(s.as_bytes(), &[1]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn io_stream_over_cursor() {
        let mut s = IoStream::new(std::io::Cursor::new(Vec::new()));
        s.write(&[5, 6, 7]).unwrap();
        s.seek(SeekFrom::Start(0)).unwrap();
        s.write(&[4]).unwrap();
        assert_eq!(s.size().unwrap(), 3);
        assert_eq!(s.position().unwrap(), 1);
        s.close().unwrap();
        assert!(s.write(&[0]).is_err());
        assert_eq!(s.into_inner().into_inner(), vec![4, 6, 7]);
    }
}
