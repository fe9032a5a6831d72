//! Reader that tracks how many bytes were pulled from the archive file.

use std::cell::Cell;
use std::io::{self, Read};
use std::rc::Rc;

/// Wraps the compressed input so progress can be measured against the file size
/// while the gzip and tar layers own the reader.
pub(crate) struct CountingReader<R> {
    inner: R,
    count: Rc<Cell<u64>>,
}

impl<R: Read> CountingReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            count: Rc::new(Cell::new(0)),
        }
    }

    /// Shared handle to the running byte count.
    pub(crate) fn counter(&self) -> Rc<Cell<u64>> {
        Rc::clone(&self.count)
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count.set(self.count.get() + n as u64);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bytes_read() {
        let data = vec![7u8; 10_000];
        let mut r = CountingReader::new(&data[..]);
        let counter = r.counter();
        let mut buf = [0u8; 4096];
        assert_eq!(r.read(&mut buf).unwrap(), 4096);
        assert_eq!(counter.get(), 4096);
        let mut rest = Vec::new();
        r.read_to_end(&mut rest).unwrap();
        assert_eq!(counter.get(), 10_000);
    }
}
