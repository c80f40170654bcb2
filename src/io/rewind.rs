//! Checkpointing wrapper over a seekable stream
//!
//! A [`Capture`] remembers a committed offset and seeks the stream back to
//! it when dropped, unless it has been released first.
//!
//! ```text
//! let mut capture = Capture::new(&mut stream)?;
//! capture.read_line(&mut line)?;   // reads through the capture
//! capture.commit()?;               // keep what was read so far
//! capture.read_line(&mut line)?;
//! drop(capture);                   // stream is back after the first line
//! ```

use std::io::{self, Seek, SeekFrom};
use std::ops::{Deref, DerefMut};

use tracing::warn;

/// Error type for capture operations
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The stream cannot report or change its read position
    #[error("Stream is not seekable: {0}")]
    NotSeekable(#[source] io::Error),

    /// Seeking or querying the position failed after the capture was created
    #[error("Failed to reposition stream: {0}")]
    Io(#[from] io::Error),
}

/// Scoped rewind handle bound to one stream
pub struct Capture<'a, S: Seek + ?Sized> {
    stream: &'a mut S,
    committed: u64,
    armed: bool,
}

impl<'a, S: Seek + ?Sized> Capture<'a, S> {
    /// Bind to `stream` at its current offset
    pub fn new(stream: &'a mut S) -> Result<Self, CaptureError> {
        let committed = stream
            .stream_position()
            .map_err(CaptureError::NotSeekable)?;
        Ok(Self {
            stream,
            committed,
            armed: true,
        })
    }

    /// Move the rewind point to the current offset
    pub fn commit(&mut self) -> Result<(), CaptureError> {
        if self.armed {
            self.committed = self.stream.stream_position()?;
        }
        Ok(())
    }

    /// Permanently disable rewinding for this handle
    pub fn release(&mut self) {
        self.armed = false;
    }

    /// Seek back to the last committed offset now
    pub fn rewind(&mut self) -> Result<(), CaptureError> {
        if self.armed {
            self.stream.seek(SeekFrom::Start(self.committed))?;
        }
        Ok(())
    }

    /// Offset the stream returns to on rewind
    pub fn committed(&self) -> u64 {
        self.committed
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl<S: Seek + ?Sized> Deref for Capture<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.stream
    }
}

impl<S: Seek + ?Sized> DerefMut for Capture<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.stream
    }
}

impl<S: Seek + ?Sized> Drop for Capture<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.rewind() {
            warn!("Failed to rewind stream to offset {}: {}", self.committed, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, Cursor, Read};

    fn data() -> Cursor<&'static str> {
        Cursor::new("some\nlines of\ntext.\n")
    }

    fn read_line<S: BufRead + ?Sized>(stream: &mut S) -> String {
        let mut line = String::new();
        stream.read_line(&mut line).unwrap();
        line
    }

    /// Stream whose position cannot be queried, like a pipe
    struct Pipe(Cursor<&'static str>);

    impl Read for Pipe {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0.read(buf)
        }
    }

    impl Seek for Pipe {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "illegal seek"))
        }
    }

    #[test]
    fn explicit_rewind_returns_to_start() {
        let mut stream = data();
        let mut capture = Capture::new(&mut stream).unwrap();

        assert_eq!(read_line(&mut *capture), "some\n");
        assert_eq!(capture.stream_position().unwrap(), 5);
        capture.rewind().unwrap();
        assert_eq!(capture.stream_position().unwrap(), 0);
    }

    #[test]
    fn drop_rewinds_with_zero_commits() {
        let mut stream = data();
        {
            let mut capture = Capture::new(&mut stream).unwrap();
            assert_eq!(read_line(&mut *capture), "some\n");
            assert_eq!(read_line(&mut *capture), "lines of\n");
        }
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn early_error_return_rewinds() {
        fn failing(stream: &mut Cursor<&'static str>) -> Result<(), CaptureError> {
            let mut capture = Capture::new(stream)?;
            let mut line = String::new();
            capture.read_line(&mut line)?;
            Err(CaptureError::Io(io::Error::other("boom")))
        }

        let mut stream = data();
        assert!(failing(&mut stream).is_err());
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn drop_rewinds_to_last_commit() {
        let mut stream = data();
        {
            let mut capture = Capture::new(&mut stream).unwrap();
            assert_eq!(read_line(&mut *capture), "some\n");
            capture.commit().unwrap();
            assert_eq!(read_line(&mut *capture), "lines of\n");
            assert_eq!(capture.stream_position().unwrap(), 14);
        }
        assert_eq!(stream.position(), 5);
    }

    #[test]
    fn release_disables_rewind() {
        let mut stream = data();
        {
            let mut capture = Capture::new(&mut stream).unwrap();
            assert_eq!(read_line(&mut *capture), "some\n");
            capture.release();
            capture.rewind().unwrap();
            assert!(!capture.is_armed());
        }
        assert_eq!(stream.position(), 5);
    }

    #[test]
    fn capture_starts_at_current_offset() {
        let mut stream = data();
        stream.set_position(5);
        {
            let mut capture = Capture::new(&mut stream).unwrap();
            assert_eq!(capture.committed(), 5);
            read_line(&mut *capture);
        }
        assert_eq!(stream.position(), 5);
    }

    #[test]
    fn non_seekable_stream_is_rejected_at_creation() {
        let mut pipe = Pipe(data());
        let result = Capture::new(&mut pipe);

        assert!(matches!(result, Err(CaptureError::NotSeekable(_))));
    }
}
