//! Transport abstraction: the serial line to the Maestro.
//!
//! Concrete implementations wrap a UART (hardware serial on the
//! microcontroller, a USB virtual COM port on a host).  The controller
//! adapter is generic over `Transport`, so swapping the port requires no
//! changes to the command logic.

/// Byte-oriented, non-blocking transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Check if data is available for reading.
    fn available(&self) -> bool;

    /// Discard pending input (a late reply to an earlier query, line noise).
    /// Returns the number of bytes dropped.
    fn drain(&mut self) -> Result<usize, Self::Error> {
        let mut scratch = [0u8; 16];
        let mut dropped = 0;
        while self.available() {
            let n = self.read(&mut scratch)?;
            if n == 0 {
                break;
            }
            dropped += n;
        }
        Ok(dropped)
    }
}

/// A null transport that discards all writes and never reads.
/// Position reads through it always time out.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = ();

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ()> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn available(&self) -> bool {
        false
    }
}
