//! Streaming byte rotation.
//!
//! Every byte is shifted by a fixed offset modulo 256. The transform is a
//! keyless permutation of the byte domain, so every input byte is valid and
//! nothing here can fail on its own: the only errors are the ones raised by
//! the wrapped reader or writer, and they are returned untouched.

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// A rotation offset in `[0, 255]`.
///
/// `decoded = (encoded + offset) mod 256`.
///
/// # Examples
///
/// ```
/// use rot128_donations::Rotation;
///
/// assert_eq!(Rotation::normalized(384), Rotation::ROT128);
/// assert_eq!(Rotation::normalized(-1), Rotation::new(255));
/// assert_eq!(Rotation::ROT128.inverse(), Rotation::ROT128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation(u8);

impl Rotation {
    /// Half turn of the byte domain. Applying it twice is the identity.
    pub const ROT128: Self = Rotation(128);

    /// The identity rotation.
    pub const IDENTITY: Self = Rotation(0);

    /// Creates a rotation by `offset`.
    pub const fn new(offset: u8) -> Self {
        Rotation(offset)
    }

    /// Builds a rotation from any integer, wrapping it modulo 256.
    ///
    /// Out-of-range offsets are never rejected: `-128`, `128` and `384`
    /// all describe the same rotation.
    pub fn normalized(offset: i64) -> Self {
        Rotation(offset.rem_euclid(256) as u8)
    }

    /// Returns the offset added to each byte.
    pub const fn offset(self) -> u8 {
        self.0
    }

    /// The rotation that undoes this one (`256 - offset`).
    pub const fn inverse(self) -> Self {
        Rotation(self.0.wrapping_neg())
    }

    /// Returns `true` if applying this rotation twice is the identity.
    pub const fn is_self_inverse(self) -> bool {
        self.0 == 0 || self.0 == 128
    }

    /// Rotates a single byte.
    #[inline]
    pub const fn apply(self, byte: u8) -> u8 {
        byte.wrapping_add(self.0)
    }
}

impl From<u8> for Rotation {
    fn from(offset: u8) -> Self {
        Rotation(offset)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rot{}", self.0)
    }
}

/// Rotates every byte of `buf` in place.
pub fn rotate_in_place(buf: &mut [u8], rotation: Rotation) {
    if rotation == Rotation::IDENTITY {
        return;
    }
    for byte in buf.iter_mut() {
        *byte = rotation.apply(*byte);
    }
}

/// A reader that rotates every byte it pulls from the wrapped source.
///
/// Each `read` forwards to the inner reader exactly once and rotates the
/// bytes it got back. There is no read-ahead and no carried state, so the
/// output does not depend on how the caller sizes its buffers.
///
/// # Examples
///
/// ```
/// use rot128_donations::{Rot128Reader, Rotation};
/// use std::io::Read;
///
/// let encoded: &[u8] = &[0x00, 0x7F, 0x80, 0xFF];
/// let mut decoded = Vec::new();
/// Rot128Reader::new(encoded, Rotation::ROT128)
///     .read_to_end(&mut decoded)
///     .unwrap();
/// assert_eq!(decoded, [0x80, 0xFF, 0x00, 0x7F]);
/// ```
#[derive(Debug)]
pub struct Rot128Reader<R> {
    inner: R,
    rotation: Rotation,
}

impl<R: Read> Rot128Reader<R> {
    /// Wraps `inner`. No bytes are read until the first `read`.
    pub fn new(inner: R, rotation: Rotation) -> Self {
        Rot128Reader { inner, rotation }
    }
}

impl Rot128Reader<File> {
    /// Opens `path` and wraps it. Nothing is read until the first `read`.
    pub fn open<P: AsRef<Path>>(path: P, rotation: Rotation) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Rot128Reader::new(file, rotation))
    }
}

impl<R> Rot128Reader<R> {
    /// Returns the rotation applied to each byte.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Gets a reference to the wrapped source.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Reading directly from the inner source skips the rotation.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps the decoder, returning the source at its current position.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Rot128Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        rotate_in_place(&mut buf[..n], self.rotation);
        Ok(n)
    }
}

const WRITE_CHUNK: usize = 8 * 1024;

/// A writer that rotates bytes before handing them to the wrapped sink.
///
/// Use the inverse of the decoding rotation to produce files that
/// [`Rot128Reader`] decodes back; for [`Rotation::ROT128`] both sides use
/// the same offset.
#[derive(Debug)]
pub struct Rot128Writer<W> {
    inner: W,
    rotation: Rotation,
    scratch: Vec<u8>,
}

impl<W: Write> Rot128Writer<W> {
    /// Wraps `inner`, rotating every byte written through it.
    pub fn new(inner: W, rotation: Rotation) -> Self {
        Rot128Writer {
            inner,
            rotation,
            scratch: Vec::new(),
        }
    }

    /// Returns the rotation applied to each byte.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Gets a reference to the wrapped sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwraps the encoder. Bytes are never held back, so nothing is lost.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for Rot128Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let chunk = &buf[..buf.len().min(WRITE_CHUNK)];
        self.scratch.clear();
        self.scratch.extend_from_slice(chunk);
        rotate_in_place(&mut self.scratch, self.rotation);
        // The inner writer may accept fewer bytes; report only what it took.
        self.inner.write(&self.scratch)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
