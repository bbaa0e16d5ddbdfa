//! Path-to-path decryption through [`Rot128Reader`].
//!
//! Both files are owned by the function for its whole body, so they are
//! closed on every return path. The buffered writer is flushed explicitly
//! so a failed flush is reported instead of being swallowed on drop.

use crate::error::{DonationError, Result};
use crate::rot128::{Rot128Reader, Rotation};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Decodes `src` into `dst` with `rotation`, returning the number of bytes written.
///
/// `dst` is created or truncated. It must not name the same file as `src`,
/// since truncating it would empty the input before it is read.
pub fn decrypt_file<P, Q>(src: P, dst: Q, rotation: Rotation) -> Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (src, dst) = (src.as_ref(), dst.as_ref());
    debug!(
        "Decoding {} into {} with {}",
        src.display(),
        dst.display(),
        rotation
    );

    let mut reader = Rot128Reader::open(src, rotation).map_err(|source| DonationError::Open {
        path: src.to_path_buf(),
        source,
    })?;

    if is_same_file(src, dst) {
        return Err(DonationError::SamePath {
            path: src.to_path_buf(),
        });
    }

    let file = File::create(dst).map_err(|source| DonationError::Create {
        path: dst.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let copied = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    info!("Decrypted {} bytes into {}", copied, dst.display());
    Ok(copied)
}

/// Both paths resolve to one file. A missing `dst` is never the same file.
fn is_same_file(src: &Path, dst: &Path) -> bool {
    match (fs::canonicalize(src), fs::canonicalize(dst)) {
        (Ok(src), Ok(dst)) => src == dst,
        _ => false,
    }
}

/// Encodes `src` into `dst` so that [`decrypt_file`] with `rotation` restores it.
pub fn encrypt_file<P, Q>(src: P, dst: Q, rotation: Rotation) -> Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    decrypt_file(src, dst, rotation.inverse())
}

/// Strips a trailing `.rot128` extension, or appends `.decrypted` otherwise.
pub fn default_output_path(input: &Path) -> std::path::PathBuf {
    match input.extension() {
        Some(ext) if ext == "rot128" => input.with_extension(""),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(".decrypted");
            name.into()
        }
    }
}
