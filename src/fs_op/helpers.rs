use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use fs_extra::file::{copy as fs_extra_copy, CopyOptions};

/// Ensure the parent directory of `p` exists.
pub(crate) fn ensure_parent_exists(p: &Path) -> io::Result<()> {
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

// Temp names combine pid, a process-wide sequence number and the clock so
// concurrent copies into one directory never collide.
fn temp_sibling(dst: &Path, dir: &Path) -> PathBuf {
    static NEXT_COPY_ID: AtomicU64 = AtomicU64::new(0);
    let seq = NEXT_COPY_ID.fetch_add(1, Ordering::Relaxed);
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let stem = dst
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.join(format!(
        ".tmp_copy.{}.{:x}{:x}{:x}",
        stem,
        std::process::id(),
        seq,
        nanos
    ))
}

/// Copy a single regular file byte-for-byte.
///
/// The bytes go into a temporary sibling of `dst` which is then renamed into
/// place, so readers never observe a half-written file and an existing `dst`
/// is replaced in one step. Permission bits and timestamps follow the
/// source; failing to apply them is not an error. The temp file is removed
/// on every failure path.
pub(crate) fn atomic_copy_file(src: &Path, dst: &Path) -> io::Result<u64> {
    let dir = match dst.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let tmp = temp_sibling(dst, &dir);

    let mut options = CopyOptions::new();
    options.overwrite = false;
    // 64 KiB buffer balances throughput and memory.
    options.buffer_size = 64 * 1024;

    let copied = match fs_extra_copy(src, &tmp, &options) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(io::Error::other(e));
        }
    };

    if let Err(e) = fs::rename(&tmp, dst) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    if let Err(e) = crate::fs_op::metadata::preserve_metadata(src, dst) {
        tracing::debug!("could not preserve metadata on {}: {}", dst.display(), e);
    }
    Ok(copied)
}
