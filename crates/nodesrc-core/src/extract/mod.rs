//! Streaming extraction of gzip-compressed tar archives.
//!
//! Members are visited in archival order and written under the destination
//! directory with their recorded paths. Progress is measured in compressed
//! bytes consumed from the archive file against its size on disk.

mod counting;
mod entry_path;
mod error;

pub use entry_path::{
    link_target_inside, link_walks_symlink, resolve_member_path, symlinked_ancestor,
};
pub use error::ExtractError;

use crate::progress::{Progress, Throttle};
use counting::CountingReader;
use entry_path::is_symlink;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Extraction settings.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Report progress every N members.
    pub report_every: u32,
    /// Apply the recorded permission bits to extracted files (Unix only).
    pub preserve_permissions: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            report_every: 100,
            preserve_permissions: true,
        }
    }
}

/// Counts of what an extraction produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files: u64,
    pub directories: u64,
    /// Symlinks and hard links.
    pub links: u64,
    /// Members of kinds that are not extracted (devices, fifos, ...).
    pub skipped: u64,
    /// Content bytes written for regular files.
    pub bytes_written: u64,
}

/// Extracts the `.tar.gz` at `archive_path` into `dest_dir`.
///
/// `on_progress` runs every `report_every` members and once at the end, after
/// the gzip stream has been read to its trailer.
pub fn extract_tar_gz(
    archive_path: &Path,
    dest_dir: &Path,
    options: &ExtractOptions,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<ExtractSummary, ExtractError> {
    let file = File::open(archive_path).map_err(ExtractError::archive(archive_path))?;
    let total_bytes = file
        .metadata()
        .map_err(ExtractError::archive(archive_path))?
        .len();

    let reader = CountingReader::new(file);
    let consumed = reader.counter();
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let mut throttle = Throttle::new(options.report_every);
    let mut summary = ExtractSummary::default();

    tracing::debug!(
        archive = %archive_path.display(),
        dest = %dest_dir.display(),
        total_bytes,
        "starting extraction"
    );

    {
        let entries = archive
            .entries()
            .map_err(ExtractError::archive(archive_path))?;
        for entry in entries {
            let mut entry = entry.map_err(ExtractError::archive(archive_path))?;
            if throttle.tick() {
                on_progress(Progress::new(consumed.get(), Some(total_bytes)));
            }
            unpack_member(&mut entry, archive_path, dest_dir, options, &mut summary)?;
        }
    }

    // tar stops at the end-of-archive blocks; read on so the gzip trailer is checked
    let mut decoder = archive.into_inner();
    io::copy(&mut decoder, &mut io::sink()).map_err(ExtractError::archive(archive_path))?;

    on_progress(Progress::new(consumed.get(), Some(total_bytes)));
    tracing::info!(
        files = summary.files,
        directories = summary.directories,
        links = summary.links,
        skipped = summary.skipped,
        "extraction complete"
    );
    Ok(summary)
}

fn unpack_member<R: Read>(
    entry: &mut tar::Entry<'_, R>,
    archive_path: &Path,
    dest_dir: &Path,
    options: &ExtractOptions,
    summary: &mut ExtractSummary,
) -> Result<(), ExtractError> {
    let kind = entry.header().entry_type();
    if kind.is_pax_global_extensions()
        || kind.is_pax_local_extensions()
        || kind.is_gnu_longname()
        || kind.is_gnu_longlink()
    {
        return Ok(());
    }

    let member = entry
        .path()
        .map_err(ExtractError::archive(archive_path))?
        .into_owned();
    let out = resolve_member_path(dest_dir, &member)
        .ok_or_else(|| ExtractError::UnsafePath(member.clone()))?;
    if let Some(link) = symlinked_ancestor(dest_dir, &out) {
        tracing::warn!(
            member = %member.display(),
            link = %link.display(),
            "member path runs through a symlink"
        );
        return Err(ExtractError::UnsafePath(member));
    }

    if kind.is_dir() {
        fs::create_dir_all(&out).map_err(ExtractError::write(&out))?;
        summary.directories += 1;
    } else if kind.is_file() || kind.is_contiguous() {
        create_parent(&out)?;
        remove_symlink(&out)?;
        let mut f = File::create(&out).map_err(ExtractError::write(&out))?;
        let n = io::copy(entry, &mut f).map_err(ExtractError::write(&out))?;
        summary.files += 1;
        summary.bytes_written += n;
        if options.preserve_permissions {
            apply_mode(entry.header(), &out)?;
        }
    } else if kind.is_symlink() {
        let target = link_name(entry, archive_path)?;
        if !link_target_inside(&member, &target)
            || link_walks_symlink(dest_dir, &member, &target)
        {
            return Err(ExtractError::UnsafeLink {
                path: member,
                target,
            });
        }
        create_symlink(&target, &out, summary)?;
    } else if kind.is_hard_link() {
        let target = link_name(entry, archive_path)?;
        let source = resolve_member_path(dest_dir, &target)
            .filter(|src| {
                symlinked_ancestor(dest_dir, src).is_none() && !is_symlink(src)
            })
            .ok_or_else(|| ExtractError::UnsafeLink {
                path: member.clone(),
                target: target.clone(),
            })?;
        create_parent(&out)?;
        remove_symlink(&out)?;
        fs::copy(&source, &out).map_err(ExtractError::write(&out))?;
        summary.links += 1;
    } else {
        tracing::debug!(member = %member.display(), kind = ?kind, "skipping member");
        summary.skipped += 1;
    }
    Ok(())
}

fn link_name<R: Read>(
    entry: &tar::Entry<'_, R>,
    archive_path: &Path,
) -> Result<std::path::PathBuf, ExtractError> {
    entry
        .link_name()
        .map_err(ExtractError::archive(archive_path))?
        .map(|p| p.into_owned())
        .ok_or_else(|| ExtractError::Archive {
            archive: archive_path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, "link member without target"),
        })
}

#[cfg(unix)]
fn apply_mode(header: &tar::Header, out: &Path) -> Result<(), ExtractError> {
    use std::os::unix::fs::PermissionsExt;
    if let Ok(mode) = header.mode() {
        fs::set_permissions(out, fs::Permissions::from_mode(mode & 0o7777))
            .map_err(ExtractError::write(out))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_header: &tar::Header, _out: &Path) -> Result<(), ExtractError> {
    Ok(())
}

fn create_parent(out: &Path) -> Result<(), ExtractError> {
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent).map_err(ExtractError::write(parent))?;
    }
    Ok(())
}

/// A file member replacing a link must not write through it.
fn remove_symlink(out: &Path) -> Result<(), ExtractError> {
    if is_symlink(out) {
        fs::remove_file(out).map_err(ExtractError::write(out))?;
    }
    Ok(())
}

#[cfg(unix)]
fn create_symlink(
    target: &Path,
    out: &Path,
    summary: &mut ExtractSummary,
) -> Result<(), ExtractError> {
    create_parent(out)?;
    if fs::symlink_metadata(out).is_ok() {
        fs::remove_file(out).map_err(ExtractError::write(out))?;
    }
    std::os::unix::fs::symlink(target, out).map_err(ExtractError::write(out))?;
    summary.links += 1;
    Ok(())
}

#[cfg(not(unix))]
fn create_symlink(
    _target: &Path,
    out: &Path,
    summary: &mut ExtractSummary,
) -> Result<(), ExtractError> {
    tracing::debug!(member = %out.display(), "symlinks not supported here, skipping");
    summary.skipped += 1;
    Ok(())
}
