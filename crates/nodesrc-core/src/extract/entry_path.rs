//! Mapping archive member paths onto the destination directory.

use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Joins a member path onto `dest_dir`, keeping the path exactly as recorded.
///
/// Returns `None` for absolute paths, drive prefixes, `..` components, or a
/// path that names nothing (empty or only `.`).
pub fn resolve_member_path(dest_dir: &Path, member: &Path) -> Option<PathBuf> {
    let mut out = dest_dir.to_path_buf();
    let mut named = false;
    for comp in member.components() {
        match comp {
            Component::Normal(part) => {
                out.push(part);
                named = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    named.then_some(out)
}

/// True if a symlink stored at `member` pointing to `target` resolves inside the archive root.
///
/// Resolution is lexical: `target` is taken relative to the directory holding `member`.
pub fn link_target_inside(member: &Path, target: &Path) -> bool {
    let mut depth: usize = member
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count()
        .saturating_sub(1);
    for comp in target.components() {
        match comp {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

/// First directory between `dest_dir` and `out` that is a symlink on disk.
///
/// `out` must come from [`resolve_member_path`] on the same `dest_dir`. A hit
/// means writing `out` would follow a link created earlier in the archive.
pub fn symlinked_ancestor(dest_dir: &Path, out: &Path) -> Option<PathBuf> {
    let rel = out.strip_prefix(dest_dir).ok()?.parent()?;
    let mut cur = dest_dir.to_path_buf();
    for comp in rel.components() {
        cur.push(comp);
        if is_symlink(&cur) {
            return Some(cur);
        }
    }
    None
}

/// True if resolving `target` from the directory of `member` steps through an
/// existing symlink under `dest_dir` before its last component.
///
/// [`link_target_inside`] is lexical and cannot see `a/../..` escaping when
/// `a` is itself a link.
pub fn link_walks_symlink(dest_dir: &Path, member: &Path, target: &Path) -> bool {
    let mut stack: Vec<&OsStr> = member
        .components()
        .filter_map(|c| match c {
            Component::Normal(p) => Some(p),
            _ => None,
        })
        .collect();
    stack.pop();

    let comps: Vec<Component<'_>> = target.components().collect();
    let last = comps.len().saturating_sub(1);
    for (i, comp) in comps.into_iter().enumerate() {
        match comp {
            Component::Normal(p) => {
                stack.push(p);
                if i < last {
                    let walked: PathBuf = std::iter::once(dest_dir.as_os_str())
                        .chain(stack.iter().copied())
                        .collect();
                    if is_symlink(&walked) {
                        return true;
                    }
                }
            }
            Component::ParentDir => {
                stack.pop();
            }
            _ => {}
        }
    }
    false
}

pub(crate) fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}
