//! Archive file lifecycle.
//!
//! The download is written to `<archive>.part` and renamed into place only
//! once the transfer completed, so a file named like the archive is always whole.

mod writer;

pub use writer::StorageWriter;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `node_src.tar.gz` → `node_src.tar.gz.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("node_src.tar.gz"));
        assert_eq!(p.to_string_lossy(), "node_src.tar.gz.part");
        let p2 = temp_path(Path::new("/tmp/node-v21.7.3.tar.gz"));
        assert_eq!(p2.to_string_lossy(), "/tmp/node-v21.7.3.tar.gz.part");
    }

    #[test]
    fn create_write_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("archive.tar.gz");
        let tp = temp_path(&final_path);

        let writer = StorageWriter::create(&tp).unwrap();
        writer.write_at(0, b"hello ").unwrap();
        writer.write_at(6, b"world").unwrap();
        assert_eq!(writer.temp_path(), tp.as_path());
        writer.sync().unwrap();
        writer.finalize(&final_path).unwrap();

        assert!(!tp.exists());
        assert_eq!(std::fs::read(&final_path).unwrap(), b"hello world");
    }

    #[test]
    fn create_truncates_stale_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let tp = dir.path().join("x.part");
        std::fs::write(&tp, b"stale leftover bytes").unwrap();

        let writer = StorageWriter::create(&tp).unwrap();
        writer.write_at(0, b"new").unwrap();
        let final_p = dir.path().join("x");
        writer.finalize(&final_p).unwrap();
        assert_eq!(std::fs::read(&final_p).unwrap(), b"new");
    }
}
