use std::io;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

const RESOURCES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/res.tar.gz"));

/// Unpacks the bundled templates and public assets into `output`.
pub fn decompress_files(output: &Path) -> io::Result<()> {
    let tar = GzDecoder::new(RESOURCES);
    let mut archive = Archive::new(tar);
    archive.unpack(output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_uncompress() {
        let out_path = env::temp_dir().join(format!("folio-bootstrap-{}", process::id()));
        fs::create_dir_all(&out_path).unwrap();

        decompress_files(&out_path).unwrap();
        assert!(out_path.join("template").join("index.tpl").exists());
        assert!(out_path.join("public").join("style.css").exists());

        fs::remove_dir_all(&out_path).unwrap();
    }
}
