use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::{fs, io};

use regex::Regex;

use crate::decompress::decompress_files;
use crate::BootstrapArgs;

const CFG_FILE_NAME: &str = "folio.toml";

fn get_sample_cfg() -> &'static str {
    include_str!("../../../folio.toml")
}

fn write_folio_cfg(out_dir: &Path) -> io::Result<()> {
    let file = File::create(out_dir.join(CFG_FILE_NAME))?;
    let mut writer = BufWriter::new(file);

    let sample_cfg = replace_paths(out_dir, get_sample_cfg());
    writer.write_all(sample_cfg.as_bytes())?;

    writer.flush()
}

/// Points `res/<dir>` entries of the sample configuration at `prefix/<dir>`.
fn replace_paths(prefix: &Path, config_data: &str) -> String {
    let prefix = prefix.to_string_lossy();
    let prefix = prefix.trim_end_matches('/');

    let res_regex = Regex::new(r#""res/(\w+)""#).unwrap();
    res_regex.replace_all(config_data, |captures: &regex::Captures| {
        format!("\"{}/{}\"", prefix, &captures[1])
    }).to_string()
}

pub fn bootstrap_cmd(args: BootstrapArgs) {
    let out_path = match fs::canonicalize(&args.out_dir) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error converting path to absolute: {} - {}", &args.out_dir, e);
            return;
        }
    };

    if !out_path.is_dir() {
        eprintln!("Output path must be a directory: {}", out_path.display());
        return;
    }

    if let Err(e) = decompress_files(&out_path) {
        eprintln!("Error bootstrapping: {}", e);
        return;
    };

    if let Err(e) = write_folio_cfg(&out_path) {
        eprintln!("Error writing Folio configuration: {}", e);
        return;
    }

    println!("Site created in {}. Set sanity.project_id in {} before starting folio",
             out_path.display(), CFG_FILE_NAME);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_sample_cfg() {
        let cfg = get_sample_cfg();
        let res = replace_paths(&PathBuf::from("/abs/path/"), cfg);
        assert!(res.contains(r##"template_dir = "/abs/path/template""##));
        assert!(res.contains(r##"public_dir = "/abs/path/public""##));
        assert!(res.contains("[sanity]"));
    }

    #[test]
    fn test_sample_cfg_parses() {
        let res = replace_paths(&PathBuf::from("/srv/folio"), get_sample_cfg());
        let cfg = folio::config::parse_config(&res).unwrap();
        assert_eq!(cfg.defaults.post_page_size, 4);
        assert_eq!(cfg.defaults.project_page_size, 6);
        assert_eq!(cfg.paths.public_dir, PathBuf::from("/srv/folio/public"));
    }
}
