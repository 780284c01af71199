use std::env;
use std::path::PathBuf;

use folio::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(PathBuf::from));
    let candidates = [exe_dir, env::current_dir().ok(), dirs::config_dir()];

    candidates.into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err(format!("Could not find Folio configuration ({})", CFG_FILE_NAME)),
        Some(x) => x,
    };

    if let Ok(cur_dir) = env::current_dir() {
        println!("Current dir: {}", cur_dir.display());
    }
    println!("Reading config from {}", config_path.display());
    let mut config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Some(mut log) = config.log {
        let location = log.location
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("Folio").join("log").join("server.log")));
        match location {
            Some(ref path) => println!("Log enabled. Files will be written in {}", path.display()),
            None => println!("Log enabled. No cache dir found, logging to the console only"),
        }
        log.location = location;
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}
