// Passgen platform paths for Windows
// Config: %APPDATA%\Passgen
// Data:   %APPDATA%\Passgen

use std::env;
use std::path::PathBuf;

fn app_data_dir() -> PathBuf {
    let appdata = env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Temp"));
    PathBuf::from(appdata).join("Passgen")
}

pub fn get_config_dir() -> PathBuf {
    app_data_dir()
}

pub fn get_data_dir() -> PathBuf {
    app_data_dir()
}
