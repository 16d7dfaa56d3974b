//! The configuration for the sandbox, given from environment variables and lazy
//! initialized when needed.

use std::path::{Path, PathBuf};
use std::env;

use once_cell::race::OnceBool;
use once_cell::sync::OnceCell;


/// Default session file used by save and load commands when no path is given.
///
/// To change it, set `STACKPACK_SAVE=<path>`, defaults to `stackpack.dat`.
pub fn save_path() -> &'static Path {
    static ENV: OnceCell<PathBuf> = OnceCell::new();
    ENV.get_or_init(|| {
        env::var_os("STACKPACK_SAVE")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("stackpack.dat"))
    })
}

/// Return true if the player should receive a packer and some items on startup.
///
/// To enable this feature, set `STACKPACK_STARTER_KIT=1`.
pub fn starter_kit() -> bool {
    static ENV: OnceBool = OnceBool::new();
    ENV.get_or_init(|| {
        env::var_os("STACKPACK_STARTER_KIT")
            .map(|s| s.as_encoded_bytes() == b"1")
            .unwrap_or(false)
    })
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn save_path_not_empty() {
        assert!(!save_path().as_os_str().is_empty());
        assert_eq!(save_path(), save_path());
    }

}
