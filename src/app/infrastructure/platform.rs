use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, used to name exported files.
pub fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Where downloaded snapshots go: the user's download folder, else the
/// current directory.
pub fn download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_millis_is_increasing() {
        let a = epoch_millis();
        let b = epoch_millis();
        assert!(a > 1_600_000_000_000);
        assert!(b >= a);
    }

    #[test]
    fn test_download_dir_is_never_empty() {
        assert!(!download_dir().as_os_str().is_empty());
    }
}
