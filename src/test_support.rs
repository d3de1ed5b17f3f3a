use std::sync::OnceLock;

use tempfile::TempDir;

// Exits 3 for inputs whose path contains "broken"; otherwise writes the profile name to the output.
const FAKE_ENCODER: &str = r#"#!/bin/sh
[ "$1" = "-i" ] && [ "$3" = "-o" ] && [ "$5" = "-Z" ] || { echo "bad arguments: $*" >&2; exit 64; }
case "$2" in
  *broken*) echo "cannot decode $2" >&2; exit 3 ;;
esac
printf '%s\n' "$6" > "$4"
"#;

static FAKE_ENCODER_DIR: OnceLock<TempDir> = OnceLock::new();

/// Path to a stand-in encoder script, written once per test binary.
///
/// The script is finished and closed before any caller gets the path, so no test can
/// exec it while a write handle is still open.
pub fn fake_encoder() -> String {
    let dir = FAKE_ENCODER_DIR.get_or_init(|| {
        let dir = TempDir::new().expect("create fake encoder dir");
        let script = dir.path().join("fake-encoder");
        std::fs::write(&script, FAKE_ENCODER).expect("write fake encoder");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
                .expect("chmod fake encoder");
        }
        dir
    });
    dir.path().join("fake-encoder").display().to_string()
}
