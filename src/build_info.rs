//! Version, commit and build date baked in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for `lootbox --version`.
pub fn version_line() -> String {
    format!("lootbox {} ({} {})", BUILD_VERSION, BUILD_DATE, BUILD_COMMIT)
}
