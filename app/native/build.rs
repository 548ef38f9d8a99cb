fn main() {
    // The Tauri shell only exists on macOS; other targets build the
    // platform-neutral core so it can be tested anywhere.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("macos") {
        tauri_build::build();
    }
}
