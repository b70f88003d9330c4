// File: ./src/logging.rs
// Logger setup for the host process. Safe to call more than once.
use log::LevelFilter;

#[cfg(target_os = "android")]
pub fn init(level: LevelFilter) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(level)
            .with_tag("MincalRust"),
    );
}

#[cfg(not(target_os = "android"))]
pub fn init(level: LevelFilter) {
    // Fails only if a logger is already installed, which is fine.
    let _ = simplelog::SimpleLogger::init(level, simplelog::Config::default());
}
