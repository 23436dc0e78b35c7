use log::LevelFilter;

/// Set up `env_logger` for the binaries: warnings by default, everything
/// down to debug when `verbose`.
pub fn init_logging(verbose: bool) {
    let level = match verbose {
        true => LevelFilter::Debug,
        false => LevelFilter::Warn,
    };
    // A second call (e.g. from tests) keeps the first logger.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();
}

// Helper function to format elapsed time in hours, minutes, seconds format
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
