use env_logger;

/// Initialize the logger with the specified verbosity level
///
/// # Arguments
/// * `verbose` - Verbosity level (0=warn, 1=info, 2=debug, 3+=trace)
pub fn setup_logger(verbose: u8) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter_for(verbose)))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

fn filter_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "osdetector=warn",
        1 => "osdetector=info",
        2 => "osdetector=debug",
        _ => "osdetector=trace",
    }
}
