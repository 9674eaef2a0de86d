use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Set the log level for the host application
pub fn set_log_level(level: LevelFilter) {
    // The global logger may already be installed; the max level still applies
    let _ = SimpleLogger::new().with_level(level).init();
    log::set_max_level(level);
}

/// Initialize logging with the specified level
pub fn init_logging(debug: bool) -> LevelFilter {
    let log_level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    set_log_level(log_level);
    log_level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        assert_eq!(init_logging(true), LevelFilter::Debug);
        assert_eq!(init_logging(false), LevelFilter::Info);
        assert_eq!(log::max_level(), LevelFilter::Info);
    }
}
