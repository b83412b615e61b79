use log::{Level, Log, Record};
use matterlist::config::LoggingConfig;
use matterlist::constants::LOG_BUFFER_CAPACITY;
use matterlist::logger::Logger;

fn logging(level: &str) -> LoggingConfig {
    LoggingConfig {
        enabled: false,
        level: level.to_string(),
    }
}

/// Build the dispatch without installing it globally.
fn backend(logger: &Logger) -> Box<dyn Log> {
    let (_, log) = logger.dispatch().unwrap().into_log();
    log
}

fn emit(log: &dyn Log, level: Level, message: &str) {
    log.log(
        &Record::builder()
            .args(format_args!("{}", message))
            .level(level)
            .target("matterlist::test")
            .build(),
    );
}

#[test]
fn test_config_based_logging_disabled() {
    let logger = Logger::from_config(&logging("info")).unwrap();
    assert!(!logger.is_file_enabled());
    assert!(logger.file_path().is_none());

    let log = backend(&logger);
    emit(log.as_ref(), Level::Info, "Test message");

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].contains("Test message"));
    assert!(logs[0].contains("INFO"));
    assert!(logs[0].contains("matterlist::test"));
}

#[test]
fn test_level_filter_applies() {
    let logger = Logger::from_config(&logging("warn")).unwrap();
    let log = backend(&logger);

    emit(log.as_ref(), Level::Debug, "hidden");
    emit(log.as_ref(), Level::Error, "shown");

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].contains("shown"));
}

#[test]
fn test_logs_are_newest_first_and_bounded() {
    let logger = Logger::from_config(&logging("trace")).unwrap();
    let log = backend(&logger);

    for i in 0..LOG_BUFFER_CAPACITY + 5 {
        emit(log.as_ref(), Level::Info, &format!("line {}", i));
    }

    let logs = logger.get_logs();
    assert_eq!(logs.len(), LOG_BUFFER_CAPACITY);
    assert!(logs[0].ends_with(&format!("line {}", LOG_BUFFER_CAPACITY + 4)));
    assert!(logs.last().unwrap().ends_with("line 5"));

    logger.clear();
    assert!(logger.get_logs().is_empty());
}

#[test]
fn test_invalid_level_is_rejected() {
    assert!(Logger::from_config(&logging("chatty")).is_err());
}

#[test]
fn test_log_file_path() {
    if let Ok(path) = Logger::get_log_file_path() {
        assert!(path.ends_with("matterlist/matterlist.log"));
    }
}
