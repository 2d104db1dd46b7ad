//! End-to-end behavior of the log level service, including timed reverts.

use std::thread::sleep;
use std::time::Duration;

use commons::logging::{LogLevelService, LogResponseStatus, LoggerChangeRequest, LoggerRegistry};
use tracing_subscriber::filter::LevelFilter;

const LOGGER: &str = "commons::integration::target";

fn service_with_root(root: LevelFilter) -> (LogLevelService, LoggerRegistry) {
    let registry = LoggerRegistry::new(root);
    (LogLevelService::new(registry.clone()), registry)
}

#[test]
fn will_set_log_level() {
    let (service, registry) = service_with_root(LevelFilter::INFO);
    registry.register(LOGGER);

    let response = service.set_log_level(&LoggerChangeRequest::new(LOGGER, "TRACE"));

    assert_eq!(response, LogResponseStatus::Changed);
    assert_eq!(service.get_log_level(LOGGER), LevelFilter::TRACE);
}

#[test]
fn will_get_default_log_level_for_nonexistent_logger() {
    let (service, _registry) = service_with_root(LevelFilter::ERROR);

    assert_eq!(service.get_log_level("flying::saucer"), LevelFilter::ERROR);
}

#[test]
fn will_get_inherited_log_level_from_ancestor() {
    let (service, registry) = service_with_root(LevelFilter::INFO);
    registry.set_level("commons::integration", Some(LevelFilter::DEBUG));

    assert_eq!(service.get_log_level(LOGGER), LevelFilter::DEBUG);
}

#[test]
fn will_revert_timed_request() {
    let (service, registry) = service_with_root(LevelFilter::INFO);
    registry.register(LOGGER);
    service.set_log_level(&LoggerChangeRequest::new(LOGGER, "INFO"));

    let response = service.set_log_level(&LoggerChangeRequest::timed(
        LOGGER,
        "TRACE",
        Duration::from_millis(200),
    ));

    assert_eq!(response, LogResponseStatus::TimerSuccessful);
    assert_eq!(service.get_log_level(LOGGER), LevelFilter::TRACE);

    sleep(Duration::from_millis(800));

    assert_eq!(service.get_log_level(LOGGER), LevelFilter::INFO);
}

#[test]
fn revert_restores_the_level_captured_at_call_time() {
    let (service, registry) = service_with_root(LevelFilter::INFO);
    registry.register(LOGGER);
    service.set_log_level(&LoggerChangeRequest::new(LOGGER, "INFO"));
    service.set_log_level(&LoggerChangeRequest::new(LOGGER, "DEBUG"));

    service.set_log_level(&LoggerChangeRequest::timed(
        LOGGER,
        "ERROR",
        Duration::from_millis(200),
    ));

    sleep(Duration::from_millis(800));

    // The revert restores the level from just before the timed call, not an
    // earlier one.
    assert_eq!(service.get_log_level(LOGGER), LevelFilter::DEBUG);
}

#[test]
fn revert_restores_an_inherited_level() {
    let (service, registry) = service_with_root(LevelFilter::WARN);
    registry.register(LOGGER);

    let response = service.set_log_level(&LoggerChangeRequest::timed(
        LOGGER,
        "DEBUG",
        Duration::from_millis(200),
    ));

    assert_eq!(response, LogResponseStatus::TimerSuccessful);
    assert_eq!(service.get_log_level(LOGGER), LevelFilter::DEBUG);

    sleep(Duration::from_millis(800));

    assert_eq!(registry.explicit_level(LOGGER), None);
    assert_eq!(service.get_log_level(LOGGER), LevelFilter::WARN);
}

#[test]
fn will_fail_null_logger_name_or_null_level() {
    let (service, registry) = service_with_root(LevelFilter::INFO);
    registry.register(LOGGER);

    let null_name = LoggerChangeRequest {
        logger_name: None,
        level: Some("TRACE".to_string()),
        duration: None,
    };
    assert_eq!(service.set_log_level(&null_name), LogResponseStatus::InvalidRequest);

    let null_level =
        LoggerChangeRequest { logger_name: Some(LOGGER.to_string()), level: None, duration: None };
    assert_eq!(service.set_log_level(&null_level), LogResponseStatus::InvalidRequest);

    assert_eq!(registry.explicit_level(LOGGER), None);
}

#[test]
fn will_error_on_nonexistent_logger() {
    let (service, _registry) = service_with_root(LevelFilter::INFO);

    let response =
        service.set_log_level(&LoggerChangeRequest::new("com::banana::space_invasion", "INFO"));

    assert_eq!(response, LogResponseStatus::LoggerNotFound);
}

#[test]
fn will_error_on_nonexistent_level() {
    let (service, registry) = service_with_root(LevelFilter::INFO);
    registry.register(LOGGER);

    let response = service.set_log_level(&LoggerChangeRequest::new(LOGGER, "TRIPPING"));

    assert_eq!(response, LogResponseStatus::LevelNotFound);
    assert_eq!(registry.explicit_level(LOGGER), None);
}
