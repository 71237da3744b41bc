use swipetodo::constants::STATUS_HINTS;
use swipetodo::logger::Logger;
use swipetodo::ui::components::StatusBar;

fn plain(logger: &Logger) -> String {
    StatusBar::text(logger)
        .spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

#[test]
fn test_hints_only_without_events() {
    let logger = Logger::new();
    assert_eq!(plain(&logger), STATUS_HINTS);
}

#[test]
fn test_latest_event_follows_hints() {
    let logger = Logger::new();
    logger.log("Removed task: first".to_string());
    logger.log("Toggled task: second (true)".to_string());

    let text = plain(&logger);
    assert!(text.starts_with(STATUS_HINTS));
    assert!(text.ends_with("Toggled task: second (true)"));
    assert!(!text.contains("Removed task"));
}
