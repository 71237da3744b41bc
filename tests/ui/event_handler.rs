use std::time::Duration;
use swipetodo::ui::core::{EventHandler, EventType};

#[tokio::test]
async fn test_should_render_after_one_tick() {
    let mut handler = EventHandler::new(Duration::from_millis(50));
    assert!(!handler.should_render());

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(handler.should_render());

    handler.mark_rendered();
    assert!(!handler.should_render());
    assert!(handler.time_since_last_render() < Duration::from_millis(50));
}

#[test]
fn test_event_type_is_cloneable() {
    let event = EventType::Resize(80, 24);
    assert!(matches!(event.clone(), EventType::Resize(80, 24)));
}
