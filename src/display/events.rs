//! Redistribution event display formatting

use crate::models::RedistributionEvent;

/// Format redistribution events, oldest first
pub fn format_event_list(events: &[RedistributionEvent]) -> String {
    if events.is_empty() {
        return "No redistribution events found.\n".to_string();
    }

    let mut output = String::new();
    for event in events {
        output.push_str(&event.summary());
        output.push('\n');
    }
    output
}
