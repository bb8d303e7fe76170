use serde_json::{json, Value};

pub fn log_info(component: &str, event: &str, details: Value) {
    eprintln!(
        "{}",
        log_line(component, "info", event, details, &chrono::Utc::now().to_rfc3339())
    );
}

pub fn log_error(component: &str, event: &str, details: Value) {
    eprintln!(
        "{}",
        log_line(component, "error", event, details, &chrono::Utc::now().to_rfc3339())
    );
}

pub fn log_line(
    component: &str,
    level: &str,
    event: &str,
    details: Value,
    timestamp: &str,
) -> Value {
    json!({
        "component": component,
        "level": level,
        "event": event,
        "timestamp": timestamp,
        "details": details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_line_carries_component_and_details() {
        let line = log_line(
            "get_vendor",
            "error",
            "vendor_not_found",
            json!({"vendor_id": "missing"}),
            "2026-02-14T00:00:00+00:00",
        );

        assert_eq!(line["component"], "get_vendor");
        assert_eq!(line["level"], "error");
        assert_eq!(line["event"], "vendor_not_found");
        assert_eq!(line["details"]["vendor_id"], "missing");
        assert_eq!(line["timestamp"], "2026-02-14T00:00:00+00:00");
    }
}
