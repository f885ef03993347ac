use chrono::{DateTime, Utc};

/// Format a timestamp as a human-readable relative time string.
pub fn relative_time(dt: &DateTime<Utc>) -> String {
    relative_time_from(dt, Utc::now())
}

pub fn relative_time_from(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(dt);

    let seconds = duration.num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = duration.num_minutes();
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = duration.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    let days = duration.num_days();
    if days < 30 {
        return format!("{}d ago", days);
    }

    if days < 365 {
        let months = days / 30;
        return format!("{}mo ago", months);
    }

    let years = days / 365;
    format!("{}y ago", years)
}

/// Relative time for an RFC 3339 string, or "recently" if it won't parse.
pub fn relative_time_str(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => relative_time(&dt.with_timezone(&Utc)),
        Err(_) => "recently".to_string(),
    }
}
