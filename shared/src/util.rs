/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Abbreviated order id shown to customers: first 8 chars plus `...`
pub fn short_id(id: &str) -> String {
    let head: String = id.chars().take(8).collect();
    format!("{head}...")
}
