//! Access log format module
//!
//! Supports:
//! - `combined` (Apache/Nginx combined format, the default)
//! - `common` (Common Log Format)
//! - `json` (JSON Lines)

use chrono::Local;

/// One completed request, ready for the access log
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    pub path: String,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: &'static str,
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: u64,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Format the entry; unknown format names fall back to `combined`
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.path, self.http_version)
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes "$referer" "$user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {} \"{}\" \"{}\"",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_entry() -> AccessLogEntry {
        AccessLogEntry {
            remote_addr: "192.0.2.7".to_string(),
            time: Local::now(),
            method: "GET".to_string(),
            path: "/packages/junos-21.4.img".to_string(),
            http_version: "1.1",
            status: 200,
            body_bytes: 10_485_760,
            referer: None,
            user_agent: Some("curl/8.5".to_string()),
            request_time_us: 2500,
        }
    }

    #[test]
    fn test_format_combined() {
        let log = test_entry().format("combined");
        assert!(log.starts_with("192.0.2.7 - - ["));
        assert!(log.contains("\"GET /packages/junos-21.4.img HTTP/1.1\""));
        assert!(log.contains(" 200 10485760 "));
        assert!(log.contains("\"-\" \"curl/8.5\""));
    }

    #[test]
    fn test_format_common_omits_agent() {
        let log = test_entry().format("common");
        assert!(log.contains(" 200 10485760"));
        assert!(!log.contains("curl/8.5"));
    }

    #[test]
    fn test_format_json_is_parseable() {
        let log = test_entry().format("json");
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["status"], 200);
        assert_eq!(value["body_bytes"], 10_485_760);
        assert_eq!(value["referer"], serde_json::Value::Null);
    }

    #[test]
    fn test_unknown_format_falls_back_to_combined() {
        let log = test_entry().format("fancy");
        assert!(log.contains("\"GET /packages/junos-21.4.img HTTP/1.1\""));
    }
}
