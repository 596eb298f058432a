use std::env;
use std::time::Duration;

/// Bookings whose date is older than this are swept away.
pub const DEFAULT_RETENTION_HOURS: i64 = 24;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60 * 60;
pub const DEFAULT_SWEEP_STARTUP_DELAY_SECS: u64 = 5;

/// Stats window: today minus 3 days through today plus 7 days (11 dates).
pub const STATS_DAYS_BACK: i64 = 3;
pub const STATS_DAYS_AHEAD: i64 = 7;

/// How many notification lines the admin feed returns.
pub const NOTIFICATIONS_PAGE_SIZE: usize = 15;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: String,
    pub public_dir: String,
    pub admin_secret: String,
    pub business_name: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub email_from: String,
    pub retention_hours: i64,
    pub sweep_interval: Duration,
    pub sweep_startup_delay: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
            admin_secret: env::var("ADMIN_SECRET").unwrap_or_else(|_| "admin123".to_string()),
            business_name: env::var("BUSINESS_NAME").unwrap_or_else(|_| "Max Barber".to_string()),
            smtp_host: env::var("EMAIL_HOST")
                .unwrap_or_else(|_| "smtp.ethereal.email".to_string()),
            smtp_port: env::var("EMAIL_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_user: env::var("EMAIL_USER")
                .unwrap_or_else(|_| "no-reply@maxbarber.com".to_string()),
            smtp_pass: env::var("EMAIL_PASS").unwrap_or_default(),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "no-reply@maxbarber.com".to_string()),
            retention_hours: env::var("RETENTION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RETENTION_HOURS),
            sweep_interval: Duration::from_secs(
                env::var("SWEEP_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
            ),
            sweep_startup_delay: Duration::from_secs(
                env::var("SWEEP_STARTUP_DELAY_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_SWEEP_STARTUP_DELAY_SECS),
            ),
        }
    }
}
