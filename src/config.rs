pub const APP_ID: &str = "com.rihla.Rihla";
pub const APP_NAME: &str = "Rihla";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Loopback fallback used when no backend address is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const BASE_URL_ENV: &str = "RIHLA_API_URL";
const USER_ID_ENV: &str = "RIHLA_USER_ID";
const DEFAULT_USER_ID: i64 = 1;

/// Base address of the travel backend, read once at startup.
pub fn backend_base_url() -> String {
    base_url_from(std::env::var(BASE_URL_ENV).ok().as_deref())
}

/// Identity sent with chat and recommendation requests. There is no
/// sign-in flow; the id defaults to the demo user.
pub fn user_id() -> i64 {
    user_id_from(std::env::var(USER_ID_ENV).ok().as_deref())
}

fn base_url_from(configured: Option<&str>) -> String {
    match configured {
        Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

fn user_id_from(configured: Option<&str>) -> i64 {
    match configured {
        Some(raw) => match raw.trim().parse() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!("ignoring invalid {USER_ID_ENV}={raw:?}");
                DEFAULT_USER_ID
            }
        },
        None => DEFAULT_USER_ID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_fallback() {
        assert_eq!(base_url_from(None), DEFAULT_BASE_URL);
        assert_eq!(base_url_from(Some("")), DEFAULT_BASE_URL);
        assert_eq!(base_url_from(Some("   ")), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        assert_eq!(
            base_url_from(Some("http://10.0.0.5:8000/")),
            "http://10.0.0.5:8000"
        );
    }

    #[test]
    fn test_user_id_parsing() {
        assert_eq!(user_id_from(None), DEFAULT_USER_ID);
        assert_eq!(user_id_from(Some("42")), 42);
        assert_eq!(user_id_from(Some("not a number")), DEFAULT_USER_ID);
    }
}
