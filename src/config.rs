//! Runtime settings from environment variables (a `.env` file is honored by the binaries).

use crate::error::ConfigError;
use crate::model::NewCourse;
use regex::Regex;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/course_registry";
pub const DEFAULT_SCHEMA: &str = "registry";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    /// Schema holding the `courses` and `enrollments` tables. Must be a PostgreSQL identifier.
    pub schema: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Optional JSON array of courses inserted into the catalog at startup.
    pub courses_path: Option<PathBuf>,
    pub body_limit: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset and blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let schema = get("REGISTRY_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        validate_identifier("REGISTRY_SCHEMA", &schema)?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            get("DB_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        let body_limit =
            parse_or("REQUEST_BODY_LIMIT", get("REQUEST_BODY_LIMIT"), DEFAULT_BODY_LIMIT)?;

        Ok(Settings {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            schema,
            bind_addr,
            max_connections,
            courses_path: get("COURSES_PATH").map(PathBuf::from),
            body_limit,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

fn validate_identifier(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })?;
    if value.len() > 63 || !re.is_match(value) {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("'{}' is not a valid PostgreSQL identifier", value),
        });
    }
    Ok(())
}

/// Read a catalog seed file: a JSON array of `{"name": ..., "description": ...}`.
pub async fn load_courses(path: &std::path::Path) -> Result<Vec<NewCourse>, ConfigError> {
    let seed_err = |reason: String| ConfigError::Seed {
        path: path.display().to_string(),
        reason,
    };
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| seed_err(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| seed_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.schema, "registry");
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.body_limit, 64 * 1024);
        assert!(s.courses_path.is_none());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let s = settings(&[("REGISTRY_SCHEMA", "  "), ("COURSES_PATH", "")]).unwrap();
        assert_eq!(s.schema, DEFAULT_SCHEMA);
        assert!(s.courses_path.is_none());
    }

    #[test]
    fn overrides_are_read() {
        let s = settings(&[
            ("REGISTRY_SCHEMA", "campus_2026"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("COURSES_PATH", "seed/courses.json"),
        ])
        .unwrap();
        assert_eq!(s.schema, "campus_2026");
        assert_eq!(s.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(s.max_connections, 12);
        assert_eq!(s.courses_path, Some(PathBuf::from("seed/courses.json")));
    }

    #[test]
    fn schema_must_be_an_identifier() {
        for bad in ["1abc", "a-b", "x; DROP TABLE y", "\"q\""] {
            let err = settings(&[("REGISTRY_SCHEMA", bad)]).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: "REGISTRY_SCHEMA", .. }), "{bad}");
        }
    }

    #[test]
    fn bad_numbers_are_reported() {
        let err = settings(&[("DB_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid DB_MAX_CONNECTIONS"));
    }

    #[tokio::test]
    async fn missing_seed_file_is_a_seed_error() {
        let err = load_courses(std::path::Path::new("/nonexistent/courses.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Seed { .. }));
    }
}
