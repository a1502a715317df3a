//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in
/// the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [reporting] section
    if let Some(section) = ini.section(Some("reporting")) {
        if let Some(v) = section.get("interval_ms") {
            config.reporting.interval_ms = parse_positive(v, "reporting", "interval_ms")?;
        }
        if let Some(v) = section.get("min_interval_ms") {
            config.reporting.min_interval_ms = parse_positive(v, "reporting", "min_interval_ms")?;
        }
        if let Some(v) = section.get("max_delay_ms") {
            config.reporting.max_delay_ms = parse_positive(v, "reporting", "max_delay_ms")?;
        }
        if let Some(v) = section.get("high_accuracy") {
            config.reporting.high_accuracy = parse_bool(v, "reporting", "high_accuracy")?;
        }
        if let Some(v) = section.get("resume_on_start") {
            config.reporting.resume_on_start = parse_bool(v, "reporting", "resume_on_start")?;
        }
    }

    // [connection] section
    if let Some(section) = ini.section(Some("connection")) {
        if let Some(v) = section.get("host") {
            let v = v.trim();
            if !v.is_empty() {
                config.connection.host = v.to_string();
            }
        }
        if let Some(v) = section.get("port") {
            config.connection.port = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "connection".to_string(),
                key: "port".to_string(),
                value: v.to_string(),
                reason: "must be a port number in 1..=65535".to_string(),
            })?;
        }
        if let Some(v) = section.get("connect_timeout_secs") {
            config.connection.connect_timeout_secs =
                parse_positive(v, "connection", "connect_timeout_secs")?;
        }
        if let Some(v) = section.get("reply_timeout_secs") {
            config.connection.reply_timeout_secs =
                parse_positive(v, "connection", "reply_timeout_secs")?;
        }
    }

    // [delivery] section
    if let Some(section) = ini.section(Some("delivery")) {
        if let Some(v) = section.get("max_in_flight") {
            let n: u64 = parse_positive(v, "delivery", "max_in_flight")?;
            config.delivery.max_in_flight = n as usize;
        }
        if let Some(v) = section.get("stop_grace_secs") {
            config.delivery.stop_grace_secs = parse_positive(v, "delivery", "stop_grace_secs")?;
        }
    }

    // [state] section
    if let Some(section) = ini.section(Some("state")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.state.directory = Some(PathBuf::from(v));
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = Some(PathBuf::from(v));
            }
        }
    }

    Ok(config)
}

fn parse_positive(value: &str, section: &str, key: &str) -> Result<u64, ConfigFileError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a positive integer".to_string(),
        }),
    }
}

fn parse_bool(value: &str, section: &str, key: &str) -> Result<bool, ConfigFileError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be 'true' or 'false'".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_yields_defaults() {
        let config = load("").unwrap();
        assert_eq!(config.reporting.interval_ms, 10_000);
        assert_eq!(config.connection.port, 12345);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = load("[reporting]\ninterval_ms = 2000\n").unwrap();
        assert_eq!(config.reporting.interval_ms, 2_000);
        assert_eq!(config.reporting.min_interval_ms, 5_000);
    }

    #[test]
    fn test_full_parse() {
        let config = load(
            "[reporting]\n\
             interval_ms = 1000\n\
             min_interval_ms = 500\n\
             high_accuracy = false\n\
             resume_on_start = yes\n\
             [connection]\n\
             host = tracker.example.org\n\
             port = 9000\n\
             [delivery]\n\
             max_in_flight = 2\n\
             stop_grace_secs = 3\n\
             [state]\n\
             directory = /var/lib/geobeacon\n",
        )
        .unwrap();

        assert_eq!(config.reporting.interval_ms, 1_000);
        assert!(!config.reporting.high_accuracy);
        assert!(config.reporting.resume_on_start);
        assert_eq!(config.connection.host, "tracker.example.org");
        assert_eq!(config.connection.port, 9000);
        assert_eq!(config.delivery.max_in_flight, 2);
        assert_eq!(
            config.state.directory.as_deref(),
            Some(std::path::Path::new("/var/lib/geobeacon"))
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = load("[reporting]\ninterval_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { .. }));
        assert!(err.to_string().contains("interval_ms"));
    }

    #[test]
    fn test_garbage_port_rejected() {
        let err = load("[connection]\nport = lots\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { .. }));
    }

    #[test]
    fn test_garbage_bool_rejected() {
        let err = load("[reporting]\nhigh_accuracy = maybe\n").unwrap_err();
        assert!(err.to_string().contains("high_accuracy"));
    }

    #[test]
    fn test_blank_host_keeps_default() {
        let config = load("[connection]\nhost =   \n").unwrap();
        assert_eq!(config.connection.host, "127.0.0.1");
    }
}
