//! Configuration validation utilities

use crate::schema::Config;

/// Top-level routes served by the API that a docs mount must not shadow
pub const RESERVED_PATHS: [&str; 2] = ["/accounts", "/healthz"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_server(config, &mut report);
        Self::validate_logging(config, &mut report);
        Self::validate_api(config, &mut report);
        Self::validate_docs(config, &mut report);

        report
    }

    fn validate_server(config: &Config, report: &mut ValidationReport) {
        if config.server.port == 0 {
            report.add_error("server.port", "Server port cannot be 0");
        } else if config.server.port < 1024 {
            report.add_warning("server.port", "Server port is below 1024, may require elevated privileges");
        }

        if config.server.request_timeout_seconds == 0 {
            report.add_error("server.request_timeout_seconds", "Request timeout cannot be 0");
        } else if config.server.request_timeout_seconds > 300 {
            report.add_warning("server.request_timeout_seconds", "Request timeout is very high");
        }

        if config.server.max_body_size == 0 {
            report.add_error("server.max_body_size", "Max body size cannot be 0");
        } else if config.server.max_body_size > 10 * 1024 * 1024 {
            report.add_warning("server.max_body_size", "Max body size is greater than 10MB");
        }

        if config.server.host.is_empty() {
            report.add_error("server.host", "Server host cannot be empty");
        } else if config.server.bind_address().parse::<std::net::SocketAddr>().is_err() {
            report.add_error(
                "server.host",
                &format!("Invalid server address: {}", config.server.bind_address()),
            );
        }
    }

    fn validate_logging(config: &Config, report: &mut ValidationReport) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            report.add_error("logging.level", &format!("Invalid log level: {}. Valid levels: {:?}", config.logging.level, valid_levels));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&config.logging.format.as_str()) {
            report.add_error("logging.format", &format!("Invalid log format: {}. Valid formats: {:?}", config.logging.format, valid_formats));
        }

        if config.logging.level == "trace" || config.logging.level == "debug" {
            report.add_warning("logging.level", "Debug/trace logging may impact performance in production");
        }
    }

    fn validate_api(config: &Config, report: &mut ValidationReport) {
        if config.api.lenient_decoding {
            report.add_warning(
                "api.lenient_decoding",
                "Malformed create requests will store an empty account instead of failing with 400",
            );
        }
    }

    fn validate_docs(config: &Config, report: &mut ValidationReport) {
        if !config.docs.enabled {
            return;
        }

        let prefix = &config.docs.path_prefix;
        if !prefix.starts_with('/') || prefix.ends_with('/') {
            report.add_error("docs.path_prefix", "Docs prefix must start with '/', cannot end with '/' and cannot be the root path");
        } else if prefix.contains(':') || prefix.contains('*') {
            report.add_error("docs.path_prefix", "Docs prefix cannot contain path parameters or wildcards");
        } else if RESERVED_PATHS
            .iter()
            .any(|reserved| prefix == reserved || prefix.starts_with(&format!("{}/", reserved)))
        {
            report.add_error(
                "docs.path_prefix",
                &format!("Docs prefix {} overlaps a built-in route {:?}", prefix, RESERVED_PATHS),
            );
        }

        if config.docs.directory.is_empty() {
            report.add_error("docs.directory", "Docs directory cannot be empty");
        } else if !std::path::Path::new(&config.docs.directory).is_dir() {
            report.add_warning(
                "docs.directory",
                &format!("Docs directory does not exist: {}", config.docs.directory),
            );
        }
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let report = ConfigValidator::validate(&Config::default());
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_server_errors() {
        let mut config = Config::default();
        config.server.port = 0;
        config.server.max_body_size = 0;
        config.server.host = "not a host".to_string();

        let report = ConfigValidator::validate(&config);
        let fields: Vec<_> = report.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"server.port"));
        assert!(fields.contains(&"server.max_body_size"));
        assert!(fields.contains(&"server.host"));
    }

    #[test]
    fn test_logging_errors_and_warnings() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        let report = ConfigValidator::validate(&config);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "logging.format");

        let mut config = Config::default();
        config.logging.level = "debug".to_string();
        let report = ConfigValidator::validate(&config);
        assert!(report.is_valid());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_lenient_decoding_warns() {
        let mut config = Config::default();
        config.api.lenient_decoding = true;

        let report = ConfigValidator::validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].field, "api.lenient_decoding");
    }

    #[test]
    fn test_docs_prefix_cannot_shadow_api() {
        let mut config = Config::default();
        config.docs.enabled = true;
        config.docs.path_prefix = "/accounts".to_string();

        let report = ConfigValidator::validate(&config);
        assert!(report.errors.iter().any(|e| e.field == "docs.path_prefix"));
    }

    #[test]
    fn test_docs_prefix_rejects_route_conflicts() {
        for prefix in ["/", "/swagger/", "/healthz", "/healthz/ui", "/accounts/docs", "/docs/:page", "/docs/*rest"] {
            let mut config = Config::default();
            config.docs.enabled = true;
            config.docs.path_prefix = prefix.to_string();

            let report = ConfigValidator::validate(&config);
            assert!(
                report.errors.iter().any(|e| e.field == "docs.path_prefix"),
                "prefix {} should be rejected",
                prefix
            );
        }
    }

    #[test]
    fn test_docs_prefix_accepts_distinct_path() {
        let mut config = Config::default();
        config.docs.enabled = true;
        config.docs.path_prefix = "/healthz-docs".to_string();

        let report = ConfigValidator::validate(&config);
        assert!(report.is_valid(), "{:?}", report.errors);
    }

    #[test]
    fn test_disabled_docs_are_not_checked() {
        let mut config = Config::default();
        config.docs.path_prefix = String::new();
        config.docs.directory = String::new();

        assert!(ConfigValidator::validate(&config).is_valid());
    }
}
