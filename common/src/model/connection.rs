use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default ClickHouse HTTP port pre-filled in the connection form.
pub const DEFAULT_PORT: u16 = 8123;

/// Connection parameters for the analytical database.
///
/// Created when the connection form is submitted and adopted into the wizard only
/// after the backend reports a successful connection test. Serialized in camelCase
/// because that is the shape the ingestion backend binds its request bodies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            database: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl ConnectionConfig {
    /// Checks that every required field is populated.
    ///
    /// The password is optional; ClickHouse accepts passwordless users.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.trim().is_empty() {
            return Err(ValidationError::MissingField("Host"));
        }
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.database.trim().is_empty() {
            return Err(ValidationError::MissingField("Database"));
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("Username"));
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Returns a copy with surrounding whitespace removed from the text fields.
    /// The password is left untouched.
    pub fn normalized(&self) -> Self {
        Self {
            host: self.host.trim().to_string(),
            port: self.port,
            database: self.database.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

/// Parses the raw value of the port input.
pub fn parse_port(input: &str) -> Result<u16, ValidationError> {
    match input.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ValidationError::InvalidPort),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> ConnectionConfig {
        ConnectionConfig {
            host: "db1".to_string(),
            port: 8123,
            database: "analytics".to_string(),
            username: "u".to_string(),
            password: String::new(),
        }
    }

    #[test]
    fn password_is_optional() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn each_required_field_is_reported() {
        let mut c = config();
        c.host = "  ".to_string();
        assert_eq!(c.validate(), Err(ValidationError::MissingField("Host")));

        let mut c = config();
        c.port = 0;
        assert_eq!(c.validate(), Err(ValidationError::InvalidPort));

        let mut c = config();
        c.database.clear();
        assert_eq!(c.validate(), Err(ValidationError::MissingField("Database")));

        let mut c = config();
        c.username.clear();
        assert_eq!(c.validate(), Err(ValidationError::MissingField("Username")));
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_value(config()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "host": "db1",
                "port": 8123,
                "database": "analytics",
                "username": "u",
                "password": ""
            })
        );
    }

    #[test]
    fn missing_password_deserializes_as_empty() {
        let c: ConnectionConfig = serde_json::from_str(
            r#"{"host":"h","port":9000,"database":"d","username":"u"}"#,
        )
        .unwrap();
        assert_eq!(c.password, "");
        assert_eq!(c.port, 9000);
    }

    #[test]
    fn port_input_must_be_positive() {
        assert_eq!(parse_port(" 8123 "), Ok(8123));
        assert_eq!(parse_port("0"), Err(ValidationError::InvalidPort));
        assert_eq!(parse_port("abc"), Err(ValidationError::InvalidPort));
        assert_eq!(parse_port("70000"), Err(ValidationError::InvalidPort));
    }
}
