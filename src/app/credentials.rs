use super::config::Config;

/// API keys for the two providers. A missing key disables that provider.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl Credentials {
    pub fn new(primary: Option<String>, secondary: Option<String>) -> Self {
        Self {
            primary: normalize(primary),
            secondary: normalize(secondary),
        }
    }

    /// Read the keys named by the config from the environment
    pub fn from_env(config: &Config) -> Self {
        Self::new(
            std::env::var(&config.primary.api_key_env).ok(),
            std::env::var(&config.secondary.api_key_env).ok(),
        )
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn any_configured(&self) -> bool {
        self.primary.is_some() || self.secondary.is_some()
    }
}

// Never print the keys themselves
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("primary", &self.primary.as_ref().map(|_| "***"))
            .field("secondary", &self.secondary.as_ref().map(|_| "***"))
            .finish()
    }
}

fn normalize(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_keys_are_absent() {
        let creds = Credentials::new(Some("  ".to_string()), Some("hf_abc\n".to_string()));
        assert_eq!(creds.primary, None);
        assert_eq!(creds.secondary.as_deref(), Some("hf_abc"));
        assert!(creds.any_configured());
        assert!(!Credentials::none().any_configured());
    }

    #[test]
    fn test_from_env_reads_configured_variable_names() {
        let mut config = Config::default();
        config.primary.api_key_env = "CHATGATE_TEST_CREDS_PRIMARY_KEY".to_string();
        config.secondary.api_key_env = "CHATGATE_TEST_CREDS_SECONDARY_KEY".to_string();
        std::env::set_var("CHATGATE_TEST_CREDS_PRIMARY_KEY", " sk-or-live ");
        std::env::remove_var("CHATGATE_TEST_CREDS_SECONDARY_KEY");

        let creds = Credentials::from_env(&config);
        std::env::remove_var("CHATGATE_TEST_CREDS_PRIMARY_KEY");

        assert_eq!(creds.primary.as_deref(), Some("sk-or-live"));
        assert_eq!(creds.secondary, None);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let creds = Credentials::new(Some("sk-or-secret".to_string()), None);
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("sk-or-secret"));
        assert!(rendered.contains("***"));
    }
}
