//! Model capabilities resolved once at startup

/// Product name fragments of appliances without a dedicated WAN port.
/// On these models ethernet port 0 serves LAN clients.
pub const DEFAULT_MODELS_WITHOUT_WAN: &[&str] =
    &["CBA", "W18", "W200", "W400", "L950", "IBR200", "4250"];

/// Immutable facts about the appliance the agent runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    model: String,
    has_dedicated_wan_port: bool,
}

impl DeviceProfile {
    /// Classify `model` against a list of WAN-less product name fragments
    pub fn resolve<S: AsRef<str>>(model: impl Into<String>, models_without_wan: &[S]) -> Self {
        let model = model.into();
        let wanless = models_without_wan
            .iter()
            .any(|fragment| model.contains(fragment.as_ref()));

        Self {
            model,
            has_dedicated_wan_port: !wanless,
        }
    }

    pub fn new(model: impl Into<String>, has_dedicated_wan_port: bool) -> Self {
        Self {
            model: model.into(),
            has_dedicated_wan_port,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_dedicated_wan_port(&self) -> bool {
        self.has_dedicated_wan_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wanless_models_match_by_fragment() {
        let profile = DeviceProfile::resolve("IBR200-10M", DEFAULT_MODELS_WITHOUT_WAN);
        assert!(!profile.has_dedicated_wan_port());
        assert_eq!(profile.model(), "IBR200-10M");

        let profile = DeviceProfile::resolve("E300-C18B", DEFAULT_MODELS_WITHOUT_WAN);
        assert!(profile.has_dedicated_wan_port());
    }

    #[test]
    fn custom_model_list_replaces_defaults() {
        let custom = vec!["E300".to_string()];
        assert!(!DeviceProfile::resolve("E300-C18B", &custom).has_dedicated_wan_port());
        assert!(DeviceProfile::resolve("IBR200", &custom).has_dedicated_wan_port());
    }

    #[test]
    fn empty_list_means_every_model_has_wan() {
        let none: [&str; 0] = [];
        assert!(DeviceProfile::resolve("W1850", &none).has_dedicated_wan_port());
    }
}
