//! The expressed-attribute selection.

use crate::config::VizConfig;

/// Which attribute currently drives colors, bar heights and labels.
///
/// Always one of the configured attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    expressed: String,
}

impl Selection {
    pub fn new(config: &VizConfig) -> Self {
        Self {
            expressed: config.initial_attribute.clone(),
        }
    }

    pub fn expressed(&self) -> &str {
        &self.expressed
    }

    /// Switch to `attribute`. Returns whether the selection changed; an
    /// unknown attribute is an error and leaves the selection as it was.
    pub fn express(&mut self, attribute: &str, config: &VizConfig) -> anyhow::Result<bool> {
        if !config.is_attribute(attribute) {
            anyhow::bail!(
                "unknown attribute {:?}; expected one of {:?}",
                attribute,
                config.attributes
            );
        }
        if self.expressed == attribute {
            return Ok(false);
        }
        self.expressed = attribute.to_string();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_initial_attribute() {
        let config = VizConfig::default();
        assert_eq!(Selection::new(&config).expressed(), "2010");
    }

    #[test]
    fn express_known_attribute() {
        let config = VizConfig::default();
        let mut selection = Selection::new(&config);
        assert!(selection.express("2013", &config).unwrap());
        assert_eq!(selection.expressed(), "2013");
        assert!(!selection.express("2013", &config).unwrap());
    }

    #[test]
    fn unknown_attribute_is_rejected_without_change() {
        let config = VizConfig::default();
        let mut selection = Selection::new(&config);
        assert!(selection.express("Select Attribute", &config).is_err());
        assert_eq!(selection.expressed(), "2010");
    }
}
