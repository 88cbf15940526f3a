use serde::Deserialize;

/// Signals the backend claims to have extracted from the conversation so
/// far. Replaced wholesale with every reply; a missing field means "not
/// yet detected", not "cleared".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DetectedPreferences {
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl DetectedPreferences {
    pub fn is_empty(&self) -> bool {
        self.budget.is_none() && self.destination.is_none() && self.interests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_fields_decode() {
        let prefs: DetectedPreferences =
            serde_json::from_str(r#"{"budget":"low","interests":[],"destination":null}"#).unwrap();
        assert_eq!(prefs.budget.as_deref(), Some("low"));
        assert!(prefs.destination.is_none());
        assert!(prefs.interests.is_empty());
        assert!(!prefs.is_empty());
    }

    #[test]
    fn test_empty_object_is_empty() {
        let prefs: DetectedPreferences = serde_json::from_str("{}").unwrap();
        assert!(prefs.is_empty());
    }
}
