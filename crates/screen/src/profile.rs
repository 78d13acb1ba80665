//! Signed-in user shown in the side menu.

use questboard_config::UserSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub display_name: String,
    pub email: String,
}

impl UserProfile {
    pub fn from_settings(settings: &UserSettings) -> Self {
        let display_name = if settings.display_name.trim().is_empty() {
            "User".to_string()
        } else {
            settings.display_name.clone()
        };
        Self {
            display_name,
            email: settings.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_falls_back() {
        let settings = UserSettings {
            display_name: "  ".into(),
            email: "hero@example.com".into(),
        };
        let profile = UserProfile::from_settings(&settings);
        assert_eq!(profile.display_name, "User");
        assert_eq!(profile.email, "hero@example.com");
    }
}
