use serde::{Deserialize, Serialize};

/// Icons a link tile can carry. Editors store the icon as a free-form name;
/// anything unrecognised renders as the generic external-link glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkIcon {
    Portfolio,
    Youtube,
    #[default]
    Link,
    Shop,
}

impl LinkIcon {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "portfolio" => LinkIcon::Portfolio,
            "youtube" => LinkIcon::Youtube,
            "shop" => LinkIcon::Shop,
            _ => LinkIcon::Link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        assert_eq!(LinkIcon::from_name("portfolio"), LinkIcon::Portfolio);
        assert_eq!(LinkIcon::from_name("YouTube"), LinkIcon::Youtube);
        assert_eq!(LinkIcon::from_name(" shop "), LinkIcon::Shop);
    }

    #[test]
    fn test_unknown_names_fall_back_to_link() {
        assert_eq!(LinkIcon::from_name(""), LinkIcon::Link);
        assert_eq!(LinkIcon::from_name("tiktok"), LinkIcon::Link);
    }
}
