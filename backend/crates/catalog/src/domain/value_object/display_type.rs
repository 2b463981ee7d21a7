use serde::{Deserialize, Serialize};
use std::fmt;

/// How a storefront renders a variant attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    ColorSwatch,
    Select,
    ImageSwatch,
    TextSwatch,
}

impl DisplayType {
    pub const ALL: [DisplayType; 4] = [
        DisplayType::ColorSwatch,
        DisplayType::Select,
        DisplayType::ImageSwatch,
        DisplayType::TextSwatch,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use DisplayType::*;
        match self {
            ColorSwatch => "color_swatch",
            Select => "select",
            ImageSwatch => "image_swatch",
            TextSwatch => "text_swatch",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(DisplayType::from_code("color_swatch"), Some(DisplayType::ColorSwatch));
        assert_eq!(DisplayType::from_code("select"), Some(DisplayType::Select));
        assert_eq!(DisplayType::from_code("image_swatch"), Some(DisplayType::ImageSwatch));
        assert_eq!(DisplayType::from_code("text_swatch"), Some(DisplayType::TextSwatch));
        assert_eq!(DisplayType::from_code("dropdown"), None);
        assert_eq!(DisplayType::from_code("SELECT"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&DisplayType::ImageSwatch).unwrap();
        assert_eq!(json, "\"image_swatch\"");
    }
}
