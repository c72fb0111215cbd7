use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        }
    }

    /// `no_color` is whether `NO_COLOR` is set; it only matters under `Auto`.
    pub fn should_use_color(self, no_color: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => !no_color && std::io::stdout().is_terminal(),
        }
    }

    pub fn apply(self, no_color: bool) {
        colored::control::set_override(self.should_use_color(no_color));
    }
}

#[cfg(test)]
mod tests {
    use super::ColorMode;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(ColorMode::parse("AUTO"), Some(ColorMode::Auto));
        assert_eq!(ColorMode::parse("always"), Some(ColorMode::Always));
        assert_eq!(ColorMode::parse("Never"), Some(ColorMode::Never));
        assert_eq!(ColorMode::parse("sometimes"), None);
    }

    #[test]
    fn explicit_modes_ignore_no_color() {
        assert!(ColorMode::Always.should_use_color(true));
        assert!(!ColorMode::Never.should_use_color(false));
        assert!(!ColorMode::Auto.should_use_color(true));
    }
}
