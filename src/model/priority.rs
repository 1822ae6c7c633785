// File: ./src/model/priority.rs
use std::fmt;

/// Priority label of a task.
///
/// The three well-known levels are recognised in English or Spanish, any
/// casing. Other labels are kept as [`CustomLabel`]s so files written with
/// free-text priorities still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
    Custom(CustomLabel),
}

/// Free-text priority. Only [`Priority::parse`] builds one, so the text is
/// always trimmed and never spells one of the three levels. Writing its
/// label and parsing it again yields the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomLabel(String);

impl CustomLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Priority {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "alta" | "high" => Priority::High,
            "media" | "medium" => Priority::Medium,
            "baja" | "low" => Priority::Low,
            _ => Priority::Custom(CustomLabel(trimmed.to_string())),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Priority::High => "Alta",
            Priority::Medium => "Media",
            Priority::Low => "Baja",
            Priority::Custom(label) => label.as_str(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Priority::Custom(_))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_stable_over_its_own_labels() {
        for input in ["HIGH", "  Media", "low", "someday", "  urgent!! ", "", "Alta ya"] {
            let first = Priority::parse(input);
            assert_eq!(Priority::parse(first.label()), first, "input {:?}", input);
        }
    }

    #[test]
    fn test_custom_label_is_trimmed() {
        let p = Priority::parse("  next week ");
        assert!(p.is_custom());
        assert_eq!(p.label(), "next week");
    }
}
