use serde::{Deserialize, Serialize};

/// Travel method a route is computed for. Maps onto the directions API's
/// routing profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TransportMode {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl TransportMode {
    /// Profile segment used in the directions request URL
    pub fn profile(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Walking => "walking",
            TransportMode::Cycling => "cycling",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TransportMode::Driving => "Driving",
            TransportMode::Walking => "Walking",
            TransportMode::Cycling => "Cycling",
        }
    }

    pub fn all() -> &'static [TransportMode] {
        &[
            TransportMode::Driving,
            TransportMode::Walking,
            TransportMode::Cycling,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_driving() {
        assert_eq!(TransportMode::default(), TransportMode::Driving);
    }

    #[test]
    fn test_profiles() {
        assert_eq!(TransportMode::Driving.profile(), "driving");
        assert_eq!(TransportMode::Walking.profile(), "walking");
        assert_eq!(TransportMode::Cycling.profile(), "cycling");
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TransportMode::Driving.display_name(), "Driving");
        assert_eq!(TransportMode::Walking.display_name(), "Walking");
        assert_eq!(TransportMode::Cycling.display_name(), "Cycling");
    }

    #[test]
    fn test_all_has_correct_count() {
        assert_eq!(TransportMode::all().len(), 3);
    }

    #[test]
    fn test_profiles_are_distinct() {
        let profiles: Vec<_> = TransportMode::all().iter().map(|m| m.profile()).collect();
        for (i, a) in profiles.iter().enumerate() {
            for b in profiles.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        for mode in TransportMode::all() {
            let json = serde_json::to_string(mode).unwrap();
            let deserialized: TransportMode = serde_json::from_str(&json).unwrap();
            assert_eq!(*mode, deserialized);
        }
    }
}
