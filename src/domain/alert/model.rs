//! Alert domain entity

use chrono::{DateTime, Utc};

/// Alert severity, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl AlertSeverity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    pub const ALL: [AlertSeverity; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];
}

/// Alert raised for a truck
#[derive(Debug, Clone)]
pub struct Alert {
    pub id: String,
    pub truck_id: String,
    /// Category, e.g. "tire_pressure", "fuel_low", "engine_temp"
    pub kind: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Mark resolved. Returns false when the alert was already resolved
    /// (resolution is idempotent, no second event is emitted).
    pub fn resolve(&mut self) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        self.resolved_at = Some(Utc::now());
        true
    }
}

/// Data for raising an alert
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub truck_id: String,
    pub kind: String,
    pub severity: AlertSeverity,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_alert() -> Alert {
        Alert {
            id: "a-1".to_string(),
            truck_id: "t-001".to_string(),
            kind: "tire_pressure".to_string(),
            severity: AlertSeverity::High,
            message: "Tire 3 pressure low".to_string(),
            resolved: false,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[test]
    fn resolve_sets_flag_and_timestamp() {
        let mut alert = sample_alert();
        assert!(alert.resolve());
        assert!(alert.resolved);
        assert!(alert.resolved_at.is_some());
    }

    #[test]
    fn resolve_twice_is_noop() {
        let mut alert = sample_alert();
        assert!(alert.resolve());
        let first_resolved_at = alert.resolved_at;
        assert!(!alert.resolve());
        assert_eq!(alert.resolved_at, first_resolved_at);
    }

    #[test]
    fn severity_ordering() {
        assert!(AlertSeverity::Critical > AlertSeverity::High);
        assert!(AlertSeverity::Medium > AlertSeverity::Low);
    }

    #[test]
    fn severity_parse_round_trips() {
        for severity in AlertSeverity::ALL {
            assert_eq!(AlertSeverity::parse(&severity.to_string()), Some(severity));
        }
        assert_eq!(AlertSeverity::parse("urgent"), None);
    }
}
