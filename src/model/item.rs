use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Category of a tracked clan item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Unique,
    Red,
    Consumable,
}

impl ItemType {
    pub const ALL: [ItemType; 3] = [ItemType::Unique, ItemType::Red, ItemType::Consumable];

    /// Wire form used in the spreadsheet and command options.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Unique => "UNIQUE",
            ItemType::Red => "RED",
            ItemType::Consumable => "CONSUMABLE",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = ();

    /// Case-insensitive parse of the wire form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UNIQUE" => Ok(ItemType::Unique),
            "RED" => Ok(ItemType::Red),
            "CONSUMABLE" => Ok(ItemType::Consumable),
            _ => Err(()),
        }
    }
}

/// A clan storage item.
///
/// `sheet_no` is the sequential row number in the backing spreadsheet,
/// assigned the first time the item is successfully written remotely.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub sheet_no: Option<u32>,
    pub name: String,
    pub item_type: ItemType,
    pub participants: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Item {
    /// Whole days until expiry, floored: any past-expiry instant counts
    /// negative, and day zero is the current 24-hour window.
    /// `Duration::num_days` truncates toward zero, which would report a
    /// just-expired item as having a day left.
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().div_euclid(86_400)
    }

    pub fn expiry_status(&self, now: DateTime<Utc>) -> ExpiryStatus {
        ExpiryStatus::from_days_left(self.days_until_expiry(now))
    }

    /// Participants joined for display and spreadsheet storage.
    pub fn participants_display(&self) -> String {
        self.participants.join(", ")
    }
}

/// Parameters for creating a new item.
///
/// `created_at` backdates the item when set; expiry is always derived from
/// the creation timestamp.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub item_type: ItemType,
    pub participants: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Urgency bucket for an item's remaining lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    /// Already past its expiry date.
    Expired,
    /// Three days or less remaining.
    Critical,
    /// A week or less remaining.
    Warning,
    /// More than a week remaining.
    Safe,
}

impl ExpiryStatus {
    pub fn from_days_left(days: i64) -> Self {
        if days <= 0 {
            ExpiryStatus::Expired
        } else if days <= 3 {
            ExpiryStatus::Critical
        } else if days <= 7 {
            ExpiryStatus::Warning
        } else {
            ExpiryStatus::Safe
        }
    }

    /// Status indicator used in embeds and alerts.
    pub fn emoji(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired | ExpiryStatus::Critical => "🔴",
            ExpiryStatus::Warning => "🟡",
            ExpiryStatus::Safe => "🟢",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn parses_item_types_case_insensitively() {
        assert_eq!("UNIQUE".parse::<ItemType>(), Ok(ItemType::Unique));
        assert_eq!("unique".parse::<ItemType>(), Ok(ItemType::Unique));
        assert_eq!("Red".parse::<ItemType>(), Ok(ItemType::Red));
        assert_eq!("consumable".parse::<ItemType>(), Ok(ItemType::Consumable));
        assert!("INVALID".parse::<ItemType>().is_err());
    }

    #[test]
    fn displays_wire_form() {
        assert_eq!(ItemType::Consumable.to_string(), "CONSUMABLE");
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(ExpiryStatus::from_days_left(-1), ExpiryStatus::Expired);
        assert_eq!(ExpiryStatus::from_days_left(0), ExpiryStatus::Expired);
        assert_eq!(ExpiryStatus::from_days_left(1), ExpiryStatus::Critical);
        assert_eq!(ExpiryStatus::from_days_left(3), ExpiryStatus::Critical);
        assert_eq!(ExpiryStatus::from_days_left(5), ExpiryStatus::Warning);
        assert_eq!(ExpiryStatus::from_days_left(7), ExpiryStatus::Warning);
        assert_eq!(ExpiryStatus::from_days_left(10), ExpiryStatus::Safe);
    }

    #[test]
    fn status_emoji() {
        assert_eq!(ExpiryStatus::Expired.emoji(), "🔴");
        assert_eq!(ExpiryStatus::Critical.emoji(), "🔴");
        assert_eq!(ExpiryStatus::Warning.emoji(), "🟡");
        assert_eq!(ExpiryStatus::Safe.emoji(), "🟢");
    }

    #[test]
    fn days_until_expiry_counts_whole_days() {
        let now = Utc::now();
        let item = Item {
            sheet_no: None,
            name: "Relic".to_string(),
            item_type: ItemType::Unique,
            participants: vec!["Alice".to_string()],
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::days(5) + Duration::hours(1),
        };

        assert_eq!(item.days_until_expiry(now), 5);
        assert_eq!(item.expiry_status(now), ExpiryStatus::Warning);
    }

    #[test]
    fn just_expired_items_count_as_expired() {
        let now = Utc::now();
        let item = Item {
            sheet_no: None,
            name: "Relic".to_string(),
            item_type: ItemType::Unique,
            participants: vec!["Alice".to_string()],
            created_at: now - Duration::days(30),
            updated_at: now,
            expires_at: now - Duration::hours(1),
        };

        assert_eq!(item.days_until_expiry(now), -1);
        assert_eq!(item.expiry_status(now), ExpiryStatus::Expired);
    }
}
