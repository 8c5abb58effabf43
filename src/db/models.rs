use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A plant row joined with its room assignment.
///
/// `room_name` is `None` for plants with no association row (the finders use
/// a left outer join, so such plants still appear in listings).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Plant {
    pub id: i64,
    pub common_name: String,
    pub scientific_name: String,
    pub water_frequency: i64,
    pub last_watered: NaiveDate,
    pub light: String,
    pub room_name: Option<String>,
}

impl Plant {
    /// A plant is due once `water_frequency` days have elapsed since
    /// `last_watered`, i.e. `last_watered + water_frequency <= today`.
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        u64::try_from(self.water_frequency)
            .ok()
            .and_then(|days| self.last_watered.checked_add_days(Days::new(days)))
            .is_some_and(|next_watering| next_watering <= today)
    }

    pub fn is_due(&self) -> bool {
        self.is_due_on(Utc::now().date_naive())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Room {
    pub id: i64,
    pub room_name: String,
}

/// Creation/edit payload for a plant; doubles as the HTML form shape.
#[derive(Debug, Clone, Deserialize)]
pub struct PlantInput {
    pub common_name: String,
    pub scientific_name: String,
    pub water_frequency: i64,
    pub light: String,
    pub room_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(last_watered: NaiveDate, water_frequency: i64) -> Plant {
        Plant {
            id: 1,
            common_name: "Monstera".to_string(),
            scientific_name: "Monstera deliciosa".to_string(),
            water_frequency,
            last_watered,
            light: "indirect".to_string(),
            room_name: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn due_once_frequency_has_elapsed() {
        let p = plant(day(2024, 1, 1), 7);
        assert!(p.is_due_on(day(2024, 1, 10)));
    }

    #[test]
    fn due_exactly_on_the_boundary_day() {
        let p = plant(day(2024, 1, 1), 7);
        assert!(p.is_due_on(day(2024, 1, 8)));
    }

    #[test]
    fn not_due_within_the_interval() {
        let p = plant(day(2024, 1, 1), 7);
        assert!(!p.is_due_on(day(2024, 1, 5)));
        assert!(!p.is_due_on(day(2024, 1, 7)));
    }

    #[test]
    fn nonsense_frequency_is_never_due() {
        let p = plant(day(2024, 1, 1), -3);
        assert!(!p.is_due_on(day(2024, 1, 10)));
    }
}
