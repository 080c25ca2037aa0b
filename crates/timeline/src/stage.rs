//! Life stages and their sources.

use chrono::{Days, NaiveDate};
use common::{CalendarError, CalendarResult, Color};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// A named, dated point of a life.
///
/// The first stage of a life is the birth entry; its color is never drawn.
/// Every later stage names the run of weeks that ends at its date.
#[derive(Clone, Debug, PartialEq)]
pub struct LifeStage {
    /// Display name, shown in the legend.
    pub name: String,
    /// Date at which the stage is reached.
    pub date: NaiveDate,
    /// Marker color. `None` falls back to the property cycle.
    pub color: Option<Color>,
}

impl LifeStage {
    pub fn new(name: impl Into<String>, date: NaiveDate, color: Option<Color>) -> Self {
        Self {
            name: name.into(),
            date,
            color,
        }
    }

    /// The birth entry every life starts with.
    pub fn born(date: NaiveDate) -> Self {
        Self::new("born", date, None)
    }
}

/// On-disk form of a stage.
#[derive(Debug, Deserialize)]
struct StageRecord {
    name: String,
    date: NaiveDate,
    #[serde(default)]
    color: Option<String>,
}

impl TryFrom<StageRecord> for LifeStage {
    type Error = CalendarError;

    fn try_from(record: StageRecord) -> CalendarResult<Self> {
        let color = match record.color {
            Some(spec) => Some(Color::parse(&spec).ok_or_else(|| {
                CalendarError::parse(format!("unknown color '{}' for stage '{}'", spec, record.name))
            })?),
            None => None,
        };
        Ok(LifeStage::new(record.name, record.date, color))
    }
}

/// Parse stages from a JSON array of `{"name", "date", "color"}` objects.
pub fn parse_stages(json: &str) -> CalendarResult<Vec<LifeStage>> {
    let records: Vec<StageRecord> =
        serde_json::from_str(json).map_err(|e| CalendarError::parse(e.to_string()))?;
    records.into_iter().map(LifeStage::try_from).collect()
}

/// Load stages from a JSON file.
pub fn load_stages(path: impl AsRef<Path>) -> CalendarResult<Vec<LifeStage>> {
    let path = path.as_ref();
    debug!("Loading life stages from {}", path.display());
    let json = std::fs::read_to_string(path)?;
    parse_stages(&json)
}

fn ymd(year: i32, month: u32, day: u32) -> CalendarResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| CalendarError::internal(format!("invalid date {year}-{month}-{day}")))
}

/// The built-in life, with the current stage running until `today`.
pub fn default_life(today: NaiveDate) -> CalendarResult<Vec<LifeStage>> {
    let birthday = ymd(1990, 12, 28)?;
    let early_childhood_end = birthday
        .checked_add_days(Days::new(4 * 365))
        .ok_or_else(|| CalendarError::internal("date overflow"))?;

    let cycle = |spec: &str| Color::from_cycle(spec);

    Ok(vec![
        LifeStage::born(birthday),
        LifeStage::new("early childhood", early_childhood_end, cycle("C0")),
        LifeStage::new("school", ymd(2003, 8, 18)?, cycle("C1")),
        LifeStage::new("high school", ymd(2009, 9, 1)?, cycle("C2")),
        LifeStage::new("university", ymd(2015, 8, 1)?, cycle("C3")),
        LifeStage::new("travel", ymd(2016, 2, 1)?, cycle("C8")),
        LifeStage::new("phd", ymd(2020, 2, 1)?, cycle("C6")),
        LifeStage::new("work", today, cycle("C4")),
    ])
}
