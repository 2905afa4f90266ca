//! CSV imports for admin exports: the weight table and hotel attribute sheets.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::attributes::{parse_flag, Attribute, AttributeError};
use super::criteria::Criterion;
use super::domain::{Hotel, HotelId, PoolCriteria, SubscriptionTier};
use super::weights::{ScoringWeight, WeightTable};

const DEFAULT_DESTINATION: &str = "unassigned";

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
    UnknownColumn(String),
    UnknownCriterion { line: u64, name: String },
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
    Attribute { line: u64, source: AttributeError },
    DuplicateHotel {
        line: u64,
        hotel_id: HotelId,
        first_line: u64,
    },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read CSV export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            ImportError::MissingColumn(column) => {
                write!(f, "CSV export is missing required column '{}'", column)
            }
            ImportError::UnknownColumn(column) => {
                write!(f, "CSV export has unrecognised column '{}'", column)
            }
            ImportError::UnknownCriterion { line, name } => {
                write!(f, "line {}: unknown criterion '{}'", line, name)
            }
            ImportError::InvalidValue {
                line,
                column,
                value,
            } => write!(f, "line {}: invalid {} value '{}'", line, column, value),
            ImportError::Attribute { line, source } => write!(f, "line {}: {}", line, source),
            ImportError::DuplicateHotel {
                line,
                hotel_id,
                first_line,
            } => write!(
                f,
                "line {}: hotel '{}' already listed on line {}",
                line, hotel_id, first_line
            ),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::Attribute { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct WeightTableImporter;

impl WeightTableImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<WeightTable, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Columns: `criterion,overall,family,quiet,party[,is_active,is_visible,is_public]`.
    /// Weights outside `[0, 5]` are clamped; missing flag columns default to `true`.
    pub fn from_reader<R: Read>(reader: R) -> Result<WeightTable, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut table = WeightTable::default();

        for (offset, record) in csv_reader.deserialize::<WeightRow>().enumerate() {
            let row = record?;
            let line = offset as u64 + 2;

            let criterion = Criterion::from_name(&row.criterion).ok_or_else(|| {
                ImportError::UnknownCriterion {
                    line,
                    name: row.criterion.clone(),
                }
            })?;

            let mut weight = ScoringWeight::new(
                criterion,
                row.overall.unwrap_or(0.0),
                row.family.unwrap_or(0.0),
                row.quiet.unwrap_or(0.0),
                row.party.unwrap_or(0.0),
            );
            weight.is_active = row.flag(line, "is_active", row.is_active.as_deref())?;
            weight.is_visible = row.flag(line, "is_visible", row.is_visible.as_deref())?;
            weight.is_public = row.flag(line, "is_public", row.is_public.as_deref())?;

            table.upsert(weight);
        }

        Ok(table)
    }
}

#[derive(Debug, Deserialize)]
struct WeightRow {
    criterion: String,
    #[serde(default, deserialize_with = "empty_as_none_f64")]
    overall: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none_f64")]
    family: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none_f64")]
    quiet: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none_f64")]
    party: Option<f64>,
    #[serde(default)]
    is_active: Option<String>,
    #[serde(default)]
    is_visible: Option<String>,
    #[serde(default)]
    is_public: Option<String>,
}

impl WeightRow {
    fn flag(&self, line: u64, column: &str, raw: Option<&str>) -> Result<bool, ImportError> {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(true);
        };

        parse_flag(raw).ok_or_else(|| ImportError::InvalidValue {
            line,
            column: column.to_string(),
            value: raw.to_string(),
        })
    }
}

fn empty_as_none_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("'{raw}' is not a number"))),
    }
}

pub struct HotelSheetImporter;

/// Column role in a hotel attribute sheet.
enum HotelColumn {
    Id,
    Name,
    Destination,
    Subscription,
    Clicks,
    Views,
    Attribute(Attribute),
}

impl HotelSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Hotel>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Columns: `hotel_id,name[,destination,subscription,click_count,view_count]` plus any
    /// attribute name. Blank attribute cells stay unrecorded.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Hotel>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = csv_reader
            .headers()?
            .iter()
            .map(classify_column)
            .collect::<Result<Vec<_>, _>>()?;

        if !columns.iter().any(|column| matches!(column, HotelColumn::Id)) {
            return Err(ImportError::MissingColumn("hotel_id"));
        }
        if !columns.iter().any(|column| matches!(column, HotelColumn::Name)) {
            return Err(ImportError::MissingColumn("name"));
        }

        let mut hotels = Vec::new();
        let mut seen: BTreeMap<HotelId, u64> = BTreeMap::new();
        for (offset, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = offset as u64 + 2;
            let hotel = hotel_from_record(line, &columns, &record)?;
            if let Some(&first_line) = seen.get(&hotel.id) {
                return Err(ImportError::DuplicateHotel {
                    line,
                    hotel_id: hotel.id,
                    first_line,
                });
            }
            seen.insert(hotel.id.clone(), line);
            hotels.push(hotel);
        }

        Ok(hotels)
    }
}

fn classify_column(header: &str) -> Result<HotelColumn, ImportError> {
    let column = match header.trim().to_ascii_lowercase().as_str() {
        "hotel_id" | "id" => HotelColumn::Id,
        "name" => HotelColumn::Name,
        "destination" | "destination_id" => HotelColumn::Destination,
        "subscription" | "subscription_tier" => HotelColumn::Subscription,
        "click_count" => HotelColumn::Clicks,
        "view_count" => HotelColumn::Views,
        other => Attribute::from_name(other)
            .map(HotelColumn::Attribute)
            .ok_or_else(|| ImportError::UnknownColumn(header.to_string()))?,
    };
    Ok(column)
}

fn hotel_from_record(
    line: u64,
    columns: &[HotelColumn],
    record: &csv::StringRecord,
) -> Result<Hotel, ImportError> {
    let mut hotel = Hotel::new("", "", DEFAULT_DESTINATION);
    let mut pool = PoolCriteria::default();
    let mut surveyed = false;

    for (column, cell) in columns.iter().zip(record.iter()) {
        let cell = cell.trim();
        match column {
            HotelColumn::Id => hotel.id.0 = cell.to_string(),
            HotelColumn::Name => hotel.name = cell.to_string(),
            HotelColumn::Destination if !cell.is_empty() => {
                hotel.destination_id.0 = cell.to_string()
            }
            HotelColumn::Destination => {}
            HotelColumn::Subscription => {
                hotel.subscription = parse_subscription(cell).ok_or_else(|| {
                    ImportError::InvalidValue {
                        line,
                        column: "subscription".to_string(),
                        value: cell.to_string(),
                    }
                })?
            }
            HotelColumn::Clicks => hotel.click_count = parse_counter(line, "click_count", cell)?,
            HotelColumn::Views => hotel.view_count = parse_counter(line, "view_count", cell)?,
            HotelColumn::Attribute(attribute) => {
                attribute
                    .assign(&mut pool, cell)
                    .map_err(|source| ImportError::Attribute { line, source })?;
                surveyed |= !cell.is_empty();
            }
        }
    }

    if hotel.id.0.is_empty() {
        return Err(ImportError::InvalidValue {
            line,
            column: "hotel_id".to_string(),
            value: String::new(),
        });
    }

    if surveyed {
        hotel.pool = Some(pool);
    }

    Ok(hotel)
}

fn parse_subscription(raw: &str) -> Option<SubscriptionTier> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "free" => Some(SubscriptionTier::Free),
        "featured" => Some(SubscriptionTier::Featured),
        "premium" => Some(SubscriptionTier::Premium),
        _ => None,
    }
}

fn parse_counter(line: u64, column: &str, raw: &str) -> Result<u64, ImportError> {
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u64>().map_err(|_| ImportError::InvalidValue {
        line,
        column: column.to_string(),
        value: raw.to_string(),
    })
}
