use std::collections::BTreeSet;
use std::path::Path;

use ahash::AHashMap;
use csv::{ReaderBuilder, Trim};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::types::{Destination, User};

/// The in-memory catalog of destinations and users.
///
/// Loaded once at startup from two CSV tables and immutable afterwards.
/// Lookups are exact string matches; when the source data repeats a name or
/// id, the first row wins.
#[derive(Debug, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
    users: Vec<User>,
    by_name: AHashMap<String, usize>,
    by_user_id: AHashMap<String, usize>,
}

/// Raw destination row as it appears in Destinations.csv.
#[derive(Debug, Deserialize)]
struct DestinationRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "BestTimeToVisit")]
    best_time_to_visit: String,
    /// Absent column or blank cell means "assign one at load time".
    #[serde(rename = "PopularityScore", default)]
    popularity_score: Option<f64>,
}

/// Raw user row as it appears in Users.csv. The headcount columns are
/// spelled with spaces in the source table.
#[derive(Debug, Deserialize)]
struct UserRow {
    #[serde(rename = "UserID")]
    user_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "TravelPreferences")]
    travel_preferences: String,
    #[serde(rename = "Number of Adults", alias = "NumberOfAdults")]
    number_of_adults: u32,
    #[serde(rename = "Number of Children", alias = "NumberOfChildren")]
    number_of_children: u32,
}

impl Catalog {
    /// Load the catalog from the two CSV tables.
    ///
    /// Header whitespace is trimmed before matching, so ` PopularityScore`
    /// binds like `PopularityScore`. Destinations without a popularity score
    /// get a uniform draw from [0.1, 1.0); pass a seed to make that draw
    /// reproducible across restarts.
    pub fn load<P: AsRef<Path>>(
        destinations_csv: P,
        users_csv: P,
        seed: Option<u64>,
    ) -> Result<Self> {
        let rows = read_rows::<DestinationRow, _>(destinations_csv, "destinations")?;
        let users = read_rows::<UserRow, _>(users_csv, "users")?
            .into_iter()
            .map(|row| User {
                user_id: row.user_id,
                name: row.name,
                gender: row.gender,
                location: row.location,
                travel_preferences: row.travel_preferences,
                number_of_adults: row.number_of_adults,
                number_of_children: row.number_of_children,
            })
            .collect();

        let missing = rows
            .iter()
            .filter(|row| row.popularity_score.is_none())
            .count();
        let mut rng: StdRng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let destinations: Vec<Destination> = rows
            .into_iter()
            .map(|row| Destination {
                name: row.name,
                district: row.district,
                state: row.state,
                category: row.category,
                best_time_to_visit: row.best_time_to_visit,
                popularity_score: row
                    .popularity_score
                    .unwrap_or_else(|| rng.random_range(0.1..1.0)),
            })
            .collect();
        if missing > 0 {
            info!(
                "Assigned random popularity scores to {} of {} destinations",
                missing,
                destinations.len()
            );
        }

        Ok(Self::from_records(destinations, users))
    }

    /// Build a catalog from already-materialized records.
    #[must_use]
    pub fn from_records(destinations: Vec<Destination>, users: Vec<User>) -> Self {
        let mut by_name = AHashMap::with_capacity(destinations.len());
        for (i, dest) in destinations.iter().enumerate() {
            by_name.entry(dest.name.clone()).or_insert(i);
        }
        let mut by_user_id = AHashMap::with_capacity(users.len());
        for (i, user) in users.iter().enumerate() {
            by_user_id.entry(user.user_id.clone()).or_insert(i);
        }
        Self {
            destinations,
            users,
            by_name,
            by_user_id,
        }
    }

    /// Look up a destination by exact name.
    pub fn destination(&self, name: &str) -> Option<&Destination> {
        self.by_name.get(name).map(|&i| &self.destinations[i])
    }

    /// Look up a user by exact id.
    pub fn user(&self, id: &str) -> Option<&User> {
        self.by_user_id.get(id).map(|&i| &self.users[i])
    }

    /// Like [`Catalog::destination`], but a miss is an error.
    pub fn require_destination(&self, name: &str) -> Result<&Destination> {
        self.destination(name)
            .ok_or_else(|| Error::DestinationNotFound(name.to_string()))
    }

    /// Like [`Catalog::user`], but a miss is an error.
    pub fn require_user(&self, id: &str) -> Result<&User> {
        self.user(id).ok_or_else(|| Error::UserNotFound(id.to_string()))
    }

    #[inline]
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    #[inline]
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Distinct states across the catalog, sorted.
    #[must_use]
    pub fn states(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .destinations
            .iter()
            .map(|dest| dest.state.as_str())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Distinct normalized category labels across the catalog, sorted.
    ///
    /// This is the category vocabulary the offline builder indexes by.
    #[must_use]
    pub fn category_labels(&self) -> Vec<String> {
        let mut set = BTreeSet::new();
        for dest in &self.destinations {
            set.extend(dest.label_set());
        }
        set.into_iter().collect()
    }

    /// Distinct category labels as spelled in the table, trimmed and
    /// sorted. Feeds preference pickers, so casing is preserved.
    #[must_use]
    pub fn preference_labels(&self) -> Vec<String> {
        let mut set = BTreeSet::new();
        for dest in &self.destinations {
            for label in dest.category.split(',') {
                let label = label.trim();
                if !label.is_empty() {
                    set.insert(label.to_string());
                }
            }
        }
        set.into_iter().collect()
    }
}

fn read_rows<T, P>(path: P, table: &'static str) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: T = record.map_err(|source| Error::InvalidRow { table, source })?;
        rows.push(row);
    }
    Ok(rows)
}
