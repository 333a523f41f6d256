//! SQLite-backed suggestion and itinerary ledgers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use orderly_domain::{
    CandidateResult, ExpectedShape, ItineraryId, ItineraryRecord, Page, PageRequest,
    RequestSnapshot, ResolvedLocation, SuggestionId, SuggestionRecord, SuggestionRequest,
    TripRequest, TripSnapshot, ANONYMOUS_EMAIL,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{ClockPort, ItineraryLedger, RepoError, SuggestionLedger};

/// Append-only ledger of accepted outcomes, one table per result family.
pub struct SqliteLedger {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteLedger {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("ledger", e))?;
        Self::with_pool(pool, clock).await
    }

    /// Private in-memory database. A single connection keeps every query on
    /// the same database.
    #[cfg(test)]
    pub async fn in_memory(clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepoError::database("ledger", e))?;
        Self::with_pool(pool, clock).await
    }

    async fn with_pool(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS restaurant_suggestions (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                dining_preference TEXT,
                distance TEXT,
                budget_json TEXT,
                cuisine TEXT NOT NULL,
                include_chains INTEGER NOT NULL,
                request_details_json TEXT NOT NULL,
                city TEXT NOT NULL,
                country TEXT NOT NULL,
                result_shape TEXT NOT NULL,
                result_json TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("ledger", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS road_trips (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                email TEXT,
                start_location TEXT NOT NULL,
                end_location TEXT NOT NULL,
                request_details_json TEXT NOT NULL,
                result_json TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("ledger", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_suggestions_email ON restaurant_suggestions (email)",
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("ledger", e))?;

        Ok(Self { pool, clock })
    }

    /// Fixed-width UTC timestamp so text ordering matches time ordering.
    fn stamp(&self) -> String {
        self.clock.now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    async fn count(
        &self,
        table: &str,
        email: Option<&str>,
        operation: &'static str,
    ) -> Result<u64, RepoError> {
        let mut query = format!("SELECT COUNT(*) AS total FROM {table}");
        if email.is_some() {
            query.push_str(" WHERE lower(email) = lower(?)");
        }

        let mut q = sqlx::query(&query);
        if let Some(email) = email {
            q = q.bind(email);
        }

        let row = q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database(operation, e))?;
        let total: i64 = row.get("total");
        Ok(total.max(0) as u64)
    }

    async fn fetch_page(
        &self,
        columns: &str,
        table: &str,
        email: Option<&str>,
        page: PageRequest,
        operation: &'static str,
    ) -> Result<Vec<SqliteRow>, RepoError> {
        let mut query = format!("SELECT {columns} FROM {table}");
        if email.is_some() {
            query.push_str(" WHERE lower(email) = lower(?)");
        }
        query.push_str(" ORDER BY created_at DESC, seq DESC LIMIT ? OFFSET ?");

        let mut q = sqlx::query(&query);
        if let Some(email) = email {
            q = q.bind(email);
        }

        q.bind(i64::from(page.page_size()))
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database(operation, e))
    }
}

const SUGGESTION_COLUMNS: &str = "id, email, latitude, longitude, dining_preference, distance, \
     budget_json, cuisine, include_chains, request_details_json, city, country, result_shape, \
     result_json, created_at";

const ITINERARY_COLUMNS: &str =
    "id, email, start_location, end_location, request_details_json, result_json, created_at";

#[async_trait]
impl SuggestionLedger for SqliteLedger {
    async fn record(
        &self,
        request: &SuggestionRequest,
        location: &ResolvedLocation,
        result: &CandidateResult,
    ) -> Result<SuggestionId, RepoError> {
        let id = SuggestionId::new();
        let coordinates = request.coordinates();
        let snapshot = RequestSnapshot::capture(request, location);
        let details = serde_json::to_string(&snapshot).map_err(RepoError::serialization)?;
        let result_json = result.to_json().map_err(RepoError::serialization)?;
        let budget = if request.budget().is_empty() {
            None
        } else {
            Some(serde_json::to_string(request.budget()).map_err(RepoError::serialization)?)
        };

        sqlx::query(
            r#"
            INSERT INTO restaurant_suggestions (
                id, email, latitude, longitude, dining_preference, distance, budget_json,
                cuisine, include_chains, request_details_json, city, country, result_shape,
                result_json, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(request.email().unwrap_or(ANONYMOUS_EMAIL))
        .bind(coordinates.lat)
        .bind(coordinates.lng)
        .bind(request.dining_preference())
        .bind(request.distance())
        .bind(budget)
        .bind(request.cuisine())
        .bind(request.include_chains())
        .bind(details)
        .bind(&location.city)
        .bind(&location.country)
        .bind(result.shape().as_str())
        .bind(result_json)
        .bind(self.stamp())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("record_suggestion", e))?;

        Ok(id)
    }

    async fn list(
        &self,
        email: Option<String>,
        page: PageRequest,
    ) -> Result<Page<SuggestionRecord>, RepoError> {
        let email = email.as_deref();
        let total = self
            .count("restaurant_suggestions", email, "list_suggestions")
            .await?;
        let rows = self
            .fetch_page(
                SUGGESTION_COLUMNS,
                "restaurant_suggestions",
                email,
                page,
                "list_suggestions",
            )
            .await?;

        let items = rows
            .iter()
            .map(row_to_suggestion)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, total))
    }
}

#[async_trait]
impl ItineraryLedger for SqliteLedger {
    async fn record(
        &self,
        trip: &TripRequest,
        result: &CandidateResult,
    ) -> Result<ItineraryId, RepoError> {
        let id = ItineraryId::new();
        let details =
            serde_json::to_string(&TripSnapshot::capture(trip)).map_err(RepoError::serialization)?;
        let result_json = result.to_json().map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO road_trips (
                id, email, start_location, end_location, request_details_json, result_json,
                created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(trip.email.as_deref())
        .bind(&trip.start)
        .bind(&trip.end)
        .bind(details)
        .bind(result_json)
        .bind(self.stamp())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("record_itinerary", e))?;

        Ok(id)
    }

    async fn list(
        &self,
        email: Option<String>,
        page: PageRequest,
    ) -> Result<Page<ItineraryRecord>, RepoError> {
        let email = email.as_deref();
        let total = self.count("road_trips", email, "list_itineraries").await?;
        let rows = self
            .fetch_page(ITINERARY_COLUMNS, "road_trips", email, page, "list_itineraries")
            .await?;

        let items = rows
            .iter()
            .map(row_to_itinerary)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, total))
    }
}

// =============================================================================
// Row conversion
// =============================================================================

fn row_to_suggestion(row: &SqliteRow) -> Result<SuggestionRecord, RepoError> {
    let id: String = row.get("id");
    let budget_json: Option<String> = row.get("budget_json");
    let details: String = row.get("request_details_json");
    let shape: String = row.get("result_shape");
    let result: String = row.get("result_json");
    let created_at: String = row.get("created_at");

    let shape: ExpectedShape = shape.parse().map_err(RepoError::serialization)?;
    let budget = budget_json
        .map(|json| serde_json::from_str::<Vec<String>>(&json))
        .transpose()
        .map_err(RepoError::serialization)?;

    Ok(SuggestionRecord {
        id: id.parse().map_err(RepoError::serialization)?,
        email: row.get("email"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        dining_preference: row.get("dining_preference"),
        distance: row.get("distance"),
        budget,
        cuisine: row.get("cuisine"),
        include_chains: row.get("include_chains"),
        request_details: serde_json::from_str(&details).map_err(RepoError::serialization)?,
        location: ResolvedLocation {
            city: row.get("city"),
            country: row.get("country"),
        },
        result: CandidateResult::from_stored(shape, &result).map_err(RepoError::serialization)?,
        created_at: parse_timestamp(&created_at)?,
    })
}

fn row_to_itinerary(row: &SqliteRow) -> Result<ItineraryRecord, RepoError> {
    let id: String = row.get("id");
    let details: String = row.get("request_details_json");
    let result: String = row.get("result_json");
    let created_at: String = row.get("created_at");

    Ok(ItineraryRecord {
        id: id.parse().map_err(RepoError::serialization)?,
        email: row.get("email"),
        start: row.get("start_location"),
        end: row.get("end_location"),
        request_details: serde_json::from_str(&details).map_err(RepoError::serialization)?,
        result: CandidateResult::from_stored(ExpectedShape::Itinerary, &result)
            .map_err(RepoError::serialization)?,
        created_at: parse_timestamp(&created_at)?,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(RepoError::serialization)
}
