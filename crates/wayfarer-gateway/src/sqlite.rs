//! SQLite-backed gateway

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use wayfarer_domain::traits::PersistenceGateway;
use wayfarer_domain::{
    Activity, GatewayError, ItineraryId, ItineraryPatch, ItineraryRecord, UserId,
};

const SELECT_COLUMNS: &str = "id, owner, title, destination, start_date, end_date, categories,
     description, photo_url, photo_hint, activities, is_favorite";

/// SQLite-based implementation of `PersistenceGateway`
///
/// Records are keyed by `(owner, id)`. The gateway keeps the identifier it is
/// given, so `add` confirms the locally generated id rather than assigning a
/// new one.
///
/// # Thread Safety
///
/// The connection sits behind a mutex; calls are short and never hold the
/// lock across an await point.
pub struct SqliteGateway {
    conn: Mutex<Connection>,
}

impl SqliteGateway {
    /// Open (or create) a gateway at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wayfarer_gateway::SqliteGateway;
    ///
    /// let gateway = SqliteGateway::new("itineraries.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, GatewayError> {
        let conn = Connection::open(path).map_err(GatewayError::backend)?;
        Self::from_connection(conn)
    }

    /// Open a fresh in-memory database
    pub fn in_memory() -> Result<Self, GatewayError> {
        let conn = Connection::open_in_memory().map_err(GatewayError::backend)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, GatewayError> {
        conn.execute_batch(include_str!("schema.sql"))
            .map_err(GatewayError::backend)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with the connection locked
    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, GatewayError>,
    ) -> Result<T, GatewayError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| GatewayError::Unavailable("connection lock poisoned".to_string()))?;
        f(&conn)
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ItineraryRecord> {
        let categories: String = row.get(6)?;
        let activities: String = row.get(10)?;

        let categories: Vec<String> = serde_json::from_str(&categories).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let activities: Vec<Activity> = serde_json::from_str(&activities).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(10, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(ItineraryRecord {
            id: ItineraryId::new(row.get::<_, String>(0)?),
            owner: UserId::new(row.get::<_, String>(1)?),
            title: row.get(2)?,
            destination: row.get(3)?,
            start_date: row.get(4)?,
            end_date: row.get(5)?,
            categories,
            description: row.get(7)?,
            photo_url: row.get(8)?,
            photo_hint: row.get(9)?,
            activities,
            is_favorite: row.get::<_, i64>(11)? != 0,
        })
    }

    /// Fetch a single record, mostly useful for inspection and tests
    pub fn get(
        &self,
        owner: &UserId,
        id: &ItineraryId,
    ) -> Result<Option<ItineraryRecord>, GatewayError> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {} FROM itineraries WHERE owner = ?1 AND id = ?2",
                    SELECT_COLUMNS
                ),
                params![owner.as_str(), id.as_str()],
                Self::row_to_record,
            )
            .optional()
            .map_err(GatewayError::backend)
        })
    }
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    async fn add(
        &self,
        owner: &UserId,
        record: &ItineraryRecord,
    ) -> Result<ItineraryId, GatewayError> {
        let categories = serde_json::to_string(&record.categories).map_err(GatewayError::backend)?;
        let activities = serde_json::to_string(&record.activities).map_err(GatewayError::backend)?;

        self.with_conn(|conn| {
            let exists = conn
                .query_row(
                    "SELECT 1 FROM itineraries WHERE owner = ?1 AND id = ?2",
                    params![owner.as_str(), record.id.as_str()],
                    |_| Ok(true),
                )
                .optional()
                .map_err(GatewayError::backend)?
                .unwrap_or(false);

            if exists {
                return Err(GatewayError::Duplicate(record.id.to_string()));
            }

            conn.execute(
                "INSERT INTO itineraries (id, owner, title, destination, start_date, end_date,
                     categories, description, photo_url, photo_hint, activities, is_favorite)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    record.id.as_str(),
                    owner.as_str(),
                    &record.title,
                    &record.destination,
                    &record.start_date,
                    &record.end_date,
                    &categories,
                    &record.description,
                    &record.photo_url,
                    &record.photo_hint,
                    &activities,
                    record.is_favorite as i64,
                ],
            )
            .map_err(GatewayError::backend)?;

            tracing::debug!(owner = %owner, id = %record.id, "inserted itinerary");
            Ok(record.id.clone())
        })
    }

    async fn list_all(&self, owner: &UserId) -> Result<Vec<ItineraryRecord>, GatewayError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {} FROM itineraries WHERE owner = ?1 ORDER BY seq DESC",
                    SELECT_COLUMNS
                ))
                .map_err(GatewayError::backend)?;

            let records = stmt
                .query_map(params![owner.as_str()], Self::row_to_record)
                .map_err(GatewayError::backend)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(GatewayError::backend)?;

            Ok(records)
        })
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &ItineraryId,
        patch: &ItineraryPatch,
    ) -> Result<(), GatewayError> {
        let Some(is_favorite) = patch.is_favorite else {
            return Ok(());
        };

        self.with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE itineraries SET is_favorite = ?3 WHERE owner = ?1 AND id = ?2",
                    params![owner.as_str(), id.as_str(), is_favorite as i64],
                )
                .map_err(GatewayError::backend)?;

            if changed == 0 {
                return Err(GatewayError::NotFound(id.to_string()));
            }
            Ok(())
        })
    }

    async fn delete(&self, owner: &UserId, id: &ItineraryId) -> Result<(), GatewayError> {
        self.with_conn(|conn| {
            let changed = conn
                .execute(
                    "DELETE FROM itineraries WHERE owner = ?1 AND id = ?2",
                    params![owner.as_str(), id.as_str()],
                )
                .map_err(GatewayError::backend)?;

            if changed == 0 {
                return Err(GatewayError::NotFound(id.to_string()));
            }
            tracing::debug!(owner = %owner, id = %id, "deleted itinerary");
            Ok(())
        })
    }
}
