// SQLite dashboard settings. Single row; only the selected camera is stored here.

use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

pub struct SettingsRepo {
    pool: SqlitePool,
}

impl SettingsRepo {
    pub async fn connect(path: &str) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new().connect_with(opts).await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS dashboard_settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                selected_camera_uid TEXT,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(repo = "settings", operation = "get_selected_camera_uid"))]
    pub async fn get_selected_camera_uid(&self) -> Result<Option<String>, sqlx::Error> {
        let row = sqlx::query("SELECT selected_camera_uid FROM dashboard_settings WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        row.try_get("selected_camera_uid")
    }

    /// `None` clears the selection (resolution then falls back to the first webcam).
    #[instrument(skip(self), fields(repo = "settings", operation = "set_selected_camera_uid"))]
    pub async fn set_selected_camera_uid(&self, uid: Option<&str>) -> Result<(), sqlx::Error> {
        let now = chrono::Utc::now().timestamp_millis();
        sqlx::query(
            "INSERT INTO dashboard_settings (id, selected_camera_uid, updated_at) VALUES (1, $1, $2)
             ON CONFLICT(id) DO UPDATE SET selected_camera_uid = excluded.selected_camera_uid, updated_at = excluded.updated_at",
        )
        .bind(uid)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
