use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::models::entry::{Entry, EntryDraft, EntryRow};
use crate::models::routine::{RoutineTemplate, RoutineTemplateRow, RoutineTemplateTask};
use crate::models::target::Target;
use crate::models::task::Task;

/// Handle to the journal database. Every SQL statement in the service goes
/// through here; handlers get a clone via `AppState`.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
    }

    // ── Entries ─────────────────────────────────────────────────────────────

    pub async fn get_entry(&self, date: NaiveDate) -> Result<Option<Entry>, sqlx::Error> {
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT date, journal_text, mood, sleep_start, sleep_end, reflection_json, image_data
            FROM entries
            WHERE date = ?
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Entry::from))
    }

    /// All entries, newest date first.
    pub async fn list_entries(&self) -> Result<Vec<Entry>, sqlx::Error> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT date, journal_text, mood, sleep_start, sleep_end, reflection_json, image_data
            FROM entries
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Entry::from).collect())
    }

    /// Insert-or-replace keyed by date. A null image keeps the stored one.
    pub async fn save_entry(&self, draft: &EntryDraft) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO entries (date, journal_text, mood, sleep_start, sleep_end, reflection_json, image_data)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (date) DO UPDATE SET
                journal_text = excluded.journal_text,
                mood = excluded.mood,
                sleep_start = excluded.sleep_start,
                sleep_end = excluded.sleep_end,
                reflection_json = excluded.reflection_json,
                image_data = COALESCE(excluded.image_data, entries.image_data),
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(draft.date)
        .bind(&draft.journal_text)
        .bind(&draft.mood)
        .bind(&draft.sleep_start)
        .bind(&draft.sleep_end)
        .bind(Json(&draft.reflection))
        .bind(&draft.image_data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Stores a generated image, creating a bare entry for the date if needed.
    /// Other columns are left as they are.
    pub async fn save_entry_image(&self, date: NaiveDate, image_data: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO entries (date, image_data)
            VALUES (?, ?)
            ON CONFLICT (date) DO UPDATE SET
                image_data = excluded.image_data,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(date)
        .bind(image_data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ── Targets ─────────────────────────────────────────────────────────────

    pub async fn targets_for_period(&self, period_key: &str) -> Result<Vec<Target>, sqlx::Error> {
        sqlx::query_as::<_, Target>(
            r#"
            SELECT id, type, title, completed, period_key
            FROM targets
            WHERE period_key = ?
            ORDER BY id ASC
            "#,
        )
        .bind(period_key)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn create_target(
        &self,
        kind: &str,
        title: &str,
        period_key: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO targets (type, title, completed, period_key) VALUES (?, ?, 0, ?) RETURNING id",
        )
        .bind(kind)
        .bind(title)
        .bind(period_key)
        .fetch_one(&self.pool)
        .await
    }

    /// Returns the number of rows touched; zero for an unknown id.
    pub async fn set_target_completed(&self, id: i64, completed: bool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE targets SET completed = ? WHERE id = ?")
            .bind(completed)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_target(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM targets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ── Tasks ───────────────────────────────────────────────────────────────

    pub async fn tasks_for_date(&self, date: NaiveDate) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT id, date, title, completed FROM tasks WHERE date = ? ORDER BY id ASC",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn completed_task_titles(&self, date: NaiveDate) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT title FROM tasks WHERE date = ? AND completed = 1 ORDER BY id ASC",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn create_task(&self, date: NaiveDate, title: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO tasks (date, title, completed) VALUES (?, ?, 0) RETURNING id",
        )
        .bind(date)
        .bind(title)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn set_task_completed(&self, id: i64, completed: bool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET completed = ? WHERE id = ?")
            .bind(completed)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_task(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ── Routine templates ───────────────────────────────────────────────────

    pub async fn list_templates(&self) -> Result<Vec<RoutineTemplate>, sqlx::Error> {
        let templates = sqlx::query_as::<_, RoutineTemplateRow>(
            "SELECT id, name FROM routine_templates ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let children = sqlx::query_as::<_, RoutineTemplateTask>(
            "SELECT id, template_id, title FROM routine_template_tasks ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(templates
            .into_iter()
            .map(|t| RoutineTemplate {
                tasks: children
                    .iter()
                    .filter(|c| c.template_id == t.id)
                    .cloned()
                    .collect(),
                id: t.id,
                name: t.name,
            })
            .collect())
    }

    pub async fn template_tasks(&self, template_id: i64) -> Result<Vec<RoutineTemplateTask>, sqlx::Error> {
        sqlx::query_as::<_, RoutineTemplateTask>(
            "SELECT id, template_id, title FROM routine_template_tasks WHERE template_id = ? ORDER BY id ASC",
        )
        .bind(template_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Inserts the template and its task titles in one transaction.
    pub async fn create_template(&self, name: &str, titles: &[String]) -> Result<i64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO routine_templates (name) VALUES (?) RETURNING id",
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        for title in titles {
            sqlx::query("INSERT INTO routine_template_tasks (template_id, title) VALUES (?, ?)")
                .bind(id)
                .bind(title)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    /// Child rows go with the parent through `ON DELETE CASCADE`.
    pub async fn delete_template(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM routine_templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Copies the template's task titles onto `date` as fresh, uncompleted
    /// tasks. Existing tasks for the date are not consulted, so applying the
    /// same template twice yields duplicates. Returns the number of tasks
    /// created; an unknown template creates none.
    pub async fn apply_template(&self, template_id: i64, date: NaiveDate) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let titles = sqlx::query_scalar::<_, String>(
            "SELECT title FROM routine_template_tasks WHERE template_id = ? ORDER BY id ASC",
        )
        .bind(template_id)
        .fetch_all(&mut *tx)
        .await?;

        for title in &titles {
            sqlx::query("INSERT INTO tasks (date, title, completed) VALUES (?, ?, 0)")
                .bind(date)
                .bind(title)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(titles.len() as u64)
    }
}
