use crate::error::{LookbackError, Result};
use crate::project::ProjectInfo;
use crate::store::{self, BodyLine, ReviewRecord, TaskStore};
use chrono::DateTime;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde_json::json;
use std::path::{Path, PathBuf};

// Things task rows: `type` 0 = to-do, 1 = project; `status` 0 = open.
// `creationDate` is unix-epoch seconds stored as REAL.

// ---------------------------------------------------------------------------
// ThingsStore
// ---------------------------------------------------------------------------

/// Production [`TaskStore`] backed by the Things 3 database.
///
/// Reads go straight to the SQLite file (opened read-only); the write side
/// never touches the database and goes through the `things:///json` URL
/// scheme instead, so Things itself performs the creation.
pub struct ThingsStore {
    conn: Connection,
    /// Print the creation URL instead of launching it.
    dry_run: bool,
}

impl ThingsStore {
    pub fn open(path: &Path, dry_run: bool) -> Result<Self> {
        if !path.exists() {
            return Err(LookbackError::Store(format!(
                "Things database not found at {}",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn, dry_run })
    }

    /// Locate the database inside the standard Things 3 group container.
    /// The data directory carries an account-specific suffix, so it is
    /// discovered by prefix scan.
    pub fn default_db_path() -> Result<PathBuf> {
        let home = home::home_dir()
            .ok_or_else(|| LookbackError::Store("home directory not found".to_string()))?;
        let container =
            home.join("Library/Group Containers/JLMPQHK86H.com.culturedcode.ThingsMac");
        let mut data_dirs: Vec<PathBuf> = std::fs::read_dir(&container)
            .map_err(|_| {
                LookbackError::Store(format!(
                    "Things container not found at {} (is Things 3 installed?)",
                    container.display()
                ))
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("ThingsData"))
            })
            .collect();
        data_dirs.sort();
        let data_dir = data_dirs.into_iter().next().ok_or_else(|| {
            LookbackError::Store("no ThingsData directory in the Things container".to_string())
        })?;
        Ok(data_dir.join("Things Database.thingsdatabase/main.sqlite"))
    }

    fn projects_in_area(&self, area_id: &str) -> Result<Vec<ProjectInfo>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT uuid, title, area
                 FROM TMTask
                WHERE area = ?1 AND type = 1 AND status = 0 AND trashed = 0
                ORDER BY "index""#,
        )?;
        let rows = stmt.query_map(params![area_id], project_from_row)?;
        collect_projects(rows)
    }

    fn project_by_id(&self, id: &str) -> Result<Option<ProjectInfo>> {
        let project = self
            .conn
            .query_row(
                "SELECT uuid, title, area
                   FROM TMTask
                  WHERE uuid = ?1 AND type = 1 AND status = 0 AND trashed = 0",
                params![id],
                project_from_row,
            )
            .optional()?;
        Ok(project)
    }

    /// The full creation URL for a review document, exposed separately so the
    /// payload shape is testable without launching anything.
    pub fn document_url(save_area: &str, title: &str, body: &[BodyLine]) -> Result<String> {
        let items: Vec<serde_json::Value> = body
            .iter()
            .map(|line| {
                json!({
                    "type": "to-do",
                    "attributes": {
                        "title": line.title,
                        "notes": line.render(),
                    }
                })
            })
            .collect();
        let payload = json!([{
            "type": "project",
            "attributes": {
                "title": title,
                "area-id": save_area,
                "items": items,
            }
        }]);
        Ok(store::json_url(&serde_json::to_string(&payload)?))
    }
}

fn project_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectInfo> {
    Ok(ProjectInfo {
        id: row.get(0)?,
        title: row.get(1)?,
        area_id: row.get(2)?,
    })
}

fn collect_projects(
    rows: impl Iterator<Item = rusqlite::Result<ProjectInfo>>,
) -> Result<Vec<ProjectInfo>> {
    let mut projects = Vec::new();
    for row in rows {
        projects.push(row?);
    }
    Ok(projects)
}

// ---------------------------------------------------------------------------
// TaskStore impl
// ---------------------------------------------------------------------------

impl TaskStore for ThingsStore {
    fn find_projects_by_tag(&self, tag: &str) -> Result<Vec<ProjectInfo>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT t.uuid, t.title, t.area
                 FROM TMTask t
                 JOIN TMArea a ON a.uuid = t.area
                 JOIN TMAreaTag x ON x.areas = a.uuid
                 JOIN TMTag g ON g.uuid = x.tags
                WHERE g.title = ?1
                  AND t.type = 1 AND t.status = 0 AND t.trashed = 0
                ORDER BY a."index", t."index""#,
        )?;
        let rows = stmt.query_map(params![tag], project_from_row)?;
        collect_projects(rows)
    }

    fn find_projects_by_ids(&self, ids: &[String]) -> Result<Vec<ProjectInfo>> {
        let mut projects = Vec::new();
        for id in ids {
            // An id may name an area (all its projects) or a project directly.
            let in_area = self.projects_in_area(id)?;
            if !in_area.is_empty() {
                projects.extend(in_area);
            } else if let Some(project) = self.project_by_id(id)? {
                projects.push(project);
            }
        }
        Ok(projects)
    }

    fn find_recent_review_documents(&self, save_area: &str) -> Result<Vec<ReviewRecord>> {
        // No status filter on the review project: completed past reviews are
        // still history.
        let mut stmt = self.conn.prepare(
            r#"SELECT p.uuid, p.creationDate, c.notes
                 FROM TMTask p
                 LEFT JOIN TMTask c ON c.project = p.uuid AND c.type = 0 AND c.trashed = 0
                WHERE p.area = ?1 AND p.type = 1 AND p.trashed = 0
                ORDER BY p.creationDate, p.uuid, c."index""#,
        )?;
        let rows = stmt.query_map(params![save_area], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;

        let mut records: Vec<ReviewRecord> = Vec::new();
        let mut current_uuid: Option<String> = None;
        for row in rows {
            let (uuid, created, notes) = row?;
            if current_uuid.as_deref() != Some(uuid.as_str()) {
                let secs = created.unwrap_or(0.0) as i64;
                let created_at = DateTime::from_timestamp(secs, 0).ok_or_else(|| {
                    LookbackError::Store(format!(
                        "review project {uuid} has an out-of-range creation date"
                    ))
                })?;
                records.push(ReviewRecord {
                    created_at,
                    body: String::new(),
                });
                current_uuid = Some(uuid);
            }
            if let (Some(notes), Some(record)) = (notes, records.last_mut()) {
                if !notes.is_empty() {
                    if !record.body.is_empty() {
                        record.body.push('\n');
                    }
                    record.body.push_str(&notes);
                }
            }
        }
        Ok(records)
    }

    fn create_document(&self, save_area: &str, title: &str, body: &[BodyLine]) -> Result<()> {
        let url = Self::document_url(save_area, title, body)?;
        if self.dry_run {
            println!("{url}");
            return Ok(());
        }
        tracing::debug!(save_area, title, lines = body.len(), "launching creation URL");
        open::that(&url)
            .map_err(|e| LookbackError::Store(format!("failed to launch Things: {e}")))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
