use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn connect(path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
    }
    let conn = Connection::open(path).with_context(|| format!("Failed to open {}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS pair (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            day           VARCHAR(16)  NOT NULL,
            lesson_number INT          NOT NULL,
            week_number   VARCHAR(32)  NOT NULL,
            group_name    VARCHAR(16)  NOT NULL,
            teacher_name  VARCHAR(64)  NOT NULL,
            lesson        VARCHAR(128) NOT NULL,
            lesson_type   VARCHAR(4)   NOT NULL,
            auditorium    VARCHAR(8)   NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_pair_group ON pair(group_name);

        CREATE TABLE IF NOT EXISTS schedule_files (
            id            INTEGER PRIMARY KEY,
            institute     TEXT NOT NULL,
            semester      INTEGER NOT NULL CHECK(semester IN (1, 2)),
            url           TEXT NOT NULL,
            path          TEXT,
            error         TEXT,
            downloaded_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(institute, url)
        );
        CREATE INDEX IF NOT EXISTS idx_files_institute ON schedule_files(institute);
        ",
    )?;
    Ok(())
}

// ── Lessons ──

/// One class session. Every field is required: a row can only be inserted
/// once it is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRow {
    pub day: String,
    pub lesson_number: i64,
    pub week_number: String,
    pub group_name: String,
    pub teacher_name: String,
    pub lesson: String,
    pub lesson_type: String,
    pub auditorium: String,
}

pub fn insert_pairs(conn: &Connection, rows: &[PairRow]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO pair
             (day, lesson_number, week_number, group_name, teacher_name, lesson, lesson_type, auditorium)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for r in rows {
            count += stmt.execute(rusqlite::params![
                r.day,
                r.lesson_number,
                r.week_number,
                r.group_name,
                r.teacher_name,
                r.lesson,
                r.lesson_type,
                r.auditorium,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub fn fetch_pairs(conn: &Connection, group: Option<&str>, limit: usize) -> Result<Vec<PairRow>> {
    let mut conditions = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(g) = group {
        conditions.push(format!("group_name = ?{}", params.len() + 1));
        params.push(Box::new(g.to_string()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT day, lesson_number, week_number, group_name, teacher_name, lesson, lesson_type, auditorium
         FROM pair{}
         ORDER BY id
         LIMIT {}",
        where_clause, limit
    );

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt
        .query_map(param_refs.as_slice(), |row| {
            Ok(PairRow {
                day: row.get(0)?,
                lesson_number: row.get(1)?,
                week_number: row.get(2)?,
                group_name: row.get(3)?,
                teacher_name: row.get(4)?,
                lesson: row.get(5)?,
                lesson_type: row.get(6)?,
                auditorium: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Downloaded files ──

pub struct FileRecord {
    pub institute: String,
    pub semester: u8,
    pub url: String,
    pub path: Option<String>,
    pub error: Option<String>,
}

pub fn save_file_records(conn: &Connection, rows: &[FileRecord]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO schedule_files (institute, semester, url, path, error)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for r in rows {
            stmt.execute(rusqlite::params![
                r.institute,
                r.semester,
                r.url,
                r.path,
                r.error,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

// ── Stats ──

pub struct Stats {
    pub institutes: usize,
    pub files: usize,
    pub downloaded: usize,
    pub errors: usize,
    pub pairs: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let institutes: usize = conn.query_row(
        "SELECT COUNT(DISTINCT institute) FROM schedule_files",
        [],
        |r| r.get(0),
    )?;
    let files: usize = conn.query_row("SELECT COUNT(*) FROM schedule_files", [], |r| r.get(0))?;
    let downloaded: usize = conn.query_row(
        "SELECT COUNT(*) FROM schedule_files WHERE path IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let errors: usize = conn.query_row(
        "SELECT COUNT(*) FROM schedule_files WHERE error IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let pairs: usize = conn.query_row("SELECT COUNT(*) FROM pair", [], |r| r.get(0))?;
    Ok(Stats {
        institutes,
        files,
        downloaded,
        errors,
        pairs,
    })
}

// ── Tests ──
