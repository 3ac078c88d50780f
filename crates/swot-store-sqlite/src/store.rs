//! [`SqliteStore`] — the SQLite implementation of [`StudyStore`].

use std::{collections::HashSet, path::Path};

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use swot_core::{
  card::{CardEdit, Flashcard, NewFlashcard},
  paper::{NewPaper, Paper, PaperFilter},
  scheduler::{self, LeitnerBox, Rating},
  store::StudyStore,
  subject::Subject,
  user::{Credentials, User},
};

use crate::{
  Error, Result,
  encode::{RawFlashcard, RawPaper, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Swot study store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The
/// connection runs every `call` closure serially on one dedicated thread,
/// which is what makes multi-statement operations like the favorite
/// toggle atomic with respect to each other.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row mappers ─────────────────────────────────────────────────────────────

const PAPER_COLUMNS: &str = "p.id, p.subject_id, s.name, p.year, p.level, \
                             p.type, p.paper_number, p.filename";

fn paper_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPaper> {
  Ok(RawPaper {
    id:           row.get(0)?,
    subject_id:   row.get(1)?,
    subject_name: row.get(2)?,
    year:         row.get(3)?,
    level:        row.get(4)?,
    kind:         row.get(5)?,
    paper_number: row.get(6)?,
    filename:     row.get(7)?,
  })
}

const CARD_COLUMNS: &str = "f.id, f.user_id, f.subject_id, s.name, \
                            f.question, f.answer, f.leitner_box, \
                            f.next_review_date, f.last_reviewed";

fn card_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawFlashcard> {
  Ok(RawFlashcard {
    id:               row.get(0)?,
    user_id:          row.get(1)?,
    subject_id:       row.get(2)?,
    subject_name:     row.get(3)?,
    question:         row.get(4)?,
    answer:           row.get(5)?,
    leitner_box:      row.get(6)?,
    next_review_date: row.get(7)?,
    last_reviewed:    row.get(8)?,
  })
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── StudyStore impl ─────────────────────────────────────────────────────────

impl StudyStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(
    &self,
    username: String,
    password_hash: String,
  ) -> Result<Option<User>> {
    let name = username.clone();

    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        match conn.execute(
          "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
          rusqlite::params![name, password_hash],
        ) {
          Ok(_) => Ok(Some(conn.last_insert_rowid())),
          // Duplicate username: a domain outcome, not a store failure.
          Err(e) if is_constraint_violation(&e) => Ok(None),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    Ok(id.map(|id| User { id, username }))
  }

  async fn get_credentials(&self, username: String) -> Result<Option<Credentials>> {
    let raw: Option<(i64, String, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, username, password_hash FROM users WHERE username = ?1",
              rusqlite::params![username],
              |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(|(id, username, password_hash)| Credentials {
      user: User { id, username },
      password_hash,
    }))
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let subjects = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name FROM subjects ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Subject { id: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(subjects)
  }

  async fn add_subject(&self, name: String) -> Result<Subject> {
    let subject = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO subjects (name) VALUES (?1)",
          rusqlite::params![name],
        )?;
        let subject = conn.query_row(
          "SELECT id, name FROM subjects WHERE name = ?1",
          rusqlite::params![name],
          |row| Ok(Subject { id: row.get(0)?, name: row.get(1)? }),
        )?;
        Ok(subject)
      })
      .await?;

    Ok(subject)
  }

  async fn list_papers(
    &self,
    subject: String,
    filter: PaperFilter,
  ) -> Result<Vec<Paper>> {
    let raws: Vec<RawPaper> = self
      .conn
      .call(move |conn| {
        // Build the WHERE clause dynamically; filters are conjunctive.
        let mut sql = format!(
          "SELECT {PAPER_COLUMNS}
           FROM papers p
           JOIN subjects s ON s.id = p.subject_id
           WHERE s.name = ?1 COLLATE NOCASE"
        );
        let mut params: Vec<rusqlite::types::Value> =
          vec![subject.into()];

        if let Some(year) = filter.year {
          params.push(i64::from(year).into());
          sql.push_str(&format!(" AND p.year = ?{}", params.len()));
        }
        if let Some(level) = filter.level {
          params.push(level.as_str().to_owned().into());
          sql.push_str(&format!(" AND p.level = ?{}", params.len()));
        }
        if let Some(kind) = filter.kind {
          params.push(kind.as_str().to_owned().into());
          sql.push_str(&format!(" AND p.type = ?{}", params.len()));
        }
        if let Some(number) = filter.paper_number {
          params.push(i64::from(number).into());
          sql.push_str(&format!(" AND p.paper_number = ?{}", params.len()));
        }

        // The ordering is a contract, not incidental.
        sql.push_str(
          " ORDER BY p.year DESC, p.level ASC, p.paper_number ASC",
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), paper_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPaper::into_paper).collect()
  }

  async fn list_years(&self, subject: String) -> Result<Vec<i32>> {
    let years = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT p.year
           FROM papers p
           JOIN subjects s ON s.id = p.subject_id
           WHERE s.name = ?1 COLLATE NOCASE
           ORDER BY p.year DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![subject], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<i32>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(years)
  }

  async fn insert_paper(&self, paper: NewPaper) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO papers
             (subject_id, year, level, type, paper_number, filename)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            paper.subject_id,
            paper.year,
            paper.level.as_str(),
            paper.kind.as_str(),
            paper.paper_number,
            paper.filename,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn paper_filenames(&self) -> Result<HashSet<String>> {
    let filenames = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT filename FROM papers")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<HashSet<String>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(filenames)
  }

  async fn remove_paper(&self, filename: String) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM papers WHERE filename = ?1",
          rusqlite::params![filename],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(removed)
  }

  // ── Favorites ─────────────────────────────────────────────────────────────

  async fn toggle_favorite(&self, user_id: i64, paper_id: i64) -> Result<bool> {
    // Delete-first inside one call: the connection runs closures serially,
    // so there is no window for a concurrent toggle to double-insert.
    let active = self
      .conn
      .call(move |conn| {
        let removed = conn.execute(
          "DELETE FROM favorites WHERE user_id = ?1 AND paper_id = ?2",
          rusqlite::params![user_id, paper_id],
        )?;
        if removed > 0 {
          return Ok(false);
        }
        conn.execute(
          "INSERT INTO favorites (user_id, paper_id) VALUES (?1, ?2)",
          rusqlite::params![user_id, paper_id],
        )?;
        Ok(true)
      })
      .await?;

    Ok(active)
  }

  async fn list_favorites(&self, user_id: i64) -> Result<Vec<Paper>> {
    let raws: Vec<RawPaper> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PAPER_COLUMNS}
           FROM papers p
           JOIN favorites f ON f.paper_id = p.id
           JOIN subjects s ON s.id = p.subject_id
           WHERE f.user_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_id], paper_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPaper::into_paper).collect()
  }

  async fn favorite_ids(&self, user_id: i64) -> Result<HashSet<i64>> {
    let ids = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT paper_id FROM favorites WHERE user_id = ?1")?;
        let rows = stmt
          .query_map(rusqlite::params![user_id], |row| row.get(0))?
          .collect::<rusqlite::Result<HashSet<i64>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(ids)
  }

  // ── Flashcards ────────────────────────────────────────────────────────────

  async fn list_cards(&self, user_id: i64) -> Result<Vec<Flashcard>> {
    let raws: Vec<RawFlashcard> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CARD_COLUMNS}
           FROM flashcards f
           JOIN subjects s ON s.id = f.subject_id
           WHERE f.user_id = ?1
           ORDER BY f.id DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_id], card_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFlashcard::into_flashcard).collect()
  }

  async fn get_card(&self, user_id: i64, card_id: i64) -> Result<Option<Flashcard>> {
    let raw: Option<RawFlashcard> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CARD_COLUMNS}
                 FROM flashcards f
                 JOIN subjects s ON s.id = f.subject_id
                 WHERE f.id = ?1 AND f.user_id = ?2"
              ),
              rusqlite::params![card_id, user_id],
              card_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFlashcard::into_flashcard).transpose()
  }

  async fn create_card(&self, input: NewFlashcard) -> Result<Flashcard> {
    let now = Utc::now();
    let now_str = encode_dt(now);

    let user_id = input.user_id;
    let subject_id = input.subject_id;
    let question = input.question.clone();
    let answer = input.answer.clone();

    let (id, subject_name): (i64, String) = self
      .conn
      .call(move |conn| {
        let subject_name: String = conn.query_row(
          "SELECT name FROM subjects WHERE id = ?1",
          rusqlite::params![subject_id],
          |row| row.get(0),
        )?;
        conn.execute(
          "INSERT INTO flashcards
             (user_id, subject_id, question, answer, leitner_box, next_review_date)
           VALUES (?1, ?2, ?3, ?4, 1, ?5)",
          rusqlite::params![user_id, subject_id, question, answer, now_str],
        )?;
        Ok((conn.last_insert_rowid(), subject_name))
      })
      .await?;

    Ok(Flashcard {
      id,
      user_id:          input.user_id,
      subject_id:       input.subject_id,
      subject_name,
      question:         input.question,
      answer:           input.answer,
      leitner_box:      LeitnerBox::first(),
      next_review_date: now,
      last_reviewed:    None,
    })
  }

  async fn update_card(
    &self,
    user_id: i64,
    card_id: i64,
    edit: CardEdit,
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        // Compound predicate: affects zero rows for an unowned id.
        conn.execute(
          "UPDATE flashcards
           SET subject_id = ?1, question = ?2, answer = ?3
           WHERE id = ?4 AND user_id = ?5",
          rusqlite::params![
            edit.subject_id,
            edit.question,
            edit.answer,
            card_id,
            user_id,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_card(&self, user_id: i64, card_id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM flashcards WHERE id = ?1 AND user_id = ?2",
          rusqlite::params![card_id, user_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Review scheduling ─────────────────────────────────────────────────────

  async fn due_cards(&self, user_id: i64, now: DateTime<Utc>) -> Result<Vec<Flashcard>> {
    let now_str = encode_dt(now);

    let raws: Vec<RawFlashcard> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CARD_COLUMNS}
           FROM flashcards f
           JOIN subjects s ON s.id = f.subject_id
           WHERE f.user_id = ?1 AND f.next_review_date <= ?2
           ORDER BY f.next_review_date ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_id, now_str], card_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFlashcard::into_flashcard).collect()
  }

  async fn apply_review(
    &self,
    user_id: i64,
    card_id: i64,
    rating: Rating,
    now: DateTime<Utc>,
  ) -> Result<()> {
    let current: Option<i64> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT leitner_box FROM flashcards
               WHERE id = ?1 AND user_id = ?2",
              rusqlite::params![card_id, user_id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    // Unknown or unowned card: silent no-op so existence never leaks.
    let Some(raw_box) = current else {
      return Ok(());
    };
    let current_box = LeitnerBox::new(raw_box).map_err(Error::Core)?;

    let outcome = scheduler::apply(current_box, rating, now);
    let box_val = i64::from(outcome.leitner_box.value());
    let due_str = encode_dt(outcome.next_review);
    let reviewed_str = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE flashcards
           SET leitner_box = ?1, next_review_date = ?2, last_reviewed = ?3
           WHERE id = ?4 AND user_id = ?5",
          rusqlite::params![box_val, due_str, reviewed_str, card_id, user_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
