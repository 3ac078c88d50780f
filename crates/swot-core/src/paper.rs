//! Exam paper types and the on-disk filename convention.
//!
//! Papers are immutable after seeding; their lifecycle is tied to the
//! scan of the papers directory (see `swot-server`'s sync subcommand).

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Level ───────────────────────────────────────────────────────────────────

/// Course level of a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
  /// Higher level.
  HL,
  /// Standard level.
  SL,
}

impl Level {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::HL => "HL",
      Self::SL => "SL",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "HL" => Ok(Self::HL),
      "SL" => Ok(Self::SL),
      other => Err(Error::UnknownLevel(other.to_owned())),
    }
  }
}

// ─── PaperKind ───────────────────────────────────────────────────────────────

/// Whether a paper is the question paper itself or its mark scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperKind {
  #[serde(rename = "QP")]
  QuestionPaper,
  #[serde(rename = "MS")]
  MarkScheme,
}

impl PaperKind {
  /// The two-letter code used in filenames and the `type` column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::QuestionPaper => "QP",
      Self::MarkScheme => "MS",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "QP" => Ok(Self::QuestionPaper),
      "MS" => Ok(Self::MarkScheme),
      other => Err(Error::UnknownPaperKind(other.to_owned())),
    }
  }
}

// ─── Paper ───────────────────────────────────────────────────────────────────

/// An exam paper, with its subject name joined in at the store boundary.
#[derive(Debug, Clone, Serialize)]
pub struct Paper {
  pub id:           i64,
  pub subject_id:   i64,
  pub subject_name: String,
  pub year:         i32,
  pub level:        Level,
  pub kind:         PaperKind,
  pub paper_number: i32,
  /// Unique on-disk filename; see [`PaperName`] for the convention.
  pub filename:     String,
}

/// Input to [`crate::store::StudyStore::insert_paper`].
#[derive(Debug, Clone)]
pub struct NewPaper {
  pub subject_id:   i64,
  pub year:         i32,
  pub level:        Level,
  pub kind:         PaperKind,
  pub paper_number: i32,
  pub filename:     String,
}

/// Conjunctive equality filters for
/// [`crate::store::StudyStore::list_papers`]. `None` means "don't filter
/// on this attribute".
#[derive(Debug, Clone, Default)]
pub struct PaperFilter {
  pub year:         Option<i32>,
  pub level:        Option<Level>,
  pub kind:         Option<PaperKind>,
  pub paper_number: Option<i32>,
}

// ─── Filename convention ─────────────────────────────────────────────────────

/// The components parsed from a `{Subject}_{Year}_{Level}_{Type}_{Number}.pdf`
/// filename. The subject is left as the raw string; resolution against the
/// taxonomy happens at sync time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperName {
  pub subject:      String,
  pub year:         i32,
  pub level:        Level,
  pub kind:         PaperKind,
  pub paper_number: i32,
}

impl PaperName {
  /// Parse a paper filename. Trailing components beyond the fifth are
  /// ignored, matching the seeding convention.
  pub fn parse(filename: &str) -> Result<Self> {
    let malformed = || Error::MalformedFilename(filename.to_owned());

    let stem = filename.strip_suffix(".pdf").ok_or_else(malformed)?;
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 5 {
      return Err(malformed());
    }

    let year: i32 = parts[1].parse().map_err(|_| malformed())?;
    let level = Level::parse(parts[2])?;
    let kind = PaperKind::parse(parts[3])?;
    let paper_number: i32 = parts[4].parse().map_err(|_| malformed())?;

    Ok(Self {
      subject: parts[0].to_owned(),
      year,
      level,
      kind,
      paper_number,
    })
  }
}
