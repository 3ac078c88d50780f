//! Seeding the catalog from a directory of PDF files.
//!
//! The papers directory is the source of truth: files that appear are
//! inserted, rows whose file vanished are removed, and anything that
//! doesn't follow the `{Subject}_{Year}_{Level}_{Type}_{Number}.pdf`
//! convention is skipped with a warning. Subjects are a fixed taxonomy,
//! so a file naming an unknown subject is also skipped rather than
//! creating one.

use std::{
  collections::{HashMap, HashSet},
  path::Path,
};

use swot_core::{paper::NewPaper, paper::PaperName, store::StudyStore};

/// What a sync run did, for logging.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
  pub added:   usize,
  pub removed: usize,
  pub skipped: usize,
}

/// Seed the configured subjects, then run a full sync.
pub async fn init<S>(
  store: &S,
  subjects: &[String],
  papers_dir: &Path,
) -> anyhow::Result<SyncReport>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  for name in subjects {
    let subject = store.add_subject(name.clone()).await?;
    tracing::info!(id = subject.id, name = %subject.name, "subject ready");
  }
  sync_papers(store, papers_dir).await
}

/// Reconcile the catalog with the contents of `papers_dir`.
pub async fn sync_papers<S>(
  store: &S,
  papers_dir: &Path,
) -> anyhow::Result<SyncReport>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let on_disk = pdf_filenames(papers_dir).await?;
  let in_store = store.paper_filenames().await?;

  let mut report = SyncReport::default();

  // Rows whose file is gone.
  for filename in in_store.difference(&on_disk) {
    if store.remove_paper(filename.clone()).await? {
      tracing::info!(%filename, "removed paper with no backing file");
      report.removed += 1;
    }
  }

  // Subject lookup is case-insensitive, same as the catalog queries.
  let subjects: HashMap<String, i64> = store
    .list_subjects()
    .await?
    .into_iter()
    .map(|s| (s.name.to_lowercase(), s.id))
    .collect();

  for filename in on_disk.difference(&in_store) {
    let name = match PaperName::parse(filename) {
      Ok(name) => name,
      Err(e) => {
        tracing::warn!(%filename, error = %e, "skipping unparseable file");
        report.skipped += 1;
        continue;
      }
    };

    let Some(&subject_id) = subjects.get(&name.subject.to_lowercase()) else {
      tracing::warn!(%filename, subject = %name.subject, "skipping unknown subject");
      report.skipped += 1;
      continue;
    };

    store
      .insert_paper(NewPaper {
        subject_id,
        year: name.year,
        level: name.level,
        kind: name.kind,
        paper_number: name.paper_number,
        filename: filename.clone(),
      })
      .await?;
    report.added += 1;
  }

  tracing::info!(
    added = report.added,
    removed = report.removed,
    skipped = report.skipped,
    "paper sync complete"
  );
  Ok(report)
}

/// The `.pdf` filenames directly inside `dir`. Subdirectories are not
/// descended into.
async fn pdf_filenames(dir: &Path) -> anyhow::Result<HashSet<String>> {
  let mut names = HashSet::new();
  let mut entries = tokio::fs::read_dir(dir).await?;
  while let Some(entry) = entries.next_entry().await? {
    if !entry.file_type().await?.is_file() {
      continue;
    }
    let name = entry.file_name();
    let Some(name) = name.to_str() else {
      continue;
    };
    if name.ends_with(".pdf") {
      names.insert(name.to_string());
    }
  }
  Ok(names)
}

#[cfg(test)]
mod tests {
  use super::*;
  use swot_store_sqlite::SqliteStore;

  async fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.add_subject("Biology".to_string()).await.unwrap();
    store
  }

  fn touch(dir: &Path, names: &[&str]) {
    for name in names {
      std::fs::write(dir.join(name), b"%PDF-1.4").unwrap();
    }
  }

  #[tokio::test]
  async fn sync_adds_removes_and_skips() {
    let store = seeded_store().await;
    let dir = tempdir();
    touch(dir.path(), &[
      "Biology_2021_HL_QP_1.pdf",
      "Biology_2021_HL_MS_1.pdf",
      "notes.pdf",                    // unparseable
      "Alchemy_2021_HL_QP_1.pdf",     // unknown subject
      "Biology_2021_HL_QP_1.txt",     // not a pdf, invisible to the scan
    ]);

    let report = sync_papers(&store, dir.path()).await.unwrap();
    assert_eq!(report, SyncReport { added: 2, removed: 0, skipped: 2 });

    // A second run is a no-op.
    let report = sync_papers(&store, dir.path()).await.unwrap();
    assert_eq!(report, SyncReport::default());

    // Deleting a file removes its row on the next run.
    std::fs::remove_file(dir.path().join("Biology_2021_HL_MS_1.pdf")).unwrap();
    let report = sync_papers(&store, dir.path()).await.unwrap();
    assert_eq!(report, SyncReport { added: 0, removed: 1, skipped: 2 });

    let remaining = store.paper_filenames().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.contains("Biology_2021_HL_QP_1.pdf"));
  }

  #[tokio::test]
  async fn subject_match_is_case_insensitive() {
    let store = seeded_store().await;
    let dir = tempdir();
    touch(dir.path(), &["biology_2022_SL_QP_2.pdf"]);

    let report = sync_papers(&store, dir.path()).await.unwrap();
    assert_eq!(report.added, 1);
  }

  #[tokio::test]
  async fn init_is_idempotent() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let dir = tempdir();
    let subjects = vec!["Biology".to_string(), "Chemistry".to_string()];

    init(&store, &subjects, dir.path()).await.unwrap();
    init(&store, &subjects, dir.path()).await.unwrap();

    assert_eq!(store.list_subjects().await.unwrap().len(), 2);
  }

  fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
  }
}
