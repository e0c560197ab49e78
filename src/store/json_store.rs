use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::session::result::QuizResult;
use crate::store::schema::ProgressData;

const PROGRESS_FILE: &str = "progress.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = Self::default_dir();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("japvoc")
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Load progress. Returns None if the file exists but cannot be parsed
    /// (schema mismatch / corruption).
    pub fn load_progress(&self) -> Option<ProgressData> {
        let path = self.file_path(PROGRESS_FILE);
        if path.exists() {
            let content = fs::read_to_string(&path).ok()?;
            serde_json::from_str(&content).ok()
        } else {
            // No file yet, not a schema mismatch
            Some(ProgressData::default())
        }
    }

    /// Progress to start from: stale or unreadable files are replaced by a
    /// fresh profile.
    pub fn load_progress_or_reset(&self) -> ProgressData {
        match self.load_progress() {
            Some(progress) if !progress.needs_reset() => progress,
            _ => {
                tracing::warn!(
                    path = %self.file_path(PROGRESS_FILE).display(),
                    "progress file unreadable or outdated, starting fresh"
                );
                ProgressData::default()
            }
        }
    }

    pub fn save_progress(&self, data: &ProgressData) -> Result<()> {
        self.save(PROGRESS_FILE, data)
    }

    /// Archive one finished quiz.
    pub fn append_result(&self, progress: &mut ProgressData, result: QuizResult) -> Result<()> {
        progress.record(result);
        self.save_progress(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::question::{Difficulty, QuestionType};
    use crate::session::result::EndReason;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn make_result(score: usize) -> QuizResult {
        QuizResult::new(
            "animals",
            Difficulty::Medium,
            QuestionType::MultipleChoice,
            score,
            4,
            4,
            20,
            score,
            Vec::new(),
            EndReason::Exhausted,
        )
    }

    #[test]
    fn test_missing_file_is_fresh_profile() {
        let (_dir, store) = make_test_store();
        let progress = store.load_progress().unwrap();
        assert_eq!(progress.total_quizzes, 0);
        assert!(progress.history.is_empty());
    }

    #[test]
    fn test_append_result_round_trip() {
        let (_dir, store) = make_test_store();
        let mut progress = store.load_progress_or_reset();
        store.append_result(&mut progress, make_result(3)).unwrap();
        store.append_result(&mut progress, make_result(4)).unwrap();

        let loaded = store.load_progress().unwrap();
        assert_eq!(loaded.total_quizzes, 2);
        assert_eq!(loaded.best_streak, 4);
        assert_eq!(loaded.history.len(), 2);
        assert_eq!(loaded.history[1].question_type, QuestionType::MultipleChoice);
    }

    #[test]
    fn test_save_leaves_no_tmp_file() {
        let (dir, store) = make_test_store();
        store.save_progress(&ProgressData::default()).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }

    #[test]
    fn test_corrupt_file_resets() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(PROGRESS_FILE), "{ not json").unwrap();
        assert!(store.load_progress().is_none());
        assert_eq!(store.load_progress_or_reset().total_quizzes, 0);
    }

    #[test]
    fn test_stale_schema_resets() {
        let (_dir, store) = make_test_store();
        let mut old = ProgressData::default();
        old.schema_version = 0;
        old.total_quizzes = 9;
        store.save_progress(&old).unwrap();
        assert_eq!(store.load_progress().unwrap().total_quizzes, 9);
        assert_eq!(store.load_progress_or_reset().total_quizzes, 0);
    }
}
