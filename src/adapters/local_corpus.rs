use crate::domain::model::{Question, QuestionId, Year};
use crate::domain::ports::CorpusSource;
use crate::utils::error::{Result, SearchError};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

const QUESTIONS_DIR: &str = "questions";
const DETAILS_FILE: &str = "details.json";

/// Corpus laid out as `<root>/<year>/questions/<id>/details.json`.
#[derive(Debug, Clone)]
pub struct LocalCorpus {
    root: PathBuf,
}

impl LocalCorpus {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn questions_dir(&self, year: Year) -> PathBuf {
        self.root.join(year.to_string()).join(QUESTIONS_DIR)
    }

    fn details_path(&self, year: Year, id: &QuestionId) -> PathBuf {
        self.questions_dir(year).join(&id.0).join(DETAILS_FILE)
    }
}

async fn list_dir_names(dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::debug!("Skipping non UTF-8 directory name {:?}", raw),
        }
    }

    Ok(names)
}

/// Orders question directory names by their leading number, then by the rest
/// of the name: `1`, `1-ingles`, `2`, `10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    fn split(name: &str) -> (Option<u64>, &str) {
        let digits = name.bytes().take_while(u8::is_ascii_digit).count();
        let number = name[..digits].parse::<u64>().ok();
        (number, &name[digits..])
    }

    match (split(a), split(b)) {
        ((Some(na), ra), (Some(nb), rb)) => na
            .cmp(&nb)
            .then_with(|| ra.cmp(rb))
            .then_with(|| a.cmp(b)),
        ((Some(_), _), (None, _)) => Ordering::Less,
        ((None, _), (Some(_), _)) => Ordering::Greater,
        ((None, _), (None, _)) => a.cmp(b),
    }
}

impl CorpusSource for LocalCorpus {
    async fn list_partitions(&self) -> Result<Vec<Year>> {
        let names = list_dir_names(&self.root).await.map_err(|e| SearchError::CorpusError {
            message: format!("cannot list corpus root {}: {}", self.root.display(), e),
        })?;

        let mut years: Vec<Year> = names.iter().filter_map(|n| Year::from_dir_name(n)).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        Ok(years)
    }

    async fn list_document_ids(&self, year: Year) -> Result<Option<Vec<QuestionId>>> {
        let dir = self.questions_dir(year);
        if !tokio::fs::try_exists(&dir).await? {
            return Ok(None);
        }

        let mut names = list_dir_names(&dir).await?;
        names.sort_by(|a, b| natural_cmp(a, b));
        Ok(Some(names.into_iter().map(QuestionId).collect()))
    }

    async fn load_document(&self, year: Year, id: &QuestionId) -> Option<Question> {
        let path = self.details_path(year, id);

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };

        let question: Question = match serde_json::from_slice(&raw) {
            Ok(question) => question,
            Err(e) => {
                tracing::debug!("Skipping {}: invalid question record: {}", path.display(), e);
                return None;
            }
        };

        if let Err(reason) = question.check_alternatives() {
            tracing::debug!("Skipping {}: {}", path.display(), reason);
            return None;
        }

        Some(question)
    }
}
