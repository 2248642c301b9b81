use crate::core::matcher::match_question;
use crate::domain::model::{MatchRecord, SearchOptions, SearchOutcome};
use crate::domain::ports::CorpusSource;
use crate::utils::error::Result;

/// Full-scan keyword search over a [`CorpusSource`].
///
/// Every call walks the whole selected scope: partitions newest first, then
/// questions in corpus order. That walk order is the result order, and `total`
/// counts every match before the page window is applied.
pub struct SearchEngine<C: CorpusSource> {
    corpus: C,
}

impl<C: CorpusSource> SearchEngine<C> {
    pub fn new(corpus: C) -> Self {
        Self { corpus }
    }

    pub async fn search(&self, keyword: &str, options: SearchOptions) -> Result<SearchOutcome> {
        let normalized_keyword = keyword.to_lowercase();

        let partitions = self.corpus.list_partitions().await?;
        let partitions: Vec<_> = match options.year {
            Some(year) => partitions.into_iter().filter(|p| *p == year).collect(),
            None => partitions,
        };

        let mut matches: Vec<MatchRecord> = Vec::new();

        for year in partitions {
            let Some(question_ids) = self.corpus.list_document_ids(year).await? else {
                tracing::debug!("Partition {} has no questions directory, skipping", year);
                continue;
            };

            for question_id in question_ids {
                // one load at a time; no fan-out across questions
                let Some(question) = self.corpus.load_document(year, &question_id).await else {
                    continue;
                };

                if let Some(record) =
                    match_question(year, question_id, question, &normalized_keyword)
                {
                    matches.push(record);
                }
            }
        }

        let total = matches.len();
        let results: Vec<MatchRecord> = matches
            .into_iter()
            .skip(options.offset)
            .take(options.limit)
            .collect();

        tracing::debug!(
            "Search '{}' (year={:?}) matched {} questions, returning {} from offset {}",
            keyword,
            options.year,
            total,
            results.len(),
            options.offset
        );

        Ok(SearchOutcome { results, total })
    }
}
