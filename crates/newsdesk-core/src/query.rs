use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("topic must be non-empty")]
    EmptyTopic,

    #[error("at least one non-blank keyword is required")]
    NoKeywords,
}

/// A validated search: a topic plus at least one keyword.
///
/// Themed searches always carry a topic. Keyword-only queries (topic empty)
/// exist for probing a single outlet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    topic: String,
    keywords: Vec<String>,
}

fn clean_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

impl SearchQuery {
    /// Builds a themed query, trimming inputs and dropping blank keywords.
    ///
    /// When no keyword survives, the topic itself becomes the sole keyword.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyTopic`] if the topic is blank after trimming.
    pub fn new<I, S>(topic: &str, keywords: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(QueryError::EmptyTopic);
        }

        let mut keywords = clean_keywords(keywords);
        if keywords.is_empty() {
            keywords.push(topic.to_string());
        }

        Ok(Self {
            topic: topic.to_string(),
            keywords,
        })
    }

    /// Builds a query with no topic. Similarity scoring then relies on
    /// keyword signals alone.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoKeywords`] if every keyword is blank.
    pub fn keywords_only<I, S>(keywords: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = clean_keywords(keywords);
        if keywords.is_empty() {
            return Err(QueryError::NoKeywords);
        }
        Ok(Self {
            topic: String::new(),
            keywords,
        })
    }

    /// Empty for keyword-only queries.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Text submitted to a site's own search page: the topic, or the first
    /// two keywords when there is none.
    #[must_use]
    pub fn search_terms(&self) -> String {
        if self.topic.is_empty() {
            self.keywords
                .iter()
                .take(2)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            self.topic.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_topic_is_rejected() {
        assert_eq!(SearchQuery::new("   ", ["AI"]), Err(QueryError::EmptyTopic));
    }

    #[test]
    fn empty_keywords_fall_back_to_topic() {
        let q = SearchQuery::new(" Cambio climático ", Vec::<String>::new()).unwrap();
        assert_eq!(q.topic(), "Cambio climático");
        assert_eq!(q.keywords(), ["Cambio climático".to_string()]);
    }

    #[test]
    fn blank_keywords_are_dropped() {
        let q = SearchQuery::new("Tecnología", ["tech", "  ", "innovación "]).unwrap();
        assert_eq!(q.keywords(), ["tech".to_string(), "innovación".to_string()]);
    }

    #[test]
    fn search_terms_prefer_topic() {
        let q = SearchQuery::new("Inteligencia Artificial", ["AI", "IA"]).unwrap();
        assert_eq!(q.search_terms(), "Inteligencia Artificial");
    }

    #[test]
    fn keyword_only_search_terms_use_first_two_keywords() {
        let q = SearchQuery::keywords_only(["robots", "drones", "sensores"]).unwrap();
        assert_eq!(q.topic(), "");
        assert_eq!(q.search_terms(), "robots drones");
    }

    #[test]
    fn keyword_only_requires_a_keyword() {
        assert_eq!(
            SearchQuery::keywords_only([" ", ""]),
            Err(QueryError::NoKeywords)
        );
    }
}
