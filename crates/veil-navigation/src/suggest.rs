//! Address bar suggestions

/// Most suggestions shown under the address bar
pub const MAX_SUGGESTIONS: usize = 5;

/// Input must be longer than this many characters before suggesting
pub const MIN_QUERY_CHARS: usize = 2;

const DEFAULT_CORPUS: &[&str] = &[
    "поехали.dev - создание сайтов",
    "poehali.dev документация",
    "поиск в Google",
    "YouTube - видео",
    "GitHub - репозитории",
];

pub fn default_corpus() -> Vec<String> {
    DEFAULT_CORPUS.iter().map(|s| s.to_string()).collect()
}

/// Filter `corpus` with the default limits
pub fn suggest<S: AsRef<str>>(input: &str, corpus: &[S]) -> Vec<String> {
    filter(input, corpus, MAX_SUGGESTIONS, MIN_QUERY_CHARS)
}

/// Case-insensitive substring filter over a fixed corpus
#[derive(Debug, Clone)]
pub struct Suggester {
    corpus: Vec<String>,
    limit: usize,
    min_query_chars: usize,
}

impl Suggester {
    pub fn new(corpus: Vec<String>) -> Self {
        Self {
            corpus,
            limit: MAX_SUGGESTIONS,
            min_query_chars: MIN_QUERY_CHARS,
        }
    }

    pub fn with_limits(mut self, limit: usize, min_query_chars: usize) -> Self {
        self.limit = limit;
        self.min_query_chars = min_query_chars;
        self
    }

    pub fn corpus(&self) -> &[String] {
        &self.corpus
    }

    pub fn suggest(&self, input: &str) -> Vec<String> {
        filter(input, &self.corpus, self.limit, self.min_query_chars)
    }
}

impl Default for Suggester {
    fn default() -> Self {
        Self::new(default_corpus())
    }
}

fn filter<S: AsRef<str>>(
    input: &str,
    corpus: &[S],
    limit: usize,
    min_query_chars: usize,
) -> Vec<String> {
    if input.chars().count() <= min_query_chars {
        return Vec::new();
    }

    let needle = input.to_lowercase();
    corpus
        .iter()
        .filter_map(|candidate| {
            let candidate: &str = candidate.as_ref();
            candidate
                .to_lowercase()
                .contains(&needle)
                .then(|| candidate.to_string())
        })
        .take(limit)
        .collect()
}
