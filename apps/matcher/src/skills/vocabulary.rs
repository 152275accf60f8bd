//! The fixed skill vocabulary the extractor matches against.
//!
//! Terms are data: extending the vocabulary (built-in lists below, or an
//! extra terms file at startup) needs no code change anywhere else.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::skills::tokenizer::{phrase_key, MAX_NGRAM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Language,
    Framework,
    Database,
    DevopsCloud,
    Tool,
    Methodology,
    Other,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Language => "language",
            SkillCategory::Framework => "framework",
            SkillCategory::Database => "database",
            SkillCategory::DevopsCloud => "devops_cloud",
            SkillCategory::Tool => "tool",
            SkillCategory::Methodology => "methodology",
            SkillCategory::Other => "other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "language" => Ok(SkillCategory::Language),
            "framework" => Ok(SkillCategory::Framework),
            "database" => Ok(SkillCategory::Database),
            "devops_cloud" | "devops" | "cloud" => Ok(SkillCategory::DevopsCloud),
            "tool" => Ok(SkillCategory::Tool),
            "methodology" => Ok(SkillCategory::Methodology),
            "other" => Ok(SkillCategory::Other),
            other => Err(format!("unknown skill category '{other}'")),
        }
    }
}

const LANGUAGES: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "java",
    "go",
    "golang",
    "rust",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "scala",
    "objective-c",
    "perl",
    "haskell",
    "elixir",
    "clojure",
    "dart",
    "lua",
    "matlab",
    "sql",
    "bash",
    "shell",
    "powershell",
    "html",
    "css",
    "sass",
    "graphql",
];

const FRAMEWORKS: &[&str] = &[
    "react",
    "react native",
    "angular",
    "vue",
    "vue.js",
    "svelte",
    "next.js",
    "nuxt",
    "node.js",
    "express",
    "django",
    "flask",
    "fastapi",
    "spring",
    "spring boot",
    "rails",
    "ruby on rails",
    "laravel",
    "asp.net",
    "flutter",
    "jquery",
    "bootstrap",
    "tailwind",
    "redux",
    "tensorflow",
    "pytorch",
    "keras",
    "scikit-learn",
    "pandas",
    "numpy",
    "actix",
    "axum",
    "tokio",
];

const DATABASES: &[&str] = &[
    "mysql",
    "postgresql",
    "postgres",
    "mongodb",
    "redis",
    "sqlite",
    "oracle",
    "sql server",
    "mariadb",
    "cassandra",
    "dynamodb",
    "elasticsearch",
    "neo4j",
    "firebase",
    "supabase",
    "snowflake",
];

const DEVOPS_CLOUD: &[&str] = &[
    "docker",
    "kubernetes",
    "k8s",
    "helm",
    "terraform",
    "ansible",
    "jenkins",
    "circleci",
    "github actions",
    "gitlab ci",
    "ci/cd",
    "aws",
    "aws lambda",
    "azure",
    "gcp",
    "google cloud",
    "heroku",
    "cloudformation",
    "serverless",
    "nginx",
    "linux",
    "prometheus",
    "grafana",
];

const TOOLS: &[&str] = &[
    "git",
    "github",
    "gitlab",
    "jira",
    "confluence",
    "figma",
    "postman",
    "webpack",
    "vite",
    "jest",
    "cypress",
    "selenium",
    "pytest",
    "junit",
    "kafka",
    "rabbitmq",
    "spark",
    "hadoop",
    "airflow",
    "tableau",
    "power bi",
    "excel",
];

const METHODOLOGIES: &[&str] = &[
    "agile",
    "scrum",
    "kanban",
    "tdd",
    "test driven development",
    "unit testing",
    "continuous integration",
    "devops",
    "microservices",
    "restful",
    "rest api",
    "system design",
    "distributed systems",
    "object oriented programming",
    "oop",
    "machine learning",
    "deep learning",
    "data analysis",
    "data science",
    "natural language processing",
    "nlp",
    "computer vision",
    "a/b testing",
];

static BUILTIN: Lazy<Arc<SkillVocabulary>> = Lazy::new(|| {
    let mut vocabulary = SkillVocabulary::default();
    let groups = [
        (SkillCategory::Language, LANGUAGES),
        (SkillCategory::Framework, FRAMEWORKS),
        (SkillCategory::Database, DATABASES),
        (SkillCategory::DevopsCloud, DEVOPS_CLOUD),
        (SkillCategory::Tool, TOOLS),
        (SkillCategory::Methodology, METHODOLOGIES),
    ];
    for (category, terms) in groups {
        for term in terms {
            vocabulary.insert(term, category);
        }
    }
    Arc::new(vocabulary)
});

#[derive(Debug, Clone)]
struct VocabularyEntry {
    term: String,
    category: SkillCategory,
}

/// Case-insensitive, exact-phrase skill lookup.
///
/// Entries are keyed by their tokenized form, so a term spelled with
/// punctuation (`ci/cd`) is found in text that went through the same
/// normalization (`ci cd`) and is reported back in its canonical spelling.
#[derive(Debug, Clone, Default)]
pub struct SkillVocabulary {
    entries: HashMap<String, VocabularyEntry>,
}

impl SkillVocabulary {
    /// Process-wide built-in vocabulary, built once on first use.
    pub fn builtin() -> Arc<SkillVocabulary> {
        Arc::clone(&BUILTIN)
    }

    pub fn from_terms<'a>(terms: impl IntoIterator<Item = (&'a str, SkillCategory)>) -> Self {
        let mut vocabulary = SkillVocabulary::default();
        for (term, category) in terms {
            vocabulary.insert(term, category);
        }
        vocabulary
    }

    /// Built-in vocabulary extended with the terms listed in `path`.
    ///
    /// One term per line; blank lines and `#` comments are skipped. A line
    /// may be prefixed with a category (`database: clickhouse`), otherwise
    /// the term is filed under [`SkillCategory::Other`].
    pub fn with_terms_from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut vocabulary = SkillVocabulary::builtin().as_ref().clone();
        let added = vocabulary.extend_from_lines(&contents);
        info!(
            path = %path.display(),
            added,
            total = vocabulary.len(),
            "Loaded extra skill vocabulary"
        );
        Ok(vocabulary)
    }

    /// Adds every valid line of a terms listing; returns how many were new.
    pub fn extend_from_lines(&mut self, contents: &str) -> usize {
        let mut added = 0;
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (category, term) = split_category(line);
            if self.insert(term, category) {
                added += 1;
            }
        }
        added
    }

    /// Inserts a term; rejects empty, over-long and colliding phrases.
    fn insert(&mut self, term: &str, category: SkillCategory) -> bool {
        let canonical = term.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        let key = phrase_key(&canonical);
        let words = key.split(' ').count();

        if key.is_empty() || words > MAX_NGRAM {
            warn!(term, "Skipping skill term outside the 1-{MAX_NGRAM} word range");
            return false;
        }
        if let Some(existing) = self.entries.get(&key) {
            if existing.term != canonical {
                warn!(
                    term,
                    existing = %existing.term,
                    "Skipping skill term that collides with an existing entry"
                );
            }
            return false;
        }

        self.entries.insert(
            key,
            VocabularyEntry {
                term: canonical,
                category,
            },
        );
        true
    }

    /// Canonical term for an already-normalized phrase key.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.term.as_str())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(&phrase_key(term))
    }

    pub fn category_of(&self, term: &str) -> Option<SkillCategory> {
        self.entries.get(&phrase_key(term)).map(|e| e.category)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.term.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn split_category(line: &str) -> (SkillCategory, &str) {
    if let Some((prefix, rest)) = line.split_once(':') {
        if let Ok(category) = prefix.parse::<SkillCategory>() {
            return (category, rest.trim());
        }
    }
    (SkillCategory::Other, line)
}
