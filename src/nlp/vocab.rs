//! Domain vocabulary, stopwords and the fixed trigger-phrase sets.

use std::{
    collections::HashSet,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{NluError, Result};

/// Semantic tag of a recognised domain term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Disease,
    Alias,
    Symptom,
    Complication,
}

impl Category {
    /// Iteration order used everywhere a deterministic category walk matters.
    pub const ALL: [Category; 4] = [
        Category::Disease,
        Category::Alias,
        Category::Symptom,
        Category::Complication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Disease => "Disease",
            Category::Alias => "Alias",
            Category::Symptom => "Symptom",
            Category::Complication => "Complication",
        }
    }

    /// Disease-like categories name the condition itself.
    pub fn is_disease_like(&self) -> bool {
        matches!(self, Category::Disease | Category::Alias)
    }

    /// Symptom-like categories describe what the patient experiences.
    pub fn is_symptom_like(&self) -> bool {
        matches!(self, Category::Symptom | Category::Complication)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query intent handed to the downstream query builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    #[serde(rename = "query_symptom")]
    QuerySymptom,
    #[serde(rename = "query_cureway")]
    QueryCureway,
    #[serde(rename = "query_period")]
    QueryPeriod,
    #[serde(rename = "query_rate")]
    QueryRate,
    #[serde(rename = "query_checklist")]
    QueryChecklist,
    #[serde(rename = "query_department")]
    QueryDepartment,
    #[serde(rename = "query_disease")]
    QueryDisease,
    #[serde(rename = "disease_describe")]
    DiseaseDescribe,
    #[serde(rename = "QA_matching")]
    QaMatching,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::QuerySymptom => "query_symptom",
            Intent::QueryCureway => "query_cureway",
            Intent::QueryPeriod => "query_period",
            Intent::QueryRate => "query_rate",
            Intent::QueryChecklist => "query_checklist",
            Intent::QueryDepartment => "query_department",
            Intent::QueryDisease => "query_disease",
            Intent::DiseaseDescribe => "disease_describe",
            Intent::QaMatching => "QA_matching",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = NluError;

    fn from_str(s: &str) -> Result<Self> {
        let intent = match s.trim() {
            "query_symptom" => Intent::QuerySymptom,
            "query_cureway" => Intent::QueryCureway,
            "query_period" => Intent::QueryPeriod,
            "query_rate" => Intent::QueryRate,
            "query_checklist" => Intent::QueryChecklist,
            "query_department" => Intent::QueryDepartment,
            "query_disease" => Intent::QueryDisease,
            "disease_describe" => Intent::DiseaseDescribe,
            "QA_matching" => Intent::QaMatching,
            other => return Err(NluError::UnknownIntent(other.to_string())),
        };
        Ok(intent)
    }
}

const SYMPTOM_PHRASES: &[&str] = &["症状", "表征", "现象", "症候", "表现", "行为", "状况"];

const CUREWAY_PHRASES: &[&str] = &[
    "药", "药品", "用药", "胶囊", "口服液", "炎片", "吃什么药", "用什么药", "怎么办",
    "买什么药", "怎么治疗", "如何医治", "怎么医治", "怎么治", "怎么医", "如何治",
    "医治方式", "疗法", "咋治", "咋办",
];

const LASTTIME_PHRASES: &[&str] = &[
    "周期", "多久", "多长时间", "多少时间", "几天", "几年", "多少天", "多少小时",
    "几个小时", "多少年", "多久能好", "痊愈", "康复",
];

const CUREPROB_PHRASES: &[&str] = &[
    "多大概率能治好", "多大几率能治好", "治好希望大么", "几率", "几成", "比例",
    "可能性", "能治", "可治", "可以治", "可以医", "能治好吗", "可以治好吗",
];

const CHECK_PHRASES: &[&str] = &[
    "检查", "检查项目", "查出", "项目", "测出", "试出", "查看", "化验", "体检",
];

const BELONG_PHRASES: &[&str] = &[
    "属于什么科", "属于", "什么科", "科室", "挂", "挂哪个", "哪个科", "科",
];

const DISEASE_PHRASES: &[&str] = &[
    "什么病", "啥病", "得了什么", "得了哪种", "怎么回事", "咋回事", "回事",
    "什么情况", "情况", "问题", "什么问题", "毛病", "什么毛病", "啥毛病",
];

/// One of the seven literal trigger-phrase sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Symptom,
    Cureway,
    Lasttime,
    Cureprob,
    Check,
    Belong,
    Disease,
}

impl TriggerKind {
    /// Fixed order: feature dimensions and rule evaluation both follow it.
    pub const ALL: [TriggerKind; 7] = [
        TriggerKind::Symptom,
        TriggerKind::Cureway,
        TriggerKind::Lasttime,
        TriggerKind::Cureprob,
        TriggerKind::Check,
        TriggerKind::Belong,
        TriggerKind::Disease,
    ];

    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            TriggerKind::Symptom => SYMPTOM_PHRASES,
            TriggerKind::Cureway => CUREWAY_PHRASES,
            TriggerKind::Lasttime => LASTTIME_PHRASES,
            TriggerKind::Cureprob => CUREPROB_PHRASES,
            TriggerKind::Check => CHECK_PHRASES,
            TriggerKind::Belong => BELONG_PHRASES,
            TriggerKind::Disease => DISEASE_PHRASES,
        }
    }

    /// Entity categories of which at least one must be present for the rule to fire.
    pub fn required_categories(&self) -> &'static [Category] {
        const DISEASE_OR_ALIAS: &[Category] = &[Category::Disease, Category::Alias];
        const ANY: &[Category] = &Category::ALL;
        const SYMPTOM_OR_COMPLICATION: &[Category] = &[Category::Symptom, Category::Complication];
        match self {
            TriggerKind::Symptom
            | TriggerKind::Lasttime
            | TriggerKind::Cureprob
            | TriggerKind::Check => DISEASE_OR_ALIAS,
            TriggerKind::Cureway | TriggerKind::Belong => ANY,
            TriggerKind::Disease => SYMPTOM_OR_COMPLICATION,
        }
    }

    pub fn intent(&self) -> Intent {
        match self {
            TriggerKind::Symptom => Intent::QuerySymptom,
            TriggerKind::Cureway => Intent::QueryCureway,
            TriggerKind::Lasttime => Intent::QueryPeriod,
            TriggerKind::Cureprob => Intent::QueryRate,
            TriggerKind::Check => Intent::QueryChecklist,
            TriggerKind::Belong => Intent::QueryDepartment,
            TriggerKind::Disease => Intent::QueryDisease,
        }
    }

    /// True when any phrase of the set occurs literally in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.phrases().iter().any(|phrase| text.contains(phrase))
    }

    /// Total literal occurrences of the set's phrases in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.phrases()
            .iter()
            .map(|phrase| text.matches(phrase).count())
            .sum()
    }
}

/// Locations of the four category word lists.
#[derive(Debug, Clone)]
pub struct VocabularyPaths {
    pub disease: PathBuf,
    pub alias: PathBuf,
    pub symptom: PathBuf,
    pub complication: PathBuf,
}

impl VocabularyPaths {
    pub fn get(&self, category: Category) -> &Path {
        match category {
            Category::Disease => &self.disease,
            Category::Alias => &self.alias,
            Category::Symptom => &self.symptom,
            Category::Complication => &self.complication,
        }
    }
}

/// Immutable per-category entity sets, deduplicated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: IndexMap<Category, IndexSet<String>>,
}

impl Vocabulary {
    /// Build from in-memory lists. Blank entries are dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, Vec<S>)>,
        S: Into<String>,
    {
        let mut vocab = Self::default();
        for category in Category::ALL {
            vocab.entries.insert(category, IndexSet::new());
        }
        for (category, words) in entries {
            let set = vocab.entries.entry(category).or_default();
            for word in words {
                let word: String = word.into();
                let word = word.trim();
                if !word.is_empty() {
                    set.insert(word.to_string());
                }
            }
        }
        vocab
    }

    /// Load the four category files. A missing or empty file is fatal.
    pub fn load(paths: &VocabularyPaths) -> Result<Self> {
        let mut lists = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let words = read_word_list(paths.get(category))?;
            info!(%category, count = words.len(), "loaded vocabulary");
            lists.push((category, words));
        }
        Ok(Self::from_entries(lists))
    }

    pub fn entries(&self, category: Category) -> impl Iterator<Item = &str> {
        self.entries
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Every term across all categories, in category order.
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.entries(category))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Words excluded from tokenisation.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn load(path: &Path) -> Result<Self> {
        let words = read_word_list(path)?;
        info!(count = words.len(), path = %path.display(), "loaded stopwords");
        Ok(Self::from_iter(words))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let words = iter
            .into_iter()
            .map(|w| {
                let w: String = w.into();
                w.trim().to_string()
            })
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }
}

/// Read one trimmed entry per line, skipping blanks.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|source| NluError::VocabularyIo {
        path: path.to_path_buf(),
        source,
    })?;
    let words: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        return Err(NluError::EmptyVocabulary(path.to_path_buf()));
    }
    Ok(words)
}
