//! Question bank
//!
//! Loaded once at startup from CSV with the header
//! `question,optionA,optionB,optionC,correct`. Row order is question order.
//! The bank is immutable once loaded.

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three answer slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
}

impl OptionKey {
    /// All keys in display order (top to bottom)
    pub const ALL: [OptionKey; 3] = [OptionKey::A, OptionKey::B, OptionKey::C];

    /// Display position, 0 at the top
    pub fn index(&self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
        }
    }

    /// CSV column holding this option's text
    pub fn column(&self) -> &'static str {
        match self {
            OptionKey::A => "optionA",
            OptionKey::B => "optionB",
            OptionKey::C => "optionC",
        }
    }

    /// Parse a `correct` cell: the option column name (`optionA`) or the bare key (`A`)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| s == k.column() || s.eq_ignore_ascii_case(k.as_str()))
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub prompt: String,
    /// Option texts indexed by `OptionKey::index`
    pub options: [String; 3],
    pub correct: OptionKey,
}

impl QuestionRecord {
    pub fn new(prompt: &str, a: &str, b: &str, c: &str, correct: OptionKey) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: [a.to_string(), b.to_string(), c.to_string()],
            correct,
        }
    }

    pub fn option(&self, key: OptionKey) -> &str {
        &self.options[key.index()]
    }

    pub fn is_correct(&self, key: OptionKey) -> bool {
        self.correct == key
    }
}

/// Why a question bank could not be loaded
#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to open question file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("header is missing column `{field}`")]
    MissingColumn { field: &'static str },
    #[error("row {row}: no value for `{field}`")]
    MissingField { row: usize, field: &'static str },
    #[error("row {row}: column `{field}` is blank")]
    BlankField { row: usize, field: &'static str },
    #[error("row {row}: `correct` must name optionA, optionB or optionC, got `{value}`")]
    InvalidCorrect { row: usize, value: String },
}

/// Column positions resolved from the header row
struct Columns {
    question: usize,
    options: [usize; 3],
    correct: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, BankError> {
        let find = |field: &'static str| {
            headers
                .iter()
                .position(|h| h == field)
                .ok_or(BankError::MissingColumn { field })
        };
        Ok(Self {
            question: find("question")?,
            options: [find("optionA")?, find("optionB")?, find("optionC")?],
            correct: find("correct")?,
        })
    }

    fn record(&self, rec: &csv::StringRecord, row: usize) -> Result<QuestionRecord, BankError> {
        let field = |idx: usize, name: &'static str| -> Result<String, BankError> {
            let value = rec
                .get(idx)
                .ok_or(BankError::MissingField { row, field: name })?;
            if value.is_empty() {
                return Err(BankError::BlankField { row, field: name });
            }
            Ok(value.to_string())
        };

        let prompt = field(self.question, "question")?;
        let a = field(self.options[0], "optionA")?;
        let b = field(self.options[1], "optionB")?;
        let c = field(self.options[2], "optionC")?;
        let correct_raw = field(self.correct, "correct")?;
        let correct = OptionKey::parse(&correct_raw).ok_or(BankError::InvalidCorrect {
            row,
            value: correct_raw,
        })?;

        Ok(QuestionRecord {
            prompt,
            options: [a, b, c],
            correct,
        })
    }
}

/// Ordered, immutable list of questions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }

    /// Parse CSV from any reader, failing on the first invalid row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BankError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns = Columns::resolve(rdr.headers()?)?;
        let mut questions = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let rec = result?;
            questions.push(columns.record(&rec, i + 1)?);
        }

        if questions.is_empty() {
            log::warn!("Question bank is empty");
        } else {
            log::info!("Loaded {} questions", questions.len());
        }

        Ok(Self { questions })
    }

    pub fn from_csv_str(csv: &str) -> Result<Self, BankError> {
        Self::from_reader(csv.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }
}
