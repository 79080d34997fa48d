//! Employment-type vocabulary and per-category tallies
//!
//! Classification is an exact, case-insensitive match of the trimmed
//! `employmentType` value against a fixed alias table. There is no substring
//! matching: "retired - military" must not also count as
//! "military". Anything absent or outside the table lands in
//! [`EmploymentCategory::Uncategorized`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// Bucket a node contributes to when personnel are tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentCategory {
    Military,
    Official,
    Employee,
    Contractor,
    Retired,
    RetiredMilitary,
    Uncategorized,
}

/// Accepted spellings, already lower-cased. The native-language tokens are the
/// ones used by existing organization documents.
const ALIASES: &[(&str, EmploymentCategory)] = &[
    ("military", EmploymentCategory::Military),
    ("نظامی", EmploymentCategory::Military),
    ("official", EmploymentCategory::Official),
    ("regular", EmploymentCategory::Official),
    ("official/regular", EmploymentCategory::Official),
    ("رسمی", EmploymentCategory::Official),
    ("employee", EmploymentCategory::Employee),
    ("کارمند", EmploymentCategory::Employee),
    ("contractor", EmploymentCategory::Contractor),
    ("contract", EmploymentCategory::Contractor),
    ("قراردادی", EmploymentCategory::Contractor),
    ("retired", EmploymentCategory::Retired),
    ("بازنشسته", EmploymentCategory::Retired),
    ("retired-military", EmploymentCategory::RetiredMilitary),
    ("retired military", EmploymentCategory::RetiredMilitary),
    ("retired_military", EmploymentCategory::RetiredMilitary),
    ("بازنشسته - نظامی", EmploymentCategory::RetiredMilitary),
];

impl EmploymentCategory {
    /// All buckets in reporting order.
    pub const ALL: [EmploymentCategory; 7] = [
        EmploymentCategory::Military,
        EmploymentCategory::Official,
        EmploymentCategory::Employee,
        EmploymentCategory::Contractor,
        EmploymentCategory::Retired,
        EmploymentCategory::RetiredMilitary,
        EmploymentCategory::Uncategorized,
    ];

    /// Classify a raw `employmentType` value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orgchart_core::models::EmploymentCategory;
    ///
    /// assert_eq!(EmploymentCategory::classify(Some(" Military ")), EmploymentCategory::Military);
    /// assert_eq!(EmploymentCategory::classify(Some("part-time")), EmploymentCategory::Uncategorized);
    /// assert_eq!(EmploymentCategory::classify(None), EmploymentCategory::Uncategorized);
    /// ```
    pub fn classify(raw: Option<&str>) -> Self {
        raw.and_then(Self::lookup)
            .unwrap_or(EmploymentCategory::Uncategorized)
    }

    /// Whether `raw` is part of the recognized vocabulary.
    pub fn is_recognized(raw: &str) -> bool {
        Self::lookup(raw).is_some()
    }

    fn lookup(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, category)| *category)
    }

    /// Canonical token, as used in serialized counts.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentCategory::Military => "military",
            EmploymentCategory::Official => "official",
            EmploymentCategory::Employee => "employee",
            EmploymentCategory::Contractor => "contractor",
            EmploymentCategory::Retired => "retired",
            EmploymentCategory::RetiredMilitary => "retired-military",
            EmploymentCategory::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for EmploymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One counter per [`EmploymentCategory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    #[serde(default)]
    pub military: usize,
    #[serde(default)]
    pub official: usize,
    #[serde(default)]
    pub employee: usize,
    #[serde(default)]
    pub contractor: usize,
    #[serde(default)]
    pub retired: usize,
    #[serde(default)]
    pub retired_military: usize,
    #[serde(default)]
    pub uncategorized: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: EmploymentCategory) -> usize {
        match category {
            EmploymentCategory::Military => self.military,
            EmploymentCategory::Official => self.official,
            EmploymentCategory::Employee => self.employee,
            EmploymentCategory::Contractor => self.contractor,
            EmploymentCategory::Retired => self.retired,
            EmploymentCategory::RetiredMilitary => self.retired_military,
            EmploymentCategory::Uncategorized => self.uncategorized,
        }
    }

    pub fn increment(&mut self, category: EmploymentCategory) {
        let slot = match category {
            EmploymentCategory::Military => &mut self.military,
            EmploymentCategory::Official => &mut self.official,
            EmploymentCategory::Employee => &mut self.employee,
            EmploymentCategory::Contractor => &mut self.contractor,
            EmploymentCategory::Retired => &mut self.retired,
            EmploymentCategory::RetiredMilitary => &mut self.retired_military,
            EmploymentCategory::Uncategorized => &mut self.uncategorized,
        };
        *slot += 1;
    }

    /// Sum over every bucket.
    pub fn total(&self) -> usize {
        EmploymentCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }
}

impl AddAssign for CategoryCounts {
    fn add_assign(&mut self, other: Self) {
        self.military += other.military;
        self.official += other.official;
        self.employee += other.employee;
        self.contractor += other.contractor;
        self.retired += other.retired;
        self.retired_military += other.retired_military;
        self.uncategorized += other.uncategorized;
    }
}
