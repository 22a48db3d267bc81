//! Read options

use chrono::NaiveDate;

/// How parse failures during typed coercion are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoercionPolicy {
    /// Malformed text reads as "no value" (`None`, or the type's zero)
    #[default]
    Lenient,
    /// Malformed text raises [`Error::MalformedValue`](crate::Error::MalformedValue)
    Strict,
}

/// Serial date system of a workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSystem {
    /// Serial 0 is 1899-12-30 (OLE Automation dates)
    #[default]
    Excel1900,
    /// Serial 0 is 1904-01-01
    Excel1904,
}

impl DateSystem {
    /// The calendar date of serial 0
    pub fn epoch(self) -> NaiveDate {
        match self {
            DateSystem::Excel1900 => NaiveDate::from_ymd_opt(1899, 12, 30),
            DateSystem::Excel1904 => NaiveDate::from_ymd_opt(1904, 1, 1),
        }
        .unwrap_or_default()
    }
}

/// Options for reading a document
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Parse failure policy (default: lenient)
    pub policy: CoercionPolicy,
    /// Date system override; `None` follows the workbook's declaration
    pub date_system: Option<DateSystem>,
}

impl ReadOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parse failure policy
    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Force a date system regardless of the workbook's declaration
    pub fn with_date_system(mut self, date_system: DateSystem) -> Self {
        self.date_system = Some(date_system);
        self
    }
}
