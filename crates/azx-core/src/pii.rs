//! PII entity model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Categories of personally identifiable information the detectors know
/// about. The serialized form matches the labels the detection prompt asks
/// the model to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiKind {
    Ssn,
    Email,
    Phone,
    Address,
    CreditCard,
    Name,
    DateOfBirth,
    DriverLicense,
    Passport,
    BankAccount,
    IpAddress,
    Url,
}

impl PiiKind {
    /// Short label spliced into redaction markers, e.g. `[REDACTED-SSN]`.
    pub fn label(&self) -> &'static str {
        match self {
            PiiKind::Ssn => "SSN",
            PiiKind::Email => "EMAIL",
            PiiKind::Phone => "PHONE",
            PiiKind::Address => "ADDRESS",
            PiiKind::CreditCard => "CREDIT_CARD",
            PiiKind::Name => "NAME",
            PiiKind::DateOfBirth => "DATE_OF_BIRTH",
            PiiKind::DriverLicense => "DRIVER_LICENSE",
            PiiKind::Passport => "PASSPORT",
            PiiKind::BankAccount => "BANK_ACCOUNT",
            PiiKind::IpAddress => "IP_ADDRESS",
            PiiKind::Url => "URL",
        }
    }

    /// Human-readable name used in report summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            PiiKind::Ssn => "Social Security Number",
            PiiKind::Email => "Email Address",
            PiiKind::Phone => "Phone Number",
            PiiKind::Address => "Physical Address",
            PiiKind::CreditCard => "Credit Card Number",
            PiiKind::Name => "Person Name",
            PiiKind::DateOfBirth => "Date of Birth",
            PiiKind::DriverLicense => "Driver License",
            PiiKind::Passport => "Passport Number",
            PiiKind::BankAccount => "Bank Account Number",
            PiiKind::IpAddress => "IP Address",
            PiiKind::Url => "URL",
        }
    }
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PiiKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SSN" => Ok(PiiKind::Ssn),
            "EMAIL" => Ok(PiiKind::Email),
            "PHONE" => Ok(PiiKind::Phone),
            "ADDRESS" => Ok(PiiKind::Address),
            "CREDIT_CARD" => Ok(PiiKind::CreditCard),
            "NAME" => Ok(PiiKind::Name),
            "DATE_OF_BIRTH" => Ok(PiiKind::DateOfBirth),
            "DRIVER_LICENSE" => Ok(PiiKind::DriverLicense),
            "PASSPORT" => Ok(PiiKind::Passport),
            "BANK_ACCOUNT" => Ok(PiiKind::BankAccount),
            "IP_ADDRESS" => Ok(PiiKind::IpAddress),
            "URL" => Ok(PiiKind::Url),
            other => Err(Error::UnknownPiiType(other.to_string())),
        }
    }
}

/// A detected span of PII in a block of text.
///
/// `start` and `end` are byte offsets into the analyzed text, end-exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiEntity {
    pub text: String,
    pub kind: PiiKind,
    pub confidence: f64,
    pub start: usize,
    pub end: usize,
}

impl PiiEntity {
    pub fn new(
        text: impl Into<String>,
        kind: PiiKind,
        confidence: f64,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            text: text.into(),
            kind,
            confidence,
            start,
            end,
        }
    }
}
