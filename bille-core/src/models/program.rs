use std::fmt;

use serde::{Deserialize, Serialize};

/// Primary insurance carried by the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceType {
    Medicare,
    Commercial,
}

impl InsuranceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medicare => "Medicare",
            Self::Commercial => "Commercial",
        }
    }

    /// Case-insensitive parse of the display name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "medicare" => Some(Self::Medicare),
            "commercial" => Some(Self::Commercial),
            _ => None,
        }
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary program the patient is routed to once FPL is known.
///
/// | Insurance  | FPL                     | Path           |
/// |------------|-------------------------|----------------|
/// | Medicare   | at or below the ceiling | DOH Copay Card |
/// | Commercial | below the LPAP ceiling  | LPAP           |
/// | Commercial | at or above it          | MEDCO          |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramPath {
    DohCopayCard,
    Lpap,
    Medco,
}

impl ProgramPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DohCopayCard => "DOH Copay Card",
            Self::Lpap => "LPAP",
            Self::Medco => "MEDCO",
        }
    }
}

impl fmt::Display for ProgramPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrugType {
    ArvBrand,
    RwFormulary,
    NonRwFormulary,
}

impl DrugType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArvBrand => "ARV/Brand",
            Self::RwFormulary => "RW Formulary",
            Self::NonRwFormulary => "Non-RW-Formulary",
        }
    }

    /// Accepts the display name or a dashed short form (`arv`, `rw-formulary`,
    /// `non-rw-formulary`), ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arv/brand" | "arv" | "arv-brand" | "brand" => Some(Self::ArvBrand),
            "rw formulary" | "rw-formulary" | "rw" => Some(Self::RwFormulary),
            "non-rw-formulary" | "non rw formulary" | "non-rw" => Some(Self::NonRwFormulary),
            _ => None,
        }
    }
}

impl fmt::Display for DrugType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the primary plan treated a drug that is on the RW formulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RwPrimaryStatus {
    Covered,
    Denied,
    /// Primary lists the drug as non-formulary; billed with a COB override.
    NonFormulary,
}

impl RwPrimaryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Covered => "covered",
            Self::Denied => "denied",
            Self::NonFormulary => "nonformulary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Covered => "Covered",
            Self::Denied => "Denied",
            Self::NonFormulary => "Non-Formulary (Primary) — COB override",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "covered" => Some(Self::Covered),
            "denied" => Some(Self::Denied),
            "nonformulary" | "non-formulary" => Some(Self::NonFormulary),
            _ => None,
        }
    }
}

impl fmt::Display for RwPrimaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
