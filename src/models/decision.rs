use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Available irrigation decisions, stored by their Indonesian names
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Error,
    Defer,
    ExtraIrrigation,
    NormalIrrigation,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Error            => "ERROR",
            Decision::Defer            => "TUNDA",
            Decision::ExtraIrrigation  => "IRIGASI_EKSTRA",
            Decision::NormalIrrigation => "IRIGASI_NORMAL",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("unknown decision value: {0}")]
pub struct UnknownDecision(pub String);

impl FromStr for Decision {
    type Err = UnknownDecision;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ERROR"          => Ok(Decision::Error),
            "TUNDA"          => Ok(Decision::Defer),
            "IRIGASI_EKSTRA" => Ok(Decision::ExtraIrrigation),
            "IRIGASI_NORMAL" => Ok(Decision::NormalIrrigation),
            other => Err(UnknownDecision(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecisionRecord {
    pub id: i64,
    pub decided_at: NaiveDateTime,
    pub decision: Decision,
    pub reason: String,
}
