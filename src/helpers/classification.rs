use std::{fmt, io, str::FromStr};

use serde::{Deserialize, Serialize};

/// Three-way classification of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoarseType {
    Internal,
    Inbound,
    Outbound,
}

impl CoarseType {
    pub const ALL: [CoarseType; 3] =
        [CoarseType::Internal, CoarseType::Inbound, CoarseType::Outbound];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoarseType::Internal => "internal",
            CoarseType::Inbound => "inbound",
            CoarseType::Outbound => "outbound",
        }
    }
}

impl fmt::Display for CoarseType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CoarseType {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<CoarseType, Self::Err> {
        match value {
            "internal" => Ok(CoarseType::Internal),
            "inbound" => Ok(CoarseType::Inbound),
            "outbound" => Ok(CoarseType::Outbound),
            _ => Err(io::Error::other("Transaction type not supported")),
        }
    }
}

/// Lifecycle tag published by the ledger in the `t` tag of each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FineType {
    InternalStart,
    InternalOk,
    InternalError,
    InboundStart,
    InboundOk,
    InboundError,
    OutboundStart,
    OutboundOk,
    OutboundError,
}

impl FineType {
    pub const ALL: [FineType; 9] = [
        FineType::InternalStart,
        FineType::InternalOk,
        FineType::InternalError,
        FineType::InboundStart,
        FineType::InboundOk,
        FineType::InboundError,
        FineType::OutboundStart,
        FineType::OutboundOk,
        FineType::OutboundError,
    ];

    /// Final outcomes requested from the relays.
    pub const QUERIED: [FineType; 6] = [
        FineType::InternalOk,
        FineType::InternalError,
        FineType::InboundOk,
        FineType::InboundError,
        FineType::OutboundOk,
        FineType::OutboundError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FineType::InternalStart => "internal-transaction-start",
            FineType::InternalOk => "internal-transaction-ok",
            FineType::InternalError => "internal-transaction-error",
            FineType::InboundStart => "inbound-transaction-start",
            FineType::InboundOk => "inbound-transaction-ok",
            FineType::InboundError => "inbound-transaction-error",
            FineType::OutboundStart => "outbound-transaction-start",
            FineType::OutboundOk => "outbound-transaction-ok",
            FineType::OutboundError => "outbound-transaction-error",
        }
    }
}

impl fmt::Display for FineType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FineType {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<FineType, Self::Err> {
        FineType::ALL
            .into_iter()
            .find(|item| item.as_str() == value)
            .ok_or_else(|| io::Error::other("Transaction tag not supported"))
    }
}

/// Derive the coarse type from a fine-type tag. The checks run in
/// internal, inbound, outbound order and the first substring hit wins.
pub fn classify(fine_type: Option<&str>) -> Option<CoarseType> {
    let fine_type = fine_type?;

    if fine_type.contains("internal") {
        return Some(CoarseType::Internal);
    }
    if fine_type.contains("inbound") {
        return Some(CoarseType::Inbound);
    }
    if fine_type.contains("outbound") {
        return Some(CoarseType::Outbound);
    }

    None
}

pub fn is_error(fine_type: Option<&str>) -> bool {
    fine_type.is_some_and(|value| value.contains("error"))
}

pub fn is_internal(fine_type: Option<&str>) -> bool {
    fine_type.is_some_and(|value| value.contains("internal"))
}
