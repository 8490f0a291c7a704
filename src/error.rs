// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

/// Errors raised by the ledger, aggregator inputs, and the import/export codecs.
///
/// Every variant is recoverable: the operation that produced it has had no
/// effect on the session.
#[derive(thiserror::Error, Debug)]
pub enum SalesError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("select at least one product type")]
    NoProducts,
    #[error("product '{0}' selected more than once")]
    DuplicateProduct(String),
    #[error("reservation number '{0}' is already recorded")]
    DuplicateReservation(String),
    #[error("unknown employee '{0}'")]
    UnknownEmployee(String),
    #[error("unknown product type '{0}'")]
    UnknownProduct(String),
    #[error("invalid commission rate '{0}' (must be zero or positive)")]
    InvalidRate(String),
    #[error("'{0}' is already in the catalog")]
    AlreadyListed(String),
    #[error("no sale ids left after {0}")]
    IdsExhausted(u64),
    #[error("duplicate sale id {0}")]
    DuplicateId(u64),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("file is {size} bytes, import limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, SalesError>;
