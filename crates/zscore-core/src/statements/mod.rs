//! Raw statement ingestion: alias tables, field resolution and data-quality
//! diagnostics.

pub mod diagnostics;
pub mod fields;
pub mod resolver;

pub use diagnostics::{build_report, DataQuality, DataQualityReport, DiagnosticEntry};
pub use fields::{FinancialField, StatementKind};
pub use resolver::{
    resolve_field, resolve_fields, resolve_statement, FieldResolution, FieldResolutions,
    RawStatement, ResolvedStatement, StatementSection,
};
