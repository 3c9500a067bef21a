//! Unified operator capability surface for inbound adapters.

use super::diagnostic::DiagnosticOperator;
use super::startup::StartupOperator;

/// Unified operator capability surface consumed by inbound adapters.
pub trait OperatorPort: DiagnosticOperator + StartupOperator {}

impl<T> OperatorPort for T where T: DiagnosticOperator + StartupOperator {}
