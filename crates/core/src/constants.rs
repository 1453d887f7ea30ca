//! Constants used throughout the namer core crate.
//!
//! This module contains the well-known annotation key and the fixed response values so that the
//! service and its tests agree on them.

use std::time::Duration;

/// Annotation key recording the external identifier of a composed resource.
pub const EXTERNAL_NAME_ANNOTATION: &str = "crossplane.io/external-name";

/// Default time-to-live attached to every response.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Message of the single Normal result returned on success.
pub const SUCCESS_MESSAGE: &str = "External names added successfully";
