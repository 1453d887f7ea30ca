//! The external-name function.
//!
//! Sets the `crossplane.io/external-name` annotation of every desired composed resource to its
//! `metadata.name`. Resources without a name, and resources that already carry the annotation,
//! pass through untouched: an existing value is never re-synced, even when it differs from the
//! name.

use std::collections::BTreeMap;

use function_proto::pb::{RunFunctionRequest, RunFunctionResponse};
use tracing::Span;

use crate::constants::{DEFAULT_TTL, EXTERNAL_NAME_ANNOTATION, SUCCESS_MESSAGE};
use crate::error::FunctionError;
use crate::resource::DesiredComposed;
use crate::{request, response};

/// A step in a composition pipeline.
///
/// `log` is the span of the current invocation; implementations log under it rather than through
/// any process-wide handle. Failures are reported as Fatal results on the returned response.
pub trait CompositionFunction: Send + Sync + 'static {
    fn run_function(&self, req: &RunFunctionRequest, log: &Span) -> RunFunctionResponse;
}

/// Adds external-name annotations to desired composed resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct Namer;

impl Namer {
    pub fn new() -> Self {
        Self
    }
}

impl CompositionFunction for Namer {
    fn run_function(&self, req: &RunFunctionRequest, log: &Span) -> RunFunctionResponse {
        let tag = req.meta.as_ref().map(|m| m.tag.as_str()).unwrap_or_default();
        tracing::info!(parent: log, tag, "running function");

        let mut rsp = response::to(req, DEFAULT_TTL);

        let mut desired = match request::get_desired_composed_resources(req) {
            Ok(desired) => desired,
            Err(e) => {
                let err = FunctionError::GetDesiredComposed(e);
                tracing::warn!(parent: log, error = %err, "returning fatal result");
                response::fatal(&mut rsp, &err);
                return rsp;
            }
        };

        tracing::debug!(parent: log, count = desired.len(), "found desired resources");

        add_external_names(&mut desired, log);
        response::set_desired_composed_resources(&mut rsp, desired);

        response::normal(&mut rsp, SUCCESS_MESSAGE);
        rsp
    }
}

/// Annotates each named resource that lacks an external name. Returns how many were annotated.
pub fn add_external_names(desired: &mut BTreeMap<String, DesiredComposed>, log: &Span) -> usize {
    let mut annotated = 0;

    for (resource_name, dc) in desired.iter_mut() {
        let name = dc.resource.name();
        if name.is_empty() {
            continue;
        }
        if dc.resource.has_annotation(EXTERNAL_NAME_ANNOTATION) {
            continue;
        }

        let name = name.to_owned();
        tracing::debug!(
            parent: log,
            resource = %resource_name,
            external_name = %name,
            "adding external name"
        );
        dc.resource.add_annotations([(EXTERNAL_NAME_ANNOTATION, name)]);
        annotated += 1;
    }

    annotated
}
