//! Building a `RunFunctionResponse`.
//!
//! Functions run in a pipeline, so a response starts as a copy of the desired state the previous
//! functions produced. Anything a function is not concerned with must pass through unmodified.

use std::collections::BTreeMap;
use std::time::Duration;

use function_proto::pb::{self, ResponseMeta, RunFunctionRequest, RunFunctionResponse, Severity};

use crate::resource::DesiredComposed;
use crate::structs::json_to_struct;

/// Creates a response to `req` that echoes its tag and carries its desired state and context.
pub fn to(req: &RunFunctionRequest, ttl: Duration) -> RunFunctionResponse {
    RunFunctionResponse {
        meta: Some(ResponseMeta {
            tag: req.meta.as_ref().map(|m| m.tag.clone()).unwrap_or_default(),
            ttl: Some(duration(ttl)),
        }),
        desired: req.desired.clone(),
        results: Vec::new(),
        context: req.context.clone(),
        requirements: None,
    }
}

fn duration(d: Duration) -> prost_types::Duration {
    prost_types::Duration {
        seconds: i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        nanos: i32::try_from(d.subsec_nanos()).unwrap_or(0),
    }
}

/// Installs `resources` into the desired state of `rsp`.
///
/// Each named entry gets the resource's struct and readiness; its connection details are kept.
/// Entries not named in `resources` are left alone.
pub fn set_desired_composed_resources(
    rsp: &mut RunFunctionResponse,
    resources: BTreeMap<String, DesiredComposed>,
) {
    let desired = rsp.desired.get_or_insert_with(Default::default);

    for (name, dc) in resources {
        let entry = desired.resources.entry(name).or_default();
        entry.resource = Some(json_to_struct(dc.resource.as_object()));
        entry.ready = dc.ready.into();
    }
}

fn push_result(rsp: &mut RunFunctionResponse, severity: Severity, message: String) {
    rsp.results.push(pb::Result {
        severity: severity.into(),
        message,
        reason: None,
        target: None,
    });
}

/// Adds a Normal result.
pub fn normal(rsp: &mut RunFunctionResponse, message: impl Into<String>) {
    push_result(rsp, Severity::Normal, message.into());
}

/// Adds a Fatal result carrying `err`'s message. The pipeline stops on a Fatal result.
pub fn fatal(rsp: &mut RunFunctionResponse, err: &dyn std::error::Error) {
    push_result(rsp, Severity::Fatal, err.to_string());
}
