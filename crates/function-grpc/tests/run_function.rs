use function_grpc::pb::function_runner_service_server::FunctionRunnerService;
use function_grpc::pb::{
    RequestMeta, Resource, RunFunctionRequest, RunFunctionResponse, Severity, State,
};
use function_grpc::FunctionService;
use namer_core::structs::json_to_struct;
use namer_core::{CompositionFunction, Namer};
use serde_json::json;
use tonic::Request;
use tracing::Span;

fn must_struct(value: serde_json::Value) -> prost_types::Struct {
    json_to_struct(value.as_object().unwrap())
}

fn request_with(name: &str, object: serde_json::Value) -> RunFunctionRequest {
    RunFunctionRequest {
        meta: Some(RequestMeta { tag: "hello".into() }),
        desired: Some(State {
            composite: None,
            resources: [(
                name.to_string(),
                Resource {
                    resource: Some(must_struct(object)),
                    ..Default::default()
                },
            )]
            .into(),
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_run_function_adds_external_name() {
    let svc = FunctionService::new(Namer::new());
    let req = request_with(
        "ready-composed-resource",
        json!({
            "apiVersion": "test.crossplane.io/v1",
            "kind": "TestNamer",
            "metadata": {"name": "my-test-namer"}
        }),
    );

    let rsp = svc
        .run_function(Request::new(req))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(rsp.meta.as_ref().unwrap().tag, "hello");
    assert_eq!(
        rsp.desired.as_ref().unwrap().resources["ready-composed-resource"].resource,
        Some(must_struct(json!({
            "apiVersion": "test.crossplane.io/v1",
            "kind": "TestNamer",
            "metadata": {
                "name": "my-test-namer",
                "annotations": {"crossplane.io/external-name": "my-test-namer"}
            }
        })))
    );
    assert_eq!(rsp.results.len(), 1);
    assert_eq!(rsp.results[0].severity, i32::from(Severity::Normal));
    assert_eq!(rsp.results[0].message, "External names added successfully");
}

#[tokio::test]
async fn test_run_function_reports_fatal_result_without_rpc_error() {
    let svc = FunctionService::new(Namer::new());
    let mut req = request_with("broken", json!({"metadata": {"name": "broken"}}));
    let broken = req
        .desired
        .as_mut()
        .unwrap()
        .resources
        .get_mut("broken")
        .unwrap();
    broken
        .resource
        .as_mut()
        .unwrap()
        .fields
        .insert("spec".into(), prost_types::Value { kind: None });

    let rsp = svc
        .run_function(Request::new(req))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(rsp.results.len(), 1);
    assert_eq!(rsp.results[0].severity, i32::from(Severity::Fatal));
    assert!(rsp.results[0].message.contains("spec"));
}

struct PassThrough;

impl CompositionFunction for PassThrough {
    fn run_function(&self, req: &RunFunctionRequest, _log: &Span) -> RunFunctionResponse {
        namer_core::response::to(req, std::time::Duration::from_secs(5))
    }
}

#[tokio::test]
async fn test_service_delegates_to_wrapped_function() {
    let svc = FunctionService::new(PassThrough);
    let req = request_with("a", json!({"metadata": {"name": "a"}}));

    let rsp = svc
        .run_function(Request::new(req.clone()))
        .await
        .unwrap()
        .into_inner();

    assert!(rsp.results.is_empty());
    assert_eq!(rsp.desired, req.desired);
    assert_eq!(rsp.meta.unwrap().ttl.unwrap().seconds, 5);
}
