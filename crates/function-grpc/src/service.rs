// Re-export the proto module from the shared `function-proto` crate so callers
// can reference `function_grpc::pb`.
pub use function_proto::pb;

use function_proto::pb::function_runner_service_server::FunctionRunnerService;
use function_proto::pb::{RunFunctionRequest, RunFunctionResponse};
use namer_core::{CompositionFunction, Namer};
use tonic::{Request, Response, Status};

/// Serves a [`CompositionFunction`] as a `FunctionRunnerService`.
///
/// Each call gets its own `run_function` span carrying the request tag, which is handed to the
/// function as its logger. The RPC never fails: function errors are Fatal results inside the
/// response.
#[derive(Debug, Clone)]
pub struct FunctionService<F = Namer> {
    function: F,
}

impl<F: CompositionFunction> FunctionService<F> {
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

#[tonic::async_trait]
impl<F: CompositionFunction> FunctionRunnerService for FunctionService<F> {
    async fn run_function(
        &self,
        req: Request<RunFunctionRequest>,
    ) -> Result<Response<RunFunctionResponse>, Status> {
        let req = req.into_inner();
        let tag = req.meta.as_ref().map(|m| m.tag.as_str()).unwrap_or_default();
        let span = tracing::info_span!("run_function", tag);

        let rsp = self.function.run_function(&req, &span);
        Ok(Response::new(rsp))
    }
}
