/// Errors converting a `google.protobuf.Struct` to JSON.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructError {
    #[error("value at {path} has no kind set")]
    MissingKind { path: String },
    #[error("value at {path} is not a finite number: {value}")]
    NonFiniteNumber { path: String, value: f64 },
}

/// Errors extracting resources from a `RunFunctionRequest`.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("cannot decode desired composed resource {name:?}: {source}")]
    DesiredComposed {
        name: String,
        #[source]
        source: StructError,
    },
}

/// Failures a function reports as a Fatal result.
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("cannot get desired composed resources from RunFunctionRequest: {0}")]
    GetDesiredComposed(#[source] RequestError),
}

pub type StructResult<T> = std::result::Result<T, StructError>;
pub type RequestResult<T> = std::result::Result<T, RequestError>;
