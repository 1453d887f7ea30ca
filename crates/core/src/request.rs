//! Reading state out of a `RunFunctionRequest`.

use std::collections::BTreeMap;

use function_proto::pb::{Ready, RunFunctionRequest};

use crate::error::{RequestError, RequestResult};
use crate::resource::{DesiredComposed, Unstructured};
use crate::structs::struct_to_json;

/// Returns the desired composed resources of `req`, keyed by resource name.
///
/// A resource with no struct decodes as an empty object. A request without desired state yields
/// an empty map.
pub fn get_desired_composed_resources(
    req: &RunFunctionRequest,
) -> RequestResult<BTreeMap<String, DesiredComposed>> {
    let Some(desired) = req.desired.as_ref() else {
        return Ok(BTreeMap::new());
    };

    desired
        .resources
        .iter()
        .map(|(name, r)| -> RequestResult<(String, DesiredComposed)> {
            let object = match r.resource.as_ref() {
                Some(s) => struct_to_json(s).map_err(|source| RequestError::DesiredComposed {
                    name: name.clone(),
                    source,
                })?,
                None => Default::default(),
            };
            let dc = DesiredComposed {
                resource: Unstructured::new(object),
                ready: Ready::try_from(r.ready).unwrap_or(Ready::Unspecified),
            };
            Ok((name.clone(), dc))
        })
        .collect()
}
