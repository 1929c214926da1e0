//! The placeholder `Map` method inserted before body generation.

use crate::naming::TypePair;
use crate::syntax::{MethodDecl, Parameter, Statement, Visibility};

/// Parameter name of the value being mapped from.
pub const SOURCE_PARAMETER: &str = "source";
/// Parameter name of the value being mapped onto.
pub const TARGET_PARAMETER: &str = "target";
/// Parameter count of the mapping method.
pub const MAP_ARITY: usize = 2;

/// `public Target Map(Source source, Target target) { throw new NotImplementedException(); }`
#[must_use]
pub fn map_method_stub(pair: &TypePair, method_name: &str) -> MethodDecl {
    let target = pair.qualified_target_name();
    MethodDecl {
        name: method_name.to_string(),
        visibility: Visibility::Public,
        return_type: target.clone(),
        parameters: vec![
            Parameter::new(SOURCE_PARAMETER, pair.source_type_name.clone()),
            Parameter::new(TARGET_PARAMETER, target),
        ],
        body: vec![Statement::NotImplemented],
    }
}

/// Returns `true` when `method` takes exactly the pair's source and target types.
#[must_use]
pub fn has_pair_signature(method: &MethodDecl, pair: &TypePair) -> bool {
    let target = pair.qualified_target_name();
    matches!(
        method.parameters.as_slice(),
        [source, tgt] if source.type_name == pair.source_type_name && tgt.type_name == target
    )
}
