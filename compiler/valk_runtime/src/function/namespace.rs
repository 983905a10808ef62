//! The function namespace as an interop object.

use super::FunctionValue;
use crate::errors::{unresolved_member, RuntimeResult};
use crate::interop::Interop;
use crate::object::PropertyStore;
use crate::value::Value;

/// Read-only view of the registry. Members are function names, member
/// values are the canonical functions. Displays as `global`.
#[derive(Clone, Debug)]
pub struct FunctionsObject {
    functions: PropertyStore<FunctionValue>,
}

impl FunctionsObject {
    pub(super) fn new(functions: PropertyStore<FunctionValue>) -> Self {
        FunctionsObject { functions }
    }
}

impl Interop for FunctionsObject {
    fn has_members(&self) -> bool {
        true
    }

    fn read_member(&self, member: &str) -> RuntimeResult<Value> {
        self.functions
            .get(member)
            .map(Value::Function)
            .ok_or_else(|| unresolved_member(member))
    }

    fn is_member_readable(&self, member: &str) -> bool {
        self.functions.contains(member)
    }

    fn enumerate_members(&self) -> RuntimeResult<Vec<String>> {
        Ok(self.functions.keys())
    }

    fn to_display_string(&self, _allow_side_effects: bool) -> String {
        "global".to_string()
    }
}
