//! Student Contract
//!
//! Routes an invocation to one of four handlers. Each handler parses its
//! arguments first and only then talks to world state, issuing at most one
//! mutating call.
//!
//! ## Functions
//!
//! - `createStudent id name age major` - write the record (upsert)
//! - `queryStudent id` - return the stored bytes verbatim
//! - `updateStudent id name age major` - replace an existing record
//! - `deleteStudent id` - remove an existing record
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StudentContract                         │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │  invoke()   │───>│ dispatch()  │───>│  handler    │      │
//! │  └─────────────┘    └─────────────┘    └─────────────┘      │
//! │                                               │             │
//! │                                               ▼             │
//! │                                      &mut dyn WorldState    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::contract::args::{key_args, student_args, Function};
use crate::contract::error::{ContractError, ContractResult};
use crate::ledger::WorldState;
use crate::protocol::{Invocation, Response};
use bytes::Bytes;
use tracing::{debug, warn};

/// The Student contract.
///
/// The contract holds no state of its own. World state is passed into every
/// call.
///
/// # Example
///
/// ```
/// use studentcc::contract::StudentContract;
/// use studentcc::ledger::MemoryWorldState;
///
/// let contract = StudentContract::new();
/// let mut state = MemoryWorldState::new();
///
/// let args = ["s1", "Alice", "21", "CS"].map(String::from);
/// assert!(contract.invoke(&mut state, "createStudent", &args).is_success());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentContract;

impl StudentContract {
    pub fn new() -> Self {
        Self
    }

    /// Called once when the contract is instantiated or upgraded.
    pub fn init(&self, _state: &mut dyn WorldState) -> Response {
        debug!("Contract initialized");
        Response::success()
    }

    /// Runs one invocation and converts the outcome into a `Response`.
    pub fn invoke(&self, state: &mut dyn WorldState, function: &str, args: &[String]) -> Response {
        debug!(function, args = args.len(), "Invoking");

        match self.dispatch(state, function, args) {
            Ok(payload) => Response::Success(payload),
            Err(e) => {
                warn!(function, error = %e, "Invocation rejected");
                Response::Error(e.to_string())
            }
        }
    }

    /// Runs a decoded invocation.
    pub fn execute(&self, state: &mut dyn WorldState, invocation: &Invocation) -> Response {
        self.invoke(state, &invocation.function, &invocation.args)
    }

    /// Resolves the function name and calls its handler.
    pub fn dispatch(
        &self,
        state: &mut dyn WorldState,
        function: &str,
        args: &[String],
    ) -> ContractResult<Bytes> {
        match function.parse::<Function>()? {
            Function::CreateStudent => self.create_student(state, args),
            Function::QueryStudent => self.query_student(state, args),
            Function::UpdateStudent => self.update_student(state, args),
            Function::DeleteStudent => self.delete_student(state, args),
        }
    }

    /// createStudent id name age major
    ///
    /// Writes unconditionally. An existing record under the same id is
    /// replaced rather than rejected.
    pub fn create_student(
        &self,
        state: &mut dyn WorldState,
        args: &[String],
    ) -> ContractResult<Bytes> {
        let student = student_args(args)?;
        let value = student.to_bytes()?;

        state.put_state(student.key(), value)?;
        debug!(key = student.key(), "Student written");
        Ok(Bytes::new())
    }

    /// queryStudent id
    pub fn query_student(&self, state: &mut dyn WorldState, args: &[String]) -> ContractResult<Bytes> {
        let id = key_args(args)?;
        state
            .get_state(id)?
            .ok_or_else(|| ContractError::NotFound(id.to_string()))
    }

    /// updateStudent id name age major
    ///
    /// Requires an existing record and replaces every field.
    pub fn update_student(
        &self,
        state: &mut dyn WorldState,
        args: &[String],
    ) -> ContractResult<Bytes> {
        let student = student_args(args)?;
        require_existing(state, student.key())?;

        let value = student.to_bytes()?;
        state.put_state(student.key(), value)?;
        debug!(key = student.key(), "Student replaced");
        Ok(Bytes::new())
    }

    /// deleteStudent id
    pub fn delete_student(
        &self,
        state: &mut dyn WorldState,
        args: &[String],
    ) -> ContractResult<Bytes> {
        let id = key_args(args)?;
        require_existing(state, id)?;

        state.del_state(id)?;
        debug!(key = id, "Student deleted");
        Ok(Bytes::new())
    }
}

fn require_existing(state: &dyn WorldState, key: &str) -> ContractResult<()> {
    match state.get_state(key)? {
        Some(_) => Ok(()),
        None => Err(ContractError::NotFound(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::record::Student;
    use crate::ledger::{MemoryWorldState, StateError, StateResult};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn invoke(state: &mut MemoryWorldState, function: &str, values: &[&str]) -> Response {
        StudentContract::new().invoke(state, function, &args(values))
    }

    fn query(state: &mut MemoryWorldState, id: &str) -> Student {
        match invoke(state, "queryStudent", &[id]) {
            Response::Success(payload) => Student::from_bytes(&payload).unwrap(),
            other => panic!("query failed: {}", other),
        }
    }

    /// World state whose every call fails.
    struct BrokenState;

    impl WorldState for BrokenState {
        fn get_state(&self, _key: &str) -> StateResult<Option<Bytes>> {
            Err(StateError::Backend("read failed".into()))
        }

        fn put_state(&mut self, _key: &str, _value: Bytes) -> StateResult<()> {
            Err(StateError::Backend("write failed".into()))
        }

        fn del_state(&mut self, _key: &str) -> StateResult<()> {
            Err(StateError::Backend("delete failed".into()))
        }
    }

    #[test]
    fn test_create_query_round_trip() {
        let mut state = MemoryWorldState::new();

        let response = invoke(&mut state, "createStudent", &["s1", "Alice", "21", "CS"]);
        assert_eq!(response, Response::success());

        assert_eq!(query(&mut state, "s1"), Student::new("s1", "Alice", 21, "CS"));
    }

    #[test]
    fn test_query_returns_stored_bytes_verbatim() {
        let mut state = MemoryWorldState::new();
        let raw = Bytes::from_static(b"{ \"id\" : \"s9\" }");
        state.put("s9", raw.clone()).unwrap();

        assert_eq!(invoke(&mut state, "queryStudent", &["s9"]), Response::Success(raw));
    }

    #[test]
    fn test_create_is_upsert() {
        let mut state = MemoryWorldState::new();

        invoke(&mut state, "createStudent", &["s1", "Alice", "21", "CS"]);
        let response = invoke(&mut state, "createStudent", &["s1", "Bob", "30", "Math"]);
        assert!(response.is_success());

        assert_eq!(query(&mut state, "s1"), Student::new("s1", "Bob", 30, "Math"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_create_accepts_any_integer_age() {
        let mut state = MemoryWorldState::new();

        assert!(invoke(&mut state, "createStudent", &["a", "A", "0", "X"]).is_success());
        assert!(invoke(&mut state, "createStudent", &["b", "B", "-7", "Y"]).is_success());
        assert_eq!(query(&mut state, "b").age, -7);
    }

    #[test]
    fn test_query_missing() {
        let mut state = MemoryWorldState::new();
        assert_eq!(
            invoke(&mut state, "queryStudent", &["nobody"]),
            Response::error("Student not found")
        );
    }

    #[test]
    fn test_update_replaces_every_field() {
        let mut state = MemoryWorldState::new();
        invoke(&mut state, "createStudent", &["s1", "Alice", "21", "CS"]);

        let response = invoke(&mut state, "updateStudent", &["s1", "Alicia", "22", "Physics"]);
        assert!(response.is_success());

        assert_eq!(
            query(&mut state, "s1"),
            Student::new("s1", "Alicia", 22, "Physics")
        );
    }

    #[test]
    fn test_update_missing_writes_nothing() {
        let mut state = MemoryWorldState::new();

        let response = invoke(&mut state, "updateStudent", &["ghost", "G", "1", "None"]);
        assert_eq!(response, Response::error("Student not found"));

        assert!(!state.contains_key("ghost"));
        assert_eq!(state.stats().puts, 0);
    }

    #[test]
    fn test_delete() {
        let mut state = MemoryWorldState::new();
        invoke(&mut state, "createStudent", &["s1", "Alice", "21", "CS"]);

        assert_eq!(invoke(&mut state, "deleteStudent", &["s1"]), Response::success());
        assert_eq!(
            invoke(&mut state, "queryStudent", &["s1"]),
            Response::error("Student not found")
        );

        let before = state.stats();
        assert_eq!(
            invoke(&mut state, "deleteStudent", &["s1"]),
            Response::error("Student not found")
        );
        assert_eq!(state.stats().deletes, before.deletes);
    }

    #[test]
    fn test_wrong_argument_count_touches_nothing() {
        let mut state = MemoryWorldState::new();

        let cases: [(&str, &[&str], &str); 4] = [
            (
                "createStudent",
                &["s1", "Alice", "21"],
                "Incorrect number of arguments. Expecting 4: id, name, age, major",
            ),
            (
                "updateStudent",
                &["s1", "Alice", "21", "CS", "extra"],
                "Incorrect number of arguments. Expecting 4: id, name, age, major",
            ),
            (
                "queryStudent",
                &[],
                "Incorrect number of arguments. Expecting 1: id",
            ),
            (
                "deleteStudent",
                &["s1", "s2"],
                "Incorrect number of arguments. Expecting 1: id",
            ),
        ];

        for (function, values, message) in cases {
            assert_eq!(invoke(&mut state, function, values), Response::error(message));
        }
        assert_eq!(state.stats().total_ops(), 0);
    }

    #[test]
    fn test_non_integer_age_touches_nothing() {
        let mut state = MemoryWorldState::new();

        for function in ["createStudent", "updateStudent"] {
            assert_eq!(
                invoke(&mut state, function, &["s1", "Alice", "abc", "CS"]),
                Response::error("Age must be an integer")
            );
        }
        assert_eq!(state.stats().total_ops(), 0);
    }

    #[test]
    fn test_invalid_function_name() {
        let mut state = MemoryWorldState::new();

        for name in ["", "init", "CREATESTUDENT", "transfer"] {
            assert_eq!(
                invoke(&mut state, name, &["s1", "Alice", "21", "CS"]),
                Response::error("Invalid function name")
            );
        }
        assert_eq!(state.stats().total_ops(), 0);
    }

    #[test]
    fn test_store_errors_propagate_verbatim() {
        let contract = StudentContract::new();
        let mut state = BrokenState;

        let cases = [
            ("createStudent", args(&["s1", "A", "1", "B"]), "write failed"),
            ("queryStudent", args(&["s1"]), "read failed"),
            ("updateStudent", args(&["s1", "A", "1", "B"]), "read failed"),
            ("deleteStudent", args(&["s1"]), "read failed"),
        ];

        for (function, values, message) in cases {
            assert_eq!(
                contract.invoke(&mut state, function, &values),
                Response::error(message)
            );
        }
    }

    #[test]
    fn test_empty_id_is_rejected_by_state() {
        let mut state = MemoryWorldState::new();

        assert_eq!(
            invoke(&mut state, "createStudent", &["", "Nobody", "1", "None"]),
            Response::error("key must not be an empty string")
        );
        assert_eq!(
            invoke(&mut state, "queryStudent", &[""]),
            Response::error("Student not found")
        );
    }

    #[test]
    fn test_init() {
        let mut state = MemoryWorldState::new();
        assert_eq!(StudentContract::new().init(&mut state), Response::success());
        assert!(state.is_empty());
    }

    #[test]
    fn test_execute_invocation() {
        let mut state = MemoryWorldState::new();
        let contract = StudentContract::new();

        let create = Invocation::from_strs("createStudent", &["s1", "Alice", "21", "CS"]);
        assert!(contract.execute(&mut state, &create).is_success());

        let err = contract
            .dispatch(&mut state, "queryStudent", &args(&["s2"]))
            .unwrap_err();
        assert!(matches!(err, ContractError::NotFound(id) if id == "s2"));
    }

    #[test]
    fn test_lifecycle_scenario() {
        let mut state = MemoryWorldState::new();

        assert!(invoke(&mut state, "createStudent", &["s1", "Alice", "21", "CS"]).is_success());
        assert_eq!(query(&mut state, "s1").age, 21);

        assert!(invoke(&mut state, "updateStudent", &["s1", "Alice", "22", "CS"]).is_success());
        assert_eq!(query(&mut state, "s1").age, 22);

        assert!(invoke(&mut state, "deleteStudent", &["s1"]).is_success());
        assert_eq!(
            invoke(&mut state, "queryStudent", &["s1"]),
            Response::error("Student not found")
        );
    }
}
