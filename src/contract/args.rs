//! Function names and positional argument parsing.
//!
//! The ledger hands every invocation over as a function name plus a list of
//! strings. This module turns those into typed values before any handler
//! touches world state, so a rejected invocation never performs a store
//! operation.

use crate::contract::error::{ContractError, ContractResult};
use crate::contract::record::Student;
use std::fmt;
use std::str::FromStr;

const STUDENT_PARAMS: &str = "id, name, age, major";
const KEY_PARAMS: &str = "id";

/// The functions the contract exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    CreateStudent,
    QueryStudent,
    UpdateStudent,
    DeleteStudent,
}

impl Function {
    pub const ALL: [Function; 4] = [
        Function::CreateStudent,
        Function::QueryStudent,
        Function::UpdateStudent,
        Function::DeleteStudent,
    ];

    /// The name the ledger uses to invoke this function.
    pub fn name(self) -> &'static str {
        match self {
            Function::CreateStudent => "createStudent",
            Function::QueryStudent => "queryStudent",
            Function::UpdateStudent => "updateStudent",
            Function::DeleteStudent => "deleteStudent",
        }
    }
}

impl FromStr for Function {
    type Err = ContractError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ContractError::InvalidFunctionName(s.to_string()))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn expect_arity(args: &[String], expected: usize, params: &'static str) -> ContractResult<()> {
    if args.len() != expected {
        return Err(ContractError::InvalidArgumentCount {
            expected,
            got: args.len(),
            params,
        });
    }
    Ok(())
}

/// Parses `[id, name, age, major]` into a record.
pub fn student_args(args: &[String]) -> ContractResult<Student> {
    expect_arity(args, 4, STUDENT_PARAMS)?;

    let age = args[2]
        .parse::<i64>()
        .map_err(|_| ContractError::InvalidArgument {
            field: "Age",
            value: args[2].clone(),
        })?;

    Ok(Student::new(&args[0], &args[1], age, &args[3]))
}

/// Parses `[id]`.
pub fn key_args(args: &[String]) -> ContractResult<&str> {
    expect_arity(args, 1, KEY_PARAMS)?;
    Ok(&args[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_function_names() {
        for function in Function::ALL {
            assert_eq!(function.name().parse::<Function>().unwrap(), function);
        }
        assert!(matches!(
            "CreateStudent".parse::<Function>(),
            Err(ContractError::InvalidFunctionName(name)) if name == "CreateStudent"
        ));
        assert!("".parse::<Function>().is_err());
    }

    #[test]
    fn test_student_args() {
        let student = student_args(&strings(&["s1", "Alice", "21", "CS"])).unwrap();
        assert_eq!(student, Student::new("s1", "Alice", 21, "CS"));

        let student = student_args(&strings(&["s2", "", "-4", ""])).unwrap();
        assert_eq!(student.age, -4);
        assert_eq!(student.name, "");
    }

    #[test]
    fn test_student_args_wrong_count() {
        let err = student_args(&strings(&["s1", "Alice", "21"])).unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidArgumentCount {
                expected: 4,
                got: 3,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Incorrect number of arguments. Expecting 4: id, name, age, major"
        );
    }

    #[test]
    fn test_student_args_bad_age() {
        for age in ["abc", "", "21.5", "0x10", "99999999999999999999"] {
            let err = student_args(&strings(&["s1", "Alice", age, "CS"])).unwrap_err();
            assert!(matches!(err, ContractError::InvalidArgument { field: "Age", .. }));
            assert_eq!(err.to_string(), "Age must be an integer");
        }
    }

    #[test]
    fn test_key_args() {
        assert_eq!(key_args(&strings(&["s1"])).unwrap(), "s1");

        let err = key_args(&strings(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Incorrect number of arguments. Expecting 1: id"
        );
        assert!(key_args(&strings(&["s1", "s2"])).is_err());
    }
}
