//! Error codes for all semantic-core diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E3001`) with the first digit
//! indicating the subsystem that reports it.

use std::fmt;

/// Error codes for all semantic-core diagnostics.
///
/// Format: E#### where first digit indicates the subsystem:
/// - E2xxx: Lookup and expression binding
/// - E3xxx: Pattern binding
/// - E4xxx: System subroutine calls
/// - E5xxx: Net types and resolution functions
/// - E6xxx: Constant evaluation
/// - E9xxx: Internal errors
///
/// `W` codes are warnings.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lookup / Binding Errors (E2xxx)
    /// Expression type cannot be assigned to the target type
    E2001,
    /// Use of an undeclared identifier
    E2002,
    /// Unknown member of a struct or union
    E2003,
    /// Redefinition of a name in the same scope
    E2004,
    /// Expression is not an assignable location
    E2005,
    /// Selectors are not allowed in this name
    E2006,
    /// Argument cannot be empty
    E2007,
    /// Could not resolve a hierarchical path segment
    E2008,

    // Pattern Errors (E3xxx)
    /// Tagged pattern used against a non-tagged-union type
    E3001,
    /// Structure pattern used against a non-struct type
    E3002,
    /// Structure pattern has more members than the struct has fields
    E3003,
    /// Structure pattern has fewer members than the struct has fields
    E3004,

    // System Subroutine Errors (E4xxx)
    /// Too few arguments
    E4001,
    /// Too many arguments
    E4002,
    /// Argument type not supported by the subroutine
    E4003,
    /// System function cannot be used in a constant expression
    E4004,
    /// Hierarchical reference passed to a constant system function
    E4005,

    // Net Type Errors (E5xxx)
    /// `with` clause names something that is not a subroutine
    E5001,
    /// Resolution function must take a single dynamic array argument
    E5002,
    /// Resolution function must not be a task
    E5003,
    /// Resolution function in a class must be static
    E5004,
    /// Resolution function has invalid modifiers
    E5005,
    /// Resolution function must return the net type's data type
    E5006,
    /// Resolution function must not modify its argument
    E5007,

    // Constant Evaluation Errors (E6xxx)
    /// Expression is not constant
    E6001,
    /// Pattern variable read before it was bound in this frame
    E6002,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,

    // Net Type Warnings (W5xxx)
    /// Port connection changes the simulated net type
    W5001,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E4003,
        ErrorCode::E4004,
        ErrorCode::E4005,
        ErrorCode::E5001,
        ErrorCode::E5002,
        ErrorCode::E5003,
        ErrorCode::E5004,
        ErrorCode::E5005,
        ErrorCode::E5006,
        ErrorCode::E5007,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E9001,
        ErrorCode::W5001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E5003 => "E5003",
            ErrorCode::E5004 => "E5004",
            ErrorCode::E5005 => "E5005",
            ErrorCode::E5006 => "E5006",
            ErrorCode::E5007 => "E5007",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E9001 => "E9001",
            ErrorCode::W5001 => "W5001",
        }
    }

    /// One-line description used by `--explain` style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "type mismatch in assignment",
            ErrorCode::E2002 => "undeclared identifier",
            ErrorCode::E2003 => "unknown member",
            ErrorCode::E2004 => "redefinition",
            ErrorCode::E2005 => "expression is not assignable",
            ErrorCode::E2006 => "selectors not allowed",
            ErrorCode::E2007 => "empty argument not allowed",
            ErrorCode::E2008 => "could not resolve hierarchical path",
            ErrorCode::E3001 => "tagged pattern on non-tagged-union type",
            ErrorCode::E3002 => "structure pattern on non-struct type",
            ErrorCode::E3003 => "too many pattern members",
            ErrorCode::E3004 => "too few pattern members",
            ErrorCode::E4001 => "too few arguments",
            ErrorCode::E4002 => "too many arguments",
            ErrorCode::E4003 => "bad system subroutine argument",
            ErrorCode::E4004 => "system function is not constant",
            ErrorCode::E4005 => "hierarchical reference in constant function",
            ErrorCode::E5001 => "not a subroutine",
            ErrorCode::E5002 => "resolution function argument",
            ErrorCode::E5003 => "resolution function is a task",
            ErrorCode::E5004 => "non-static resolution function in class",
            ErrorCode::E5005 => "invalid resolution function modifiers",
            ErrorCode::E5006 => "resolution function return type",
            ErrorCode::E5007 => "resolution function modifies its argument",
            ErrorCode::E6001 => "expression is not constant",
            ErrorCode::E6002 => "pattern variable has no value",
            ErrorCode::E9001 => "internal compiler error",
            ErrorCode::W5001 => "port connection changes net type",
        }
    }

    /// Check if this is a warning code (W prefix).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }

    /// Check if this code belongs to pattern binding (E3xxx).
    pub fn is_pattern_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    /// Check if this code belongs to net type validation (E5xxx / W5xxx).
    pub fn is_net_type_error(&self) -> bool {
        self.as_str()[1..].starts_with('5')
    }

    /// Check if this code is reported by constant evaluation (E6xxx).
    pub fn is_eval_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
