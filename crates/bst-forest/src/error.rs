use thiserror::Error;

use crate::node::Node;

/// Code reported by [`Registry::last_error_code`](crate::Registry::last_error_code)
/// when the most recent operation succeeded.
pub const NO_ERROR: i32 = 0;

const UNDEFINED_ERROR: &str = "undefined error number";

pub type Result<T> = std::result::Result<T, BstError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BstError {
    #[error("tree `{0}` is not defined")]
    NotDefined(String),
    #[error("node is owned by a different tree")]
    TreeNodeMismatch,
    #[error("unable to allocate {0} bytes of node storage")]
    AllocationFailed(usize),
    #[error("record size must be greater than zero")]
    InvalidRecordSize,
    #[error("tree is out of balance at node {node}: stored {stored}, measured {measured}")]
    OutOfBalance { node: u32, stored: i8, measured: i64 },
    #[error("no printing function given for tree `{0}`")]
    NoPrinterGiven(String),
    #[error("no compare function given")]
    MissingComparator,
    #[error("tree `{0}` is already defined")]
    AlreadyDefined(String),
    #[error("compare function cannot be the same as the print function")]
    ComparatorEqualsPrinter,
    #[error("key not in tree")]
    KeyNotFound,
    #[error("duplicate key, key already in tree")]
    DuplicateKey,
    #[error("node {node} has a wrong child tag or parent link")]
    CorruptedTag { node: u32 },
    #[error("tree name is too short")]
    NameTooShort,
    #[error("tree name is {0} characters, longer than the limit")]
    NameTooLong(usize),
    #[error("copy target tree `{0}` is already defined")]
    CopyTargetDefined(String),
    #[error("copied {copied} nodes, source holds {expected}")]
    CopyCountMismatch { expected: usize, copied: usize },
    #[error("trees have different record sizes ({0} and {1})")]
    IncompatibleTreeFamily(usize, usize),
    #[error("no visit function given")]
    NoCallbackGiven,
}

/// A node [`Registry::release`](crate::Registry::release) refused to take
/// back, returned to the caller together with the reason.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{error}")]
pub struct ReleaseError {
    pub error: BstError,
    pub node: Node,
}

impl From<ReleaseError> for BstError {
    fn from(refused: ReleaseError) -> Self {
        refused.error
    }
}

impl BstError {
    /// Stable numeric code of this error kind.
    pub fn code(&self) -> i32 {
        match self {
            BstError::NotDefined(_) => 101,
            BstError::TreeNodeMismatch => 102,
            BstError::AllocationFailed(_) => 103,
            BstError::InvalidRecordSize => 104,
            BstError::OutOfBalance { .. } => 108,
            BstError::NoPrinterGiven(_) => 109,
            BstError::MissingComparator => 110,
            BstError::AlreadyDefined(_) => 111,
            BstError::ComparatorEqualsPrinter => 112,
            BstError::KeyNotFound => 113,
            BstError::DuplicateKey => 114,
            BstError::CorruptedTag { .. } => 115,
            BstError::NameTooShort => 116,
            BstError::CopyTargetDefined(_) => 117,
            BstError::CopyCountMismatch { .. } => 119,
            BstError::IncompatibleTreeFamily(..) => 122,
            BstError::NameTooLong(_) => 126,
            BstError::NoCallbackGiven => 127,
        }
    }
}

/// Human-readable line for an error code. Unknown codes map to
/// "undefined error number".
pub fn message_for_code(code: i32) -> &'static str {
    match code {
        NO_ERROR => "no error",
        101 => "specified tree not defined",
        102 => "node specified is owned by a different tree",
        103 => "unable to allocate node storage",
        104 => "size of the record is zero",
        108 => "avl tree is out of balance",
        109 => "no printing function specified",
        110 => "no compare function specified",
        111 => "tree is already defined",
        112 => "compare function cannot be the same as the print function",
        113 => "specified key not in tree",
        114 => "duplicate key, key already in tree",
        115 => "child tag or parent link is incorrect",
        116 => "tree name too short",
        117 => "copy to tree is already defined",
        119 => "copy counts mismatch",
        122 => "trying to compare two trees with different record sizes",
        126 => "tree name too long",
        127 => "no visit function specified",
        _ => UNDEFINED_ERROR,
    }
}
