//! Typed model of the JSON documents produced by the Catln compiler.
//!
//! Every grammar arrives as `{"tag": ..., "contents": ...}` nodes. Decoding
//! never fails on a single bad node: unknown tags and contents that do not
//! fit a known tag decode to an `Unrecognized` variant of that grammar, so
//! renderers can degrade one node instead of the whole document.

pub mod document;
pub mod error;
pub mod expr;
pub mod page_id;
pub mod position;
pub mod statement;
pub mod tagged;
pub mod types;
pub mod value;

pub use document::{
    Annotation, Arrow, Constraint, ConstraintTrace, Document, LlvmDump, LlvmModule, Page,
    ProgramDump, ProgramEntry, decode_payload,
};
pub use error::{ModelError, Result};
pub use expr::{Constant, Expr, Guard, Object, PatternArm, TupleArg};
pub use page_id::{decode_page_id, encode_page_id};
pub use position::{Meta, Position, PositionKey};
pub use statement::{Decl, DeclSubStatement, Statement};
pub use tagged::{Unrecognized, kind_of, scalar_text};
pub use types::{PartialOption, SumPartial, Type};
pub use value::{Artifact, PRINT_ANNOTATION, PRINT_ARG, RESULT_TUPLE, Val};
