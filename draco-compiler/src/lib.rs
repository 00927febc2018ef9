pub mod errors;
pub mod flow;
pub mod semantic;
pub mod source;
pub mod syntax;

pub use semantic::{Compilation, CompilationOptions};
pub use syntax::{parse, SyntaxTree};

mod messages;
mod once;
