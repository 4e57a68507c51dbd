pub mod error;
pub mod inst;
pub mod operand;
pub mod reader;
pub mod template;
pub mod token;
pub mod writer;
