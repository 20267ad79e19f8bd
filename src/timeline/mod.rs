pub mod assembler;
pub mod command;
pub mod frame;
pub mod mask;
pub mod writer;
