pub mod descriptor;
pub mod script;
