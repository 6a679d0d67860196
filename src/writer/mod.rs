pub mod makefile;
pub mod resources;
