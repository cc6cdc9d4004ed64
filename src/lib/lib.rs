pub mod substitution;
