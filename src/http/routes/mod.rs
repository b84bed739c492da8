pub mod to_do;
