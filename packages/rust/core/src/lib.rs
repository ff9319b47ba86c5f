//! Export orchestration for todoexport.
//!
//! Reads a task-export CSV, groups its rows into task records, and writes one
//! document per task through a [`sink::DocumentSink`].

pub mod assembler;
pub mod export;
pub mod reader;
pub mod sink;
