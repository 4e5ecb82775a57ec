//! weft-core
//!
//! Core building blocks for fixed-pool batch dispatch.
//!
//! # Modules
//! - **domain**: value types (Task, WorkerId, CompletionRecord, WorkerMessage, errors)
//! - **ports**: seams for external collaborators (Clock, TaskRunner, TaskSource, ResultSink)
//! - **app**: the worker loop, worker pool and dispatcher
//! - **impls**: concrete adapters (text task list, CSV / JSON lines output, simulated work)

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
