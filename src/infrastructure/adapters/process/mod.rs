//! Process Adapter - 外部进程执行

mod tokio_process_runner;

pub use tokio_process_runner::TokioProcessRunner;
