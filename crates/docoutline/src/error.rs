#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Output directory {0} is the input directory; results would overwrite the span dumps")]
    OutputIsInput(String),

    #[error("{first} and {second} would both be written to {output}")]
    OutputCollision {
        first: String,
        second: String,
        output: String,
    },

    #[error("{failed} of {total} documents failed")]
    BatchFailed { failed: usize, total: usize },
}
