#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("options ({context}): {detail}")]
    Options { context: &'static str, detail: String },

    #[error("input '{path}': {source}")]
    Input {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Convert(#[from] record_json::ConvertError),

    #[error("{0} properties could not be converted")]
    Incomplete(usize),
}
