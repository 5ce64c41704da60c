mod github;

pub use github::{GithubOutput, OutputTarget};
