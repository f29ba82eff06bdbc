//! Prompt templates for the question and guess steps.

pub mod template;

pub use template::PromptTemplate;
