// Résumé AI operations: free text → structured data, structured data → markdown,
// job-posting optimization, ATS scoring, benchmarking against top résumés, and
// free text → user profile.
// All LLM calls go through llm_client, no direct provider calls here.

pub mod handlers;
pub mod profile_data;
pub mod prompts;
pub mod resume_data;
pub mod service;
