// The analysis pipeline: normalization, field extraction, section
// segmentation, quality heuristics, format statistics, scoring, and
// recommendations. Strictly sequential per request; the orchestrator in
// `analyzer` owns every intermediate structure for one call.

pub mod analyzer;
pub mod contact;
pub mod format;
pub mod handlers;
pub mod quality;
pub mod recommend;
pub mod report;
pub mod scoring;
pub mod sections;
