mod extraction_prompt;
mod filter_extractor;
mod search_query;
mod search_url;
mod spend_query_service;
mod spending_analyst;

pub use extraction_prompt::{
    EXTRACTION_SCHEMA_NAME, EXTRACTION_SYSTEM_PROMPT, build_extraction_prompt, extraction_schema,
};
pub use filter_extractor::{ExtractionError, FilterExtractor};
pub use search_query::{QueryOptions, build_search_query};
pub use search_url::{SearchUrlError, build_search_url, search_url_params};
pub use spend_query_service::{
    PipelineOptions, SpendQueryError, SpendQueryOutcome, SpendQueryService,
};
pub use spending_analyst::{ANALYSIS_SYSTEM_PROMPT, SpendingAnalyst, build_analysis_prompt};
