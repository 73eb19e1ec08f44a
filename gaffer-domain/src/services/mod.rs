mod candidate_filter;

pub use candidate_filter::CandidateFilter;
