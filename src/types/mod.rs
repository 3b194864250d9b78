pub mod audit;

pub use audit::{
    AuditCore, AuditResult, BattlecardData, FeatureGapEntry, FeatureStatus, MediaField,
    SentimentAnalysis, SwotData,
};
