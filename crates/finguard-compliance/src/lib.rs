//! finguard-compliance — compliance intent classification for a finance assistant.
//! Decides whether a query is Info, Advisory or Prediction and supplies the
//! system-prompt directive and disclaimer for each category.

pub mod classification;
pub mod patterns;
pub mod context;
pub mod instruction;
pub mod guard;
pub mod audit;

pub use classification::{classify, ClassificationResult, ComplianceCategory, IntentClassifier, MatchPhase};
pub use context::{ContextSignal, FinancialContext};
pub use guard::{ChatRequest, ComplianceGuard, GuardPolicy, GuardedPrompt, GuardedRequest, Message};
pub use instruction::{build_instruction, disclaimer};
pub use patterns::{Language, PatternCatalog, PatternSet};
