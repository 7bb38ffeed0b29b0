mod error;
mod evaluation;
mod group;
mod ids;
mod output;
mod policy;
mod protest;
mod verification;

pub use error::DomainError;
pub use evaluation::PeerEvaluation;
pub use group::{GroupInfo, InputInfo};
pub use ids::{GroupId, InputId, MemberId, OutputId};
pub use output::OutputRecord;
pub use policy::{NumericPolicy, RankSort, ScoringPolicy};
pub use protest::Protest;
pub use verification::{VerificationMode, VerificationStatus};
