pub mod eligibility;
pub mod status;
