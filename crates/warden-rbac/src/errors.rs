use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RbacError {
    #[error("unknown feature: {0}")]
    UnknownFeature(String),
    #[error("unknown sub-feature: {feature}/{sub_feature}")]
    UnknownSubFeature {
        feature: String,
        sub_feature: String,
    },
    #[error("cascade violation: {feature}/{sub_feature} enabled while feature is disabled")]
    CascadeViolation {
        feature: String,
        sub_feature: String,
    },
}

pub type RbacResult<T> = Result<T, RbacError>;
