pub mod use_cases;

pub use use_cases::{
    login::{LoginError, LoginUseCase},
    provision_user::{ProvisionOutcome, ProvisionUserError, ProvisionUserUseCase},
    submit_contact::{SubmitContactError, SubmitContactUseCase},
};
