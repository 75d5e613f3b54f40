//! Validation of Activity parameters against the provider-declared
//! parameter contract ([`ParameterContractValidator`]).

pub mod parameter_contract;

pub use parameter_contract::{ParameterContractValidator, ParameterSchema};
