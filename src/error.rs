use crate::{
    config::ConfigError, finder::CentreFinderError, partition::PartitionError,
    profile::ProfileError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `config` module")]
    Config(#[from] ConfigError),
    #[error("Error in the `profile` module")]
    Profile(#[from] ProfileError),
    #[error("Error in the `partition` module")]
    Partition(#[from] PartitionError),
    #[error("Error in the `finder` module")]
    CentreFinder(#[from] CentreFinderError),
}

/// Boxed error returned by the reduction collaborators
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;
