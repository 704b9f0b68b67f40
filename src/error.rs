use thiserror::Error;

use crate::rank::DOMAIN_SIZE;

/// Everything that can go wrong while validating, ranking or searching.
///
/// None of these are retryable: they either describe bad input or a
/// generator set that cannot be trusted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("invalid permutation: {reason}")]
    InvalidPermutation { reason: String },

    #[error("odd permutation is outside the alternating group")]
    OddPermutation,

    #[error("rank {rank} is outside 0..{}", DOMAIN_SIZE)]
    RankOutOfRange { rank: u64 },

    #[error("generator set only reaches {reached} of {expected} elements")]
    DisconnectedGeneratorSet { reached: u64, expected: u64 },

    #[error("element with rank {rank} was never reached")]
    Unreachable { rank: u64 },

    #[error("distance table has not been built")]
    EngineNotReady,

    #[error("Empty generators")]
    EmptyGenerators,

    #[error("at most {max} generators fit in a table slot, got {len}")]
    TooManyGenerators { len: usize, max: usize },

    #[error("generator {index} duplicates generator {first}")]
    DuplicateGenerator { index: usize, first: usize },

    #[error("generator {index} is an odd permutation")]
    OddGenerator { index: usize },

    #[error("inverse of generator {index} is not in the set")]
    MissingInverse { index: usize },

    #[error("could not start worker pool: {0}")]
    ThreadPool(String),
}

impl From<rayon::ThreadPoolBuildError> for GroupError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        GroupError::ThreadPool(e.to_string())
    }
}

pub type Result<T, E = GroupError> = std::result::Result<T, E>;
