pub mod helpers;
pub mod mock_chain;

pub use helpers::*;
pub use mock_chain::{spirit_key, MockChain, MOCK_SIGNER};
