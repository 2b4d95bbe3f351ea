//! On-chain check-in.
//!
//! This is the path that submits an attendance digest to the deployed
//! contract. It is independent of [`crate::ledger::Ledger::submit_attendance`],
//! which fabricates its proof and transaction id locally; the two never share
//! state and neither calls the other.
//!
//! The network side is behind [`ContractClient`], and signing behind
//! [`TransactionSigner`]. Both are supplied by the wallet integration.

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::config::ChainConfig;
use crate::error::{Error, Result};

/// Name of the contract method that records attendance.
pub const CHECK_IN_METHOD: &str = "checkIn";

/// SHA-256 of `"{wallet}-{event_id}-{salt}"`, as raw bytes.
#[must_use]
pub fn attendance_digest(wallet: &str, event_id: &str, salt: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(format!("{wallet}-{event_id}-{salt}").as_bytes());
    hasher.finalize().into()
}

/// Signs transactions on behalf of a connected wallet. Opaque to this crate.
pub trait TransactionSigner {
    /// Sign an encoded transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet refuses or fails to sign.
    fn sign(&self, txn: &[u8]) -> Result<Vec<u8>>;
}

/// A wallet address paired with its signer.
pub struct WalletSession<'a> {
    /// Sender address.
    pub address: String,
    /// Signer for `address`.
    pub signer: &'a dyn TransactionSigner,
}

impl std::fmt::Debug for WalletSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// An application call to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Target application id.
    pub app_id: u64,
    /// Sending address.
    pub sender: String,
    /// ABI method name.
    pub method: &'static str,
    /// Encoded method arguments.
    pub args: Vec<Vec<u8>>,
}

/// Submits application calls to a node.
pub trait ContractClient {
    /// Send `call`, signed by `signer`, and return the transaction id.
    ///
    /// # Errors
    ///
    /// Returns an error if signing or submission fails.
    fn send(&self, call: &ContractCall, signer: &dyn TransactionSigner) -> Result<String>;
}

/// Sends `checkIn(hash)` for a wallet to the configured contract.
#[derive(Debug)]
pub struct OnChainCheckIn<'a, C> {
    client: &'a C,
    chain: &'a ChainConfig,
}

impl<'a, C: ContractClient> OnChainCheckIn<'a, C> {
    /// Create a check-in sender using `client` and the app id and salt in `chain`.
    #[must_use]
    pub fn new(client: &'a C, chain: &'a ChainConfig) -> Self {
        Self { client, chain }
    }

    /// Build the contract call for `session` checking in to `event_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WalletNotConnected`] if the session has no address.
    pub fn build_call(&self, session: &WalletSession<'_>, event_id: &str) -> Result<ContractCall> {
        if session.address.trim().is_empty() {
            return Err(Error::WalletNotConnected);
        }

        let hash = attendance_digest(&session.address, event_id, &self.chain.hash_salt);
        debug!("Attendance digest for {}: {}", event_id, hex::encode(hash));

        Ok(ContractCall {
            app_id: self.chain.app_id,
            sender: session.address.clone(),
            method: CHECK_IN_METHOD,
            args: vec![hash.to_vec()],
        })
    }

    /// Submit the check-in and return the transaction id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WalletNotConnected`] without a wallet address, or the
    /// client's error if submission fails.
    pub fn check_in(&self, session: &WalletSession<'_>, event_id: &str) -> Result<String> {
        let call = self.build_call(session, event_id)?;
        let txn_id = self.client.send(&call, session.signer)?;
        info!(
            "Checked in to {} on app {} as {}",
            event_id, call.app_id, txn_id
        );
        Ok(txn_id)
    }
}
