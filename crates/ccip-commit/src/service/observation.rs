//! Observation building blocks.
//!
//! Every read runs under a deadline; an elapsed deadline drops (and so
//! cancels) the read and surfaces as `ReaderError::Timeout`.

use crate::domain::{
    CCIPMsgBaseDetails, CommitError, CommitResult, GasPriceChain, ObserverInfo, ReaderError,
    SeqNumChain, TokenPrice,
};
use crate::ports::outbound::{ChainReader, MessageHasher, TokenPricesReader};
use futures::future::try_join_all;
use shared_types::{ChainSelector, SeqNumRange, TokenId};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Run a read with a deadline.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, read: F) -> Result<T, ReaderError>
where
    F: Future<Output = Result<T, ReaderError>>,
{
    tokio::time::timeout(deadline, read)
        .await
        .map_err(|_| ReaderError::Timeout(deadline))?
}

fn ensure_count(what: &'static str, requested: usize, got: usize) -> CommitResult<()> {
    if requested != got {
        return Err(CommitError::ResultCountMismatch {
            what,
            requested,
            got,
        });
    }
    Ok(())
}

/// Latest committed sequence number per source chain, read on the
/// destination chain.
pub(crate) async fn observe_max_seq_nums<R: ChainReader>(
    reader: &R,
    source_chains: &[ChainSelector],
    deadline: Duration,
) -> CommitResult<Vec<SeqNumChain>> {
    if source_chains.is_empty() {
        return Ok(Vec::new());
    }
    let seq_nums = with_deadline(deadline, reader.next_seq_num(source_chains)).await?;
    ensure_count("max seq nums", source_chains.len(), seq_nums.len())?;

    Ok(source_chains
        .iter()
        .zip(seq_nums)
        .map(|(&chain, seq_num)| SeqNumChain::new(chain, seq_num))
        .collect())
}

/// Scan every readable chain of `prev_max_seq_nums` for messages in
/// `[max+1, max+1+batch]`.
///
/// One concurrent read per chain. The first failure fails the whole scan.
/// Results keep the order of `prev_max_seq_nums`.
pub(crate) async fn observe_new_msgs<R: ChainReader, H: MessageHasher>(
    reader: &R,
    hasher: &H,
    prev_max_seq_nums: &[SeqNumChain],
    info: &ObserverInfo,
    batch_size: u64,
    deadline: Duration,
) -> CommitResult<Vec<CCIPMsgBaseDetails>> {
    let scans = prev_max_seq_nums
        .iter()
        .filter(|s| info.can_read(s.chain_sel))
        .map(|s| {
            let chain = s.chain_sel;
            let start = s.seq_num.saturating_add(1);
            let range = SeqNumRange::new(start, start.saturating_add(batch_size));
            async move {
                let msgs = with_deadline(deadline, reader.msgs_between_seq_nums(chain, range)).await?;
                debug!("[commit] Found {} messages on chain {} in {}", msgs.len(), chain, range);
                Ok::<_, CommitError>(
                    msgs.iter()
                        .map(|m| {
                            CCIPMsgBaseDetails::new(
                                m.header.id,
                                m.header.source_chain,
                                m.header.seq_num,
                                hasher.hash(m),
                            )
                        })
                        .collect::<Vec<_>>(),
                )
            }
        });

    let per_chain = try_join_all(scans).await?;
    Ok(per_chain.into_iter().flatten().collect())
}

/// USD prices of the configured tokens.
pub(crate) async fn observe_token_prices<P: TokenPricesReader>(
    reader: &P,
    tokens: &[TokenId],
    deadline: Duration,
) -> CommitResult<Vec<TokenPrice>> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    let prices = with_deadline(deadline, reader.get_token_prices_usd(tokens)).await?;
    ensure_count("token prices", tokens.len(), prices.len())?;

    Ok(tokens
        .iter()
        .zip(prices)
        .map(|(token, price)| TokenPrice::new(token.clone(), price))
        .collect())
}

/// Gas prices of the source chains.
///
/// A reader without a chain writer yields no prices instead of an error.
pub(crate) async fn observe_gas_prices<R: ChainReader>(
    reader: &R,
    chains: &[ChainSelector],
    deadline: Duration,
) -> CommitResult<Vec<GasPriceChain>> {
    if chains.is_empty() {
        return Ok(Vec::new());
    }
    let prices = match with_deadline(deadline, reader.gas_prices(chains)).await {
        Ok(prices) => prices,
        Err(ReaderError::ChainWriterNotFound(chain)) => {
            warn!("[commit] No chain writer for chain {}, skipping gas prices", chain);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    ensure_count("gas prices", chains.len(), prices.len())?;

    Ok(chains
        .iter()
        .zip(prices)
        .map(|(&chain, price)| GasPriceChain::new(chain, price))
        .collect())
}
