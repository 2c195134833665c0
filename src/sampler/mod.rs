//! Hash-based sampler
//!
//! A [`HashSampler`] decides, for every record key it is shown, whether that
//! key belongs to a deterministic sample. Which bytes of the key matter is up
//! to a [`KeyHasher`]; the sampler owns everything else: the algorithm, the
//! modulus, and the acceptance test.
//!
//! # Lifecycle
//!
//! 1. Build a key hasher
//! 2. Optionally call [`HashSampler::validate_options`] to fail fast on a bad
//!    configuration
//! 3. Call [`HashSampler::init`], which resolves the algorithm and modulus once
//! 4. Call [`HashSampler::accept`] as many times as needed, from any thread
//!
//! There is no way to re-initialize a sampler or to call `accept` on one that
//! was never initialized: `init` is the only constructor.
//!
//! # Example
//!
//! ```
//! use hash_sampler::config::SamplerConfiguration;
//! use hash_sampler::sampler::{key_hasher_fn, HashSampler};
//!
//! let rows = key_hasher_fn(|sink, row: &str| {
//!     sink.put_str(row);
//!     Ok(())
//! });
//!
//! let config = SamplerConfiguration::new("rows")
//!     .with_option("hasher", "murmur3_32")
//!     .with_option("modulus", "1");
//!
//! HashSampler::validate_options(&rows, &config)?;
//! let sampler = HashSampler::init(rows, &config)?;
//! assert!(sampler.accept("any row")?);
//! # Ok::<(), hash_sampler::SamplerError>(())
//! ```

pub mod text;

use crate::config::{validator, SamplerConfiguration, SamplerOptions};
use crate::hasher::{HashAccumulator, HashAlgorithm, HashPolicy, Modulus};
use crate::{Result, SamplerError};
use std::fmt;
use std::io;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Sampling decision exposed to the storage engine
pub trait Sampler<K: ?Sized>: Send + Sync {
    /// Whether `key` belongs to the sample
    fn accept(&self, key: &K) -> Result<bool>;
}

/// Chooses which bytes of a key feed the hash
///
/// This is the extension point of the sampler: a row-level policy writes the
/// row, a row-and-family policy writes both, and so on. Implementations must
/// write the same bytes for the same key every time.
pub trait KeyHasher: Send + Sync {
    /// Record key type
    type Key: ?Sized;

    /// Write the sampling-relevant bytes of `key` into `sink`
    ///
    /// # Errors
    ///
    /// An error here is surfaced from [`HashSampler::accept`] as
    /// [`SamplerError::HashComputationFailed`]; it is never treated as a
    /// rejection.
    fn hash(&self, sink: &mut HashAccumulator, key: &Self::Key) -> io::Result<()>;

    /// Validate options this key hasher owns
    ///
    /// Called after the hasher and modulus options have been checked. The
    /// default accepts everything.
    fn validate_options(&self, _options: &SamplerOptions) -> Result<()> {
        Ok(())
    }
}

/// Key hasher backed by a closure, see [`key_hasher_fn`]
pub struct FnKeyHasher<K: ?Sized, F> {
    f: F,
    _key: PhantomData<fn(&K)>,
}

/// Build a [`KeyHasher`] from a closure
pub fn key_hasher_fn<K, F>(f: F) -> FnKeyHasher<K, F>
where
    K: ?Sized,
    F: Fn(&mut HashAccumulator, &K) -> io::Result<()> + Send + Sync,
{
    FnKeyHasher {
        f,
        _key: PhantomData,
    }
}

impl<K, F> KeyHasher for FnKeyHasher<K, F>
where
    K: ?Sized,
    F: Fn(&mut HashAccumulator, &K) -> io::Result<()> + Send + Sync,
{
    type Key = K;

    fn hash(&self, sink: &mut HashAccumulator, key: &K) -> io::Result<()> {
        (self.f)(sink, key)
    }
}

/// Deterministic hash sampler
///
/// Holds a key hasher, a hash algorithm and a modulus, all fixed at
/// [`init`](Self::init). A key is accepted when its hash is divisible by the
/// modulus, so the long-run acceptance rate is about `1 / modulus`.
///
/// `accept` takes `&self` and builds a new accumulator for every call, so a
/// single sampler can be shared across threads without locking.
pub struct HashSampler<H> {
    name: String,
    key_hasher: H,
    policy: HashPolicy,
}

impl<H: KeyHasher> HashSampler<H> {
    /// Validate a configuration before initialization
    ///
    /// Checks the `hasher` and `modulus` values first, then hands the
    /// options to the key hasher. Nothing is resolved or allocated.
    pub fn validate_options(key_hasher: &H, config: &SamplerConfiguration) -> Result<()> {
        validator::validate_config(config)?;
        key_hasher.validate_options(config.options())
    }

    /// Resolve the hashing policy and build the sampler
    ///
    /// # Errors
    ///
    /// - [`SamplerError::MissingOption`] if `hasher` or `modulus` is absent
    /// - [`SamplerError::UnknownAlgorithm`] if `hasher` is not recognized
    /// - [`SamplerError::InvalidConfiguration`] if `modulus` is not a positive integer
    pub fn init(key_hasher: H, config: &SamplerConfiguration) -> Result<Self> {
        let policy = HashPolicy::from_options(config.options())?;

        debug!(
            sampler = %config.sampler,
            hasher = %policy.algorithm,
            modulus = %policy.modulus,
            "hash sampler initialized"
        );

        Ok(Self {
            name: config.sampler.clone(),
            key_hasher,
            policy,
        })
    }

    /// Whether `key` belongs to the sample
    ///
    /// Deterministic: the same key always gets the same answer from the same
    /// sampler.
    pub fn accept(&self, key: &H::Key) -> Result<bool> {
        let mut acc = self.policy.algorithm.new_accumulator();

        if let Err(e) = self.key_hasher.hash(&mut acc, key) {
            warn!(sampler = %self.name, error = %e, "key hasher failed");
            return Err(SamplerError::HashComputationFailed(e));
        }

        let hash = acc.finish().map_err(SamplerError::HashComputationFailed)?;
        Ok(self.policy.accepts(hash))
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.policy.algorithm
    }

    pub fn modulus(&self) -> Modulus {
        self.policy.modulus
    }

    /// Name the sampler was configured under
    pub fn sampler_name(&self) -> &str {
        &self.name
    }

    pub fn key_hasher(&self) -> &H {
        &self.key_hasher
    }
}

impl<H: KeyHasher> Sampler<H::Key> for HashSampler<H> {
    fn accept(&self, key: &H::Key) -> Result<bool> {
        HashSampler::accept(self, key)
    }
}

impl<H> fmt::Debug for HashSampler<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSampler")
            .field("name", &self.name)
            .field("algorithm", &self.policy.algorithm)
            .field("modulus", &self.policy.modulus)
            .finish()
    }
}
