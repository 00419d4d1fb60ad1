//! Kernel configuration

/// Size above which inner products run as a single sequential reduction
pub const DEFAULT_CROSSOVER: usize = 1 << 20;

/// Default worker count for the fallback inner products
pub const DEFAULT_NUM_THREADS: usize = 2;

/// Configuration for the fallback kernels
///
/// Ignored by the `blas` path, which hands the whole call to CBLAS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    /// Number of partitions the fallback kernels split their work into
    ///
    /// Default: 2
    pub num_threads: usize,

    /// Length above which `inner_prod` runs sequentially
    ///
    /// Default: 2^20
    pub dotu_crossover: usize,

    /// Length above which `inner_prod_c` runs sequentially
    ///
    /// Default: 2^20
    pub dotc_crossover: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            num_threads: DEFAULT_NUM_THREADS,
            dotu_crossover: DEFAULT_CROSSOVER,
            dotc_crossover: DEFAULT_CROSSOVER,
        }
    }
}

impl KernelConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Single partition everywhere
    pub fn sequential() -> Self {
        Self {
            num_threads: 1,
            ..Default::default()
        }
    }

    /// One partition per thread of the current rayon pool
    pub fn from_available_parallelism() -> Self {
        Self {
            num_threads: rayon::current_num_threads().max(1),
            ..Default::default()
        }
    }

    /// Set the number of partitions
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Set both inner-product crossovers
    pub fn with_crossover(mut self, crossover: usize) -> Self {
        self.dotu_crossover = crossover;
        self.dotc_crossover = crossover;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.num_threads == 0 {
            return Err("num_threads must be > 0".to_string());
        }
        if self.dotu_crossover == 0 || self.dotc_crossover == 0 {
            return Err(format!(
                "crossovers must be > 0, got dotu={} dotc={}",
                self.dotu_crossover, self.dotc_crossover
            ));
        }
        Ok(())
    }
}
